//! Undo/redo history
//!
//! Revisions are whole immutable snapshots, so undoing is swapping `Arc`s.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::QuestionPaper;

/// A paper snapshot recorded before an edit
#[derive(Debug, Clone)]
pub struct Revision {
    pub paper: Arc<QuestionPaper>,
    /// Label of the command that replaced this snapshot
    pub label: &'static str,
    pub recorded_at: DateTime<Utc>,
}

/// Bounded undo stack with redo
#[derive(Debug)]
pub struct History {
    undo_stack: VecDeque<Revision>,
    redo_stack: Vec<Revision>,
    max_undo_history: usize,
}

impl History {
    pub fn new(max_undo_history: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_undo_history,
        }
    }

    /// Record the snapshot an edit is about to replace
    pub fn record(&mut self, paper: Arc<QuestionPaper>, label: &'static str) {
        self.redo_stack.clear();
        if self.max_undo_history == 0 {
            return;
        }
        if self.undo_stack.len() == self.max_undo_history {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(Revision {
            paper,
            label,
            recorded_at: Utc::now(),
        });
    }

    /// Step back: hand over `current`, receive the previous snapshot
    pub fn undo(&mut self, current: Arc<QuestionPaper>) -> Option<Revision> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(Revision {
            paper: current,
            label: previous.label,
            recorded_at: Utc::now(),
        });
        Some(previous)
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: Arc<QuestionPaper>) -> Option<Revision> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(Revision {
            paper: current,
            label: next.label,
            recorded_at: Utc::now(),
        });
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Label of the edit `undo` would revert
    pub fn undo_label(&self) -> Option<&'static str> {
        self.undo_stack.back().map(|r| r.label)
    }
}
