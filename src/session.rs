//! Editing session
//!
//! Wires an editor, the event bus and the paper details stash together.
//! The stash store is injected so sessions can run against memory in tests.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{info, warn};

use paper_editor_core::{
    open_store, AppConfig, EventBus, EventSubscription, KeyValueStore, PaperDetailsStash,
};
use paper_editor_editor::{Command, EditError, Outcome, PaperEditor};

/// Stash over a shared, dynamically chosen store
pub type SharedStash = PaperDetailsStash<Arc<dyn KeyValueStore>>;

/// Tally of a replayed command script
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub unchanged: usize,
    /// (command position, reason) for refused type changes
    pub rejected: Vec<(usize, String)>,
    /// (command position, error) for commands that failed
    pub failed: Vec<(usize, String)>,
}

impl ReplaySummary {
    pub fn total(&self) -> usize {
        self.applied + self.unchanged + self.rejected.len() + self.failed.len()
    }
}

/// An editor with its collaborators
pub struct Session {
    config: AppConfig,
    events: Arc<EventBus>,
    editor: PaperEditor,
    stash: SharedStash,
}

impl Session {
    /// Create a session over the given store
    pub fn new(config: AppConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let events = Arc::new(EventBus::new());
        let editor = PaperEditor::new(config.editor.clone()).with_events(Arc::clone(&events));
        let stash = PaperDetailsStash::with_key(store, config.storage.stash_key.clone())
            .with_events(Arc::clone(&events));

        Self {
            config,
            events,
            editor,
            stash,
        }
    }

    /// Create a session using the store selected in the configuration
    pub fn open(config: AppConfig) -> Result<Self> {
        let store = open_store(&config.storage).context("Failed to open local storage")?;
        Ok(Self::new(config, store))
    }

    /// Read persisted state; call once before editing
    pub fn mount(&mut self) -> Result<()> {
        let key = self.stash.key().to_string();
        let details = self
            .stash
            .load()
            .with_context(|| format!("Failed to read {}", key))?;
        if details.is_null() {
            info!("No stored paper details");
        } else {
            info!("Restored paper details");
        }
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn editor(&self) -> &PaperEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut PaperEditor {
        &mut self.editor
    }

    /// Stored paper details
    pub fn paper_details(&self) -> &Value {
        self.stash.get()
    }

    /// Replace the paper details, writing them through to storage
    pub fn set_paper_details(&mut self, details: Value) -> Result<()> {
        self.stash
            .set(details)
            .with_context(|| format!("Failed to write {}", self.stash.key()))
    }

    pub fn subscribe(&self) -> EventSubscription {
        self.events.subscribe()
    }

    /// Apply commands in order, continuing past rejections and failures
    pub fn replay(&mut self, commands: Vec<Command>) -> ReplaySummary {
        let mut summary = ReplaySummary::default();

        for (position, command) in commands.into_iter().enumerate() {
            match self.editor.apply(command) {
                Ok(Outcome::Applied { .. }) => summary.applied += 1,
                Ok(Outcome::Unchanged) | Ok(Outcome::ModeChanged(_)) => summary.unchanged += 1,
                Ok(Outcome::Rejected(rejection)) => {
                    summary.rejected.push((position, rejection.to_string()));
                }
                Err(err) => {
                    warn!("Command {} failed: {}", position, err);
                    summary.failed.push((position, describe(&err)));
                }
            }
        }

        info!(
            "Replayed {} commands: {} applied, {} rejected, {} failed",
            summary.total(),
            summary.applied,
            summary.rejected.len(),
            summary.failed.len()
        );
        summary
    }
}

fn describe(err: &EditError) -> String {
    match err {
        EditError::NoChildQuestions => {
            "question has no child questions to edit or remove".to_string()
        }
        other => other.to_string(),
    }
}
