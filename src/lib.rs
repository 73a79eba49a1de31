//! Paper Editor - question paper authoring engine
//!
//! An editing core for question papers: a title and description, ordered
//! sections, and questions that may carry one level of child questions.
//!
//! ## Features
//!
//! - **Typed commands**: every edit is a [`Command`](editor::Command); unknown fields cannot parse
//! - **Immutable revisions**: each edit produces a new, structurally shared paper with undo/redo
//! - **Type rules**: manual mode enforces a question type whitelist and reports refusals
//! - **Drag and drop**: reorder questions within a section or move them across sections
//! - **Paper details stash**: an opaque JSON object mirrored to injectable key/value storage
//!
//! ## Architecture
//!
//! - `paper-editor-core`: configuration, events, ids and storage
//! - `paper-editor-editor`: model, commands, type policy, drag-and-drop and history

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;
pub mod session;

// Re-export main components for library usage
pub use paper_editor_core as core;
pub use paper_editor_editor as editor;

pub use session::{ReplaySummary, Session};

/// Prelude module for convenient imports
pub mod prelude {
    pub use paper_editor_core::{AppConfig, EditMode, KeyValueStore, MemoryStore};
    pub use paper_editor_editor::{
        Command, DragLocation, DragResult, Outcome, PaperEditor, QuestionField, QuestionType,
    };

    pub use crate::session::Session;
}
