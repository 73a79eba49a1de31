//! Paper Editor - editing engine
//!
//! Question paper editing with:
//! - Immutable, structurally shared paper revisions
//! - Typed commands with undo/redo
//! - Per-mode question type whitelist
//! - Drag-and-drop reorder and move of questions between sections

pub mod commands;
pub mod drag;
pub mod error;
pub mod history;
pub mod model;
pub mod policy;
pub mod state;

pub use commands::{Command, Outcome, QuestionField};
pub use drag::{apply_drag, DragLocation, DragResult};
pub use error::{EditError, EditResult};
pub use history::{History, Revision};
pub use model::{
    ChildQuestion, Marks, Question, QuestionBody, QuestionLike, QuestionOption, QuestionPaper,
    QuestionType, Rubric, Section,
};
pub use policy::{TypeCheck, TypePolicy, TypeRejection, TypeTarget};
pub use state::PaperEditor;
