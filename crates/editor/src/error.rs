//! Editing errors
//!
//! A failed edit leaves the paper untouched. Refused type changes are not
//! errors; see [`Outcome::Rejected`](crate::Outcome::Rejected).

use paper_editor_core::ElementId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("section {index} out of range ({len} sections)")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("question {index} out of range ({len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("child question {index} out of range ({len} child questions)")]
    ChildOutOfRange { index: usize, len: usize },

    #[error("option {index} out of range ({len} options)")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("rubric {index} out of range ({len} rubrics)")]
    RubricOutOfRange { index: usize, len: usize },

    #[error("no section with id {0}")]
    UnknownSection(ElementId),

    #[error("question has no child question list")]
    NoChildQuestions,

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

pub type EditResult<T> = std::result::Result<T, EditError>;

/// Check `index` against `len`, building the error with `make`
pub(crate) fn check_index(
    index: usize,
    len: usize,
    make: fn(usize, usize) -> EditError,
) -> EditResult<usize> {
    if index < len {
        Ok(index)
    } else {
        Err(make(index, len))
    }
}

impl EditError {
    pub(crate) fn section(index: usize, len: usize) -> Self {
        EditError::SectionOutOfRange { index, len }
    }

    pub(crate) fn question(index: usize, len: usize) -> Self {
        EditError::QuestionOutOfRange { index, len }
    }

    pub(crate) fn child(index: usize, len: usize) -> Self {
        EditError::ChildOutOfRange { index, len }
    }

    pub(crate) fn option(index: usize, len: usize) -> Self {
        EditError::OptionOutOfRange { index, len }
    }

    pub(crate) fn rubric(index: usize, len: usize) -> Self {
        EditError::RubricOutOfRange { index, len }
    }
}
