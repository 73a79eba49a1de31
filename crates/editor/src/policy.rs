//! Question Type Policy
//!
//! Which question types each editing mode accepts. In manual mode top-level
//! questions may be subjective, single-correct, multiple-correct or nested,
//! and child questions may not be nested. Other modes accept any tag.

use std::fmt;

use paper_editor_core::EditMode;
use serde::Serialize;

use crate::model::QuestionType;

/// Types a manually authored top-level question may take
pub const MANUAL_QUESTION_TYPES: &[QuestionType] = &[
    QuestionType::Subjective,
    QuestionType::SingleCorrect,
    QuestionType::MultipleCorrect,
    QuestionType::Nested,
];

/// Types a manually authored child question may take
pub const MANUAL_CHILD_TYPES: &[QuestionType] = &[
    QuestionType::Subjective,
    QuestionType::SingleCorrect,
    QuestionType::MultipleCorrect,
];

/// What kind of question a type change targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTarget {
    Question,
    ChildQuestion,
}

impl fmt::Display for TypeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTarget::Question => f.write_str("question"),
            TypeTarget::ChildQuestion => f.write_str("child question"),
        }
    }
}

/// Why a type change was refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRejection {
    pub requested: QuestionType,
    pub target: TypeTarget,
    pub mode: EditMode,
    pub allowed: Vec<QuestionType>,
}

impl fmt::Display for TypeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let allowed: Vec<&str> = self.allowed.iter().map(QuestionType::as_str).collect();
        write!(
            f,
            "\"{}\" is not allowed for a {} in {} mode (allowed: {})",
            self.requested,
            self.target,
            self.mode.display_name(),
            allowed.join(", ")
        )
    }
}

/// Result of checking a requested type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeCheck {
    Accepted,
    Rejected(TypeRejection),
}

impl TypeCheck {
    pub fn is_accepted(&self) -> bool {
        matches!(self, TypeCheck::Accepted)
    }
}

/// Type whitelist for one editing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypePolicy {
    mode: EditMode,
}

impl TypePolicy {
    pub fn for_mode(mode: EditMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Allowed types for the target, `None` when unrestricted
    pub fn allowed(&self, target: TypeTarget) -> Option<&'static [QuestionType]> {
        if !self.mode.restricts_types() {
            return None;
        }
        match target {
            TypeTarget::Question => Some(MANUAL_QUESTION_TYPES),
            TypeTarget::ChildQuestion => Some(MANUAL_CHILD_TYPES),
        }
    }

    pub fn check(&self, target: TypeTarget, requested: &QuestionType) -> TypeCheck {
        match self.allowed(target) {
            Some(allowed) if !allowed.contains(requested) => TypeCheck::Rejected(TypeRejection {
                requested: requested.clone(),
                target,
                mode: self.mode,
                allowed: allowed.to_vec(),
            }),
            _ => TypeCheck::Accepted,
        }
    }

    pub fn check_question(&self, requested: &QuestionType) -> TypeCheck {
        self.check(TypeTarget::Question, requested)
    }

    pub fn check_child(&self, requested: &QuestionType) -> TypeCheck {
        self.check(TypeTarget::ChildQuestion, requested)
    }

    /// Type a child keeps when its parent becomes nested
    pub fn coerce_child(requested: &QuestionType) -> QuestionType {
        if MANUAL_CHILD_TYPES.contains(requested) {
            requested.clone()
        } else {
            QuestionType::Subjective
        }
    }
}
