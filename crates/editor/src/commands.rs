//! Editor Commands
//!
//! Every mutation of the question paper is a typed command, so an edit to a
//! field that does not exist cannot be expressed.

use paper_editor_core::EditMode;
use serde::{Deserialize, Serialize};

use crate::drag::DragResult;
use crate::model::{Marks, QuestionType};
use crate::policy::TypeRejection;

/// Field update applied to a question or child question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum QuestionField {
    Prompt(String),
    /// Subject to the mode's type whitelist
    Type(QuestionType),
    Marks(Marks),
    Difficulty(String),
    Answer(String),

    AddOption {
        text: String,
        is_correct: bool,
    },
    SetOptionText {
        index: usize,
        text: String,
    },
    SetOptionCorrect {
        index: usize,
        is_correct: bool,
    },
    RemoveOption { index: usize },

    AddRubric {
        criteria: String,
        weight: f64,
    },
    SetRubricCriteria {
        index: usize,
        criteria: String,
    },
    SetRubricWeight {
        index: usize,
        weight: f64,
    },
    RemoveRubric { index: usize },
}

impl QuestionField {
    /// Marks update from raw text input
    pub fn marks_from_input(input: &str) -> Self {
        QuestionField::Marks(Marks::parse(input))
    }

    /// Short name used in logs and history
    pub fn name(&self) -> &'static str {
        match self {
            QuestionField::Prompt(_) => "prompt",
            QuestionField::Type(_) => "type",
            QuestionField::Marks(_) => "marks",
            QuestionField::Difficulty(_) => "difficulty",
            QuestionField::Answer(_) => "answer",
            QuestionField::AddOption { .. } => "add option",
            QuestionField::SetOptionText { .. } => "option text",
            QuestionField::SetOptionCorrect { .. } => "option correctness",
            QuestionField::RemoveOption { .. } => "remove option",
            QuestionField::AddRubric { .. } => "add rubric",
            QuestionField::SetRubricCriteria { .. } => "rubric criteria",
            QuestionField::SetRubricWeight { .. } => "rubric weight",
            QuestionField::RemoveRubric { .. } => "remove rubric",
        }
    }
}

/// Editor command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    // Paper
    SetTitle { title: String },
    SetDescription { description: String },
    SetMode { mode: EditMode },

    // Sections
    AddSection,
    RemoveSection { section: usize },
    SetSectionName {
        section: usize,
        name: String,
    },
    SetSectionInstructions {
        section: usize,
        instructions: String,
    },

    // Questions
    AddQuestion { section: usize },
    UpdateQuestion {
        section: usize,
        question: usize,
        update: QuestionField,
    },
    RemoveQuestion {
        section: usize,
        question: usize,
    },

    // Child questions
    AddChildQuestion {
        section: usize,
        question: usize,
    },
    UpdateChildQuestion {
        section: usize,
        question: usize,
        child: usize,
        update: QuestionField,
    },
    RemoveChildQuestion {
        section: usize,
        question: usize,
        child: usize,
    },

    // Drag and drop
    Drag(DragResult),

    // Undo/Redo
    Undo,
    Redo,
}

impl Command {
    /// Short description used in logs and history
    pub fn label(&self) -> &'static str {
        match self {
            Command::SetTitle { .. } => "set title",
            Command::SetDescription { .. } => "set description",
            Command::SetMode { .. } => "set mode",
            Command::AddSection => "add section",
            Command::RemoveSection { .. } => "remove section",
            Command::SetSectionName { .. } => "rename section",
            Command::SetSectionInstructions { .. } => "set section instructions",
            Command::AddQuestion { .. } => "add question",
            Command::UpdateQuestion { .. } => "update question",
            Command::RemoveQuestion { .. } => "remove question",
            Command::AddChildQuestion { .. } => "add child question",
            Command::UpdateChildQuestion { .. } => "update child question",
            Command::RemoveChildQuestion { .. } => "remove child question",
            Command::Drag(_) => "move question",
            Command::Undo => "undo",
            Command::Redo => "redo",
        }
    }
}

/// Command execution result
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The paper was replaced by a new revision
    Applied { revision: u64 },
    /// Nothing to do, e.g. a drag without a destination
    Unchanged,
    /// The editing mode switched; the paper is untouched
    ModeChanged(EditMode),
    /// A type change was refused; the paper is untouched
    Rejected(TypeRejection),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }

    pub fn rejection(&self) -> Option<&TypeRejection> {
        match self {
            Outcome::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_json() {
        let command: Command = serde_json::from_value(json!({
            "op": "update_question",
            "section": 0,
            "question": 1,
            "update": { "field": "type", "value": "nested" }
        }))
        .unwrap();

        assert_eq!(
            command,
            Command::UpdateQuestion {
                section: 0,
                question: 1,
                update: QuestionField::Type(QuestionType::Nested),
            }
        );
        assert_eq!(command.label(), "update question");
    }

    #[test]
    fn test_unit_and_struct_fields() {
        let command: Command = serde_json::from_value(json!({ "op": "add_section" })).unwrap();
        assert_eq!(command, Command::AddSection);

        let update: QuestionField = serde_json::from_value(json!({
            "field": "add_option",
            "value": { "text": "Newton", "is_correct": true }
        }))
        .unwrap();
        assert_eq!(update.name(), "add option");

        let marks: QuestionField =
            serde_json::from_value(json!({ "field": "marks", "value": null })).unwrap();
        assert_eq!(marks, QuestionField::Marks(Marks::NotANumber));
        assert_eq!(
            QuestionField::marks_from_input("7"),
            QuestionField::Marks(Marks::Value(7))
        );
    }

    #[test]
    fn test_unknown_field_is_a_parse_error() {
        let parsed: Result<QuestionField, _> =
            serde_json::from_value(json!({ "field": "colour", "value": "red" }));
        assert!(parsed.is_err());
    }
}
