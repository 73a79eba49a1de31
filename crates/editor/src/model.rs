//! Question Paper Model
//!
//! The tree edited by [`PaperEditor`](crate::PaperEditor): a paper holds
//! sections, sections hold questions, and nested questions hold one level of
//! child questions. Sections and questions sit behind `Arc` so successive
//! revisions share every subtree an edit did not touch.

use std::fmt;
use std::sync::Arc;

use paper_editor_core::{EditorSettings, ElementId};
use serde::{Deserialize, Serialize};

/// Question type tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionType {
    Subjective,
    SingleCorrect,
    MultipleCorrect,
    Nested,
    /// Any other tag; only reachable when the type whitelist is off
    Other(String),
}

impl QuestionType {
    /// Wire tag of the type
    pub fn as_str(&self) -> &str {
        match self {
            QuestionType::Subjective => "subjective",
            QuestionType::SingleCorrect => "single-correct",
            QuestionType::MultipleCorrect => "multiple-correct",
            QuestionType::Nested => "nested",
            QuestionType::Other(tag) => tag,
        }
    }

    /// Get the display name for the type
    pub fn display_name(&self) -> &str {
        match self {
            QuestionType::Subjective => "Subjective",
            QuestionType::SingleCorrect => "Single Correct",
            QuestionType::MultipleCorrect => "Multiple Correct",
            QuestionType::Nested => "Nested",
            QuestionType::Other(tag) => tag,
        }
    }

    /// Whether the type uses answer options
    pub fn is_objective(&self) -> bool {
        matches!(
            self,
            QuestionType::SingleCorrect | QuestionType::MultipleCorrect
        )
    }
}

impl From<String> for QuestionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "subjective" => QuestionType::Subjective,
            "single-correct" => QuestionType::SingleCorrect,
            "multiple-correct" => QuestionType::MultipleCorrect,
            "nested" => QuestionType::Nested,
            _ => QuestionType::Other(value),
        }
    }
}

impl From<&str> for QuestionType {
    fn from(value: &str) -> Self {
        QuestionType::from(value.to_string())
    }
}

impl From<QuestionType> for String {
    fn from(value: QuestionType) -> Self {
        match value {
            QuestionType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marks awarded for a question
///
/// Marks come from a numeric text input. Input without a leading integer is
/// kept as `NotANumber` rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<i64>")]
pub enum Marks {
    Value(i64),
    NotANumber,
}

impl Marks {
    /// Parse text input: optional whitespace and sign, then leading digits;
    /// anything after the digits is ignored.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Marks::NotANumber;
        }

        let value = rest[..digits].bytes().fold(0i64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(digit - b'0'))
        });
        Marks::Value(if negative { -value } else { value })
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            Marks::Value(value) => Some(*value),
            Marks::NotANumber => None,
        }
    }
}

impl From<Option<i64>> for Marks {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Marks::NotANumber, Marks::Value)
    }
}

impl From<Marks> for Option<i64> {
    fn from(value: Marks) -> Self {
        value.value()
    }
}

impl fmt::Display for Marks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marks::Value(value) => write!(f, "{}", value),
            Marks::NotANumber => f.write_str("NaN"),
        }
    }
}

/// Answer option of an objective question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: ElementId,
    pub text: String,
    pub is_correct: bool,
}

impl QuestionOption {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            id: ElementId::random(),
            text: text.into(),
            is_correct,
        }
    }
}

/// Marking rubric entry of a subjective question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    pub id: ElementId,
    pub criteria: String,
    pub weight: f64,
}

impl Rubric {
    pub fn new(criteria: impl Into<String>, weight: f64) -> Self {
        Self {
            id: ElementId::random(),
            criteria: criteria.into(),
            weight,
        }
    }
}

/// Fields shared by questions and child questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBody {
    pub id: ElementId,
    #[serde(rename = "question")]
    pub prompt: String,
    pub question_type: QuestionType,
    pub marks: Marks,
    pub answer: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub rubrics: Vec<Rubric>,
}

impl QuestionBody {
    fn new(marks: i64) -> Self {
        Self {
            id: ElementId::random(),
            prompt: String::new(),
            question_type: QuestionType::Subjective,
            marks: Marks::Value(marks),
            answer: String::new(),
            options: Vec::new(),
            rubrics: Vec::new(),
        }
    }
}

/// Common access to question and child question fields
pub trait QuestionLike {
    fn body(&self) -> &QuestionBody;
    fn body_mut(&mut self) -> &mut QuestionBody;
    fn difficulty(&self) -> Option<&str>;
    fn set_difficulty(&mut self, label: String);

    fn id(&self) -> &ElementId {
        &self.body().id
    }

    fn question_type(&self) -> &QuestionType {
        &self.body().question_type
    }
}

/// Top-level question of a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(flatten)]
    pub body: QuestionBody,
    pub difficulty: String,
    /// Child questions; `None` until a child list is first needed
    #[serde(
        rename = "childQuestions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub children: Option<Vec<ChildQuestion>>,
}

impl Question {
    /// New subjective question with the configured defaults
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            body: QuestionBody::new(settings.default_marks),
            difficulty: settings.default_difficulty.clone(),
            children: Some(Vec::new()),
        }
    }

    /// Child questions currently held, empty when the list is absent
    pub fn children(&self) -> &[ChildQuestion] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Children only count when the question is nested
    pub fn active_children(&self) -> &[ChildQuestion] {
        if self.body.question_type == QuestionType::Nested {
            self.children()
        } else {
            &[]
        }
    }
}

impl QuestionLike for Question {
    fn body(&self) -> &QuestionBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut QuestionBody {
        &mut self.body
    }

    fn difficulty(&self) -> Option<&str> {
        Some(&self.difficulty)
    }

    fn set_difficulty(&mut self, label: String) {
        self.difficulty = label;
    }
}

/// Question inside a nested question; cannot nest further
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildQuestion {
    #[serde(flatten)]
    pub body: QuestionBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl ChildQuestion {
    /// New subjective child; children start without a difficulty label
    pub fn new(settings: &EditorSettings) -> Self {
        Self {
            body: QuestionBody::new(settings.default_marks),
            difficulty: None,
        }
    }
}

impl QuestionLike for ChildQuestion {
    fn body(&self) -> &QuestionBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut QuestionBody {
        &mut self.body
    }

    fn difficulty(&self) -> Option<&str> {
        self.difficulty.as_deref()
    }

    fn set_difficulty(&mut self, label: String) {
        self.difficulty = Some(label);
    }
}

/// Named group of questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: ElementId,
    pub name: String,
    pub instructions: String,
    pub questions: Vec<Arc<Question>>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ElementId::random(),
            name: name.into(),
            instructions: String::new(),
            questions: Vec::new(),
        }
    }

    /// Sum of numeric marks, counting active children of nested questions
    pub fn total_marks(&self) -> i64 {
        self.questions
            .iter()
            .map(|q| question_marks(q))
            .fold(0, i64::saturating_add)
    }
}

fn question_marks(question: &Question) -> i64 {
    if question.body.question_type == QuestionType::Nested {
        question
            .active_children()
            .iter()
            .filter_map(|child| child.body.marks.value())
            .fold(0, i64::saturating_add)
    } else {
        question.body.marks.value().unwrap_or(0)
    }
}

/// The paper being authored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionPaper {
    pub title: String,
    pub description: String,
    pub sections: Vec<Arc<Section>>,
}

impl QuestionPaper {
    /// Position of the section with the given id
    pub fn section_index(&self, id: &ElementId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index).map(Arc::as_ref)
    }

    pub fn question(&self, section: usize, question: usize) -> Option<&Question> {
        self.section(section)?
            .questions
            .get(question)
            .map(Arc::as_ref)
    }

    /// Total number of top-level questions
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    pub fn total_marks(&self) -> i64 {
        self.sections
            .iter()
            .map(|s| s.total_marks())
            .fold(0, i64::saturating_add)
    }
}

impl fmt::Display for QuestionPaper {
    /// Plain text outline of the paper
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = if self.title.is_empty() {
            "(untitled)"
        } else {
            self.title.as_str()
        };
        writeln!(f, "{} [{} marks]", title, self.total_marks())?;
        if !self.description.is_empty() {
            writeln!(f, "  {}", self.description)?;
        }

        for section in &self.sections {
            writeln!(
                f,
                "{} ({} questions)",
                section.name,
                section.questions.len()
            )?;
            for (index, question) in section.questions.iter().enumerate() {
                writeln!(
                    f,
                    "  Q{}. [{}, {} marks, {}] {}",
                    index + 1,
                    question.body.question_type.display_name(),
                    question.body.marks,
                    question.difficulty,
                    question.body.prompt
                )?;
                for (child_index, child) in question.active_children().iter().enumerate() {
                    writeln!(
                        f,
                        "    {}.{} [{}, {} marks] {}",
                        index + 1,
                        child_index + 1,
                        child.body.question_type.display_name(),
                        child.body.marks,
                        child.body.prompt
                    )?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_tags() {
        assert_eq!(QuestionType::from("single-correct"), QuestionType::SingleCorrect);
        assert_eq!(
            QuestionType::from("essay"),
            QuestionType::Other("essay".to_string())
        );
        assert_eq!(String::from(QuestionType::MultipleCorrect), "multiple-correct");
        assert!(QuestionType::SingleCorrect.is_objective());
        assert!(!QuestionType::Nested.is_objective());
    }

    #[test]
    fn test_marks_parse() {
        assert_eq!(Marks::parse("5"), Marks::Value(5));
        assert_eq!(Marks::parse("  12abc"), Marks::Value(12));
        assert_eq!(Marks::parse("-3"), Marks::Value(-3));
        assert_eq!(Marks::parse("4.5"), Marks::Value(4));
        assert_eq!(Marks::parse(""), Marks::NotANumber);
        assert_eq!(Marks::parse("abc"), Marks::NotANumber);
        assert_eq!(Marks::parse("-"), Marks::NotANumber);
        assert_eq!(Marks::NotANumber.to_string(), "NaN");
    }

    #[test]
    fn test_new_question_defaults() {
        let settings = EditorSettings::default();
        let question = Question::new(&settings);
        assert_eq!(question.body.question_type, QuestionType::Subjective);
        assert_eq!(question.body.marks, Marks::Value(1));
        assert_eq!(question.difficulty, "Easy");
        assert_eq!(question.children, Some(Vec::new()));

        let child = ChildQuestion::new(&settings);
        assert_eq!(child.difficulty(), None);
        assert_eq!(child.body.marks, Marks::Value(1));
    }

    #[test]
    fn test_json_shape() {
        let settings = EditorSettings::default();
        let mut question = Question::new(&settings);
        question.body.prompt = "Define inertia".to_string();
        question.body.marks = Marks::NotANumber;

        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json["question"], "Define inertia");
        assert_eq!(json["questionType"], "subjective");
        assert!(json["marks"].is_null());
        assert_eq!(json["childQuestions"], serde_json::json!([]));

        let back: Question = serde_json::from_value(json).unwrap();
        assert_eq!(back, question);
    }

    #[test]
    fn test_total_marks_counts_active_children() {
        let settings = EditorSettings::default();
        let mut nested = Question::new(&settings);
        nested.body.question_type = QuestionType::Nested;
        nested.body.marks = Marks::Value(100);
        let mut child = ChildQuestion::new(&settings);
        child.body.marks = Marks::Value(3);
        nested.children = Some(vec![child.clone(), child]);

        let mut plain = Question::new(&settings);
        plain.body.marks = Marks::Value(2);
        plain.children = nested.children.clone();

        let mut section = Section::new("Section 1");
        section.questions = vec![Arc::new(nested), Arc::new(plain)];
        assert_eq!(section.total_marks(), 8);
    }

    #[test]
    fn test_total_marks_saturates() {
        let settings = EditorSettings::default();
        let mut huge = Question::new(&settings);
        huge.body.marks = Marks::parse("99999999999999999999");
        assert_eq!(huge.body.marks, Marks::Value(i64::MAX));

        let mut section = Section::new("Section 1");
        section.questions = vec![Arc::new(huge.clone()), Arc::new(huge)];
        assert_eq!(section.total_marks(), i64::MAX);

        let paper = QuestionPaper {
            sections: vec![Arc::new(section.clone()), Arc::new(section)],
            ..QuestionPaper::default()
        };
        assert_eq!(paper.total_marks(), i64::MAX);
        assert!(paper
            .to_string()
            .starts_with(&format!("(untitled) [{} marks]", i64::MAX)));
    }
}
