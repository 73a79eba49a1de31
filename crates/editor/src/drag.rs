//! Drag-and-drop moves
//!
//! A finished drag gesture names a source and an optional destination, each
//! a section id plus a position. The question at the source is removed and
//! then inserted at the destination index of the resulting sequence.

use std::sync::Arc;

use paper_editor_core::ElementId;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{check_index, EditError, EditResult};
use crate::model::QuestionPaper;

/// Position within a droppable section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    /// Id of the section the position refers to
    pub droppable_id: ElementId,
    pub index: usize,
}

impl DragLocation {
    pub fn new(droppable_id: impl Into<ElementId>, index: usize) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            index,
        }
    }
}

/// Completed drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragResult {
    /// Id of the dragged question, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draggable_id: Option<ElementId>,
    pub source: DragLocation,
    /// `None` when the gesture was dropped outside any section
    pub destination: Option<DragLocation>,
}

impl DragResult {
    pub fn new(source: DragLocation, destination: Option<DragLocation>) -> Self {
        Self {
            draggable_id: None,
            source,
            destination,
        }
    }

    /// Gesture that ended outside every drop target
    pub fn cancelled(source: DragLocation) -> Self {
        Self::new(source, None)
    }
}

/// Apply a drag gesture to `paper`, returning whether anything moved
///
/// A destination index past the end of the target sequence appends.
pub fn apply_drag(paper: &mut QuestionPaper, drag: &DragResult) -> EditResult<bool> {
    let Some(destination) = &drag.destination else {
        debug!("Drag cancelled, no destination");
        return Ok(false);
    };

    let source_index = paper
        .section_index(&drag.source.droppable_id)
        .ok_or_else(|| EditError::UnknownSection(drag.source.droppable_id.clone()))?;
    let destination_index = paper
        .section_index(&destination.droppable_id)
        .ok_or_else(|| EditError::UnknownSection(destination.droppable_id.clone()))?;

    let source_len = paper.sections[source_index].questions.len();
    let from = check_index(drag.source.index, source_len, EditError::question)?;

    if source_index == destination_index {
        let section = Arc::make_mut(&mut paper.sections[source_index]);
        let moved = section.questions.remove(from);
        let to = destination.index.min(section.questions.len());
        section.questions.insert(to, moved);
        debug!("Reordered question {} -> {} in section {}", from, to, section.id);
    } else {
        let moved = Arc::make_mut(&mut paper.sections[source_index])
            .questions
            .remove(from);
        let target = Arc::make_mut(&mut paper.sections[destination_index]);
        let to = destination.index.min(target.questions.len());
        target.questions.insert(to, moved);
        debug!(
            "Moved question {} of section {} to {} of section {}",
            from, drag.source.droppable_id, to, target.id
        );
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, Section};
    use paper_editor_core::EditorSettings;

    fn section(id: &str, prompts: &[&str]) -> Arc<Section> {
        let settings = EditorSettings::default();
        let mut section = Section::new(id);
        section.id = ElementId::new(id);
        section.questions = prompts
            .iter()
            .map(|prompt| {
                let mut question = Question::new(&settings);
                question.body.prompt = prompt.to_string();
                Arc::new(question)
            })
            .collect();
        Arc::new(section)
    }

    fn prompts(paper: &QuestionPaper, index: usize) -> Vec<String> {
        paper.sections[index]
            .questions
            .iter()
            .map(|q| q.body.prompt.clone())
            .collect()
    }

    fn moving(source: &str, from: usize, destination: &str, to: usize) -> DragResult {
        DragResult::new(
            DragLocation::new(source, from),
            Some(DragLocation::new(destination, to)),
        )
    }

    fn paper(sections: Vec<Arc<Section>>) -> QuestionPaper {
        QuestionPaper {
            sections,
            ..QuestionPaper::default()
        }
    }

    #[test]
    fn test_same_section_reorder() {
        let mut paper = paper(vec![section("s1", &["A", "B", "C"])]);
        let drag = moving("s1", 0, "s1", 2);

        assert!(apply_drag(&mut paper, &drag).unwrap());
        assert_eq!(prompts(&paper, 0), ["B", "C", "A"]);
    }

    #[test]
    fn test_move_up_within_section() {
        let mut paper = paper(vec![section("s1", &["A", "B", "C"])]);
        let drag = moving("s1", 2, "s1", 0);

        apply_drag(&mut paper, &drag).unwrap();
        assert_eq!(prompts(&paper, 0), ["C", "A", "B"]);
    }

    #[test]
    fn test_cross_section_move() {
        let mut paper = paper(vec![section("src", &["A", "B"]), section("dst", &["X"])]);
        let moved_id = paper.sections[0].questions[1].body.id.clone();
        let drag = moving("src", 1, "dst", 0);

        apply_drag(&mut paper, &drag).unwrap();
        assert_eq!(prompts(&paper, 0), ["A"]);
        assert_eq!(prompts(&paper, 1), ["B", "X"]);
        assert_eq!(paper.sections[1].questions[0].body.id, moved_id);
    }

    #[test]
    fn test_cancelled_drag_is_noop() {
        let mut paper = paper(vec![section("s1", &["A", "B"]), section("s2", &["X"])]);
        let before = paper.clone();

        let cancelled = DragResult::cancelled(DragLocation::new("s1", 0));
        assert!(!apply_drag(&mut paper, &cancelled).unwrap());
        assert_eq!(paper, before);
    }

    #[test]
    fn test_destination_past_end_appends() {
        let mut paper = paper(vec![section("s1", &["A"]), section("s2", &["X", "Y"])]);
        let drag = moving("s1", 0, "s2", 10);

        apply_drag(&mut paper, &drag).unwrap();
        assert!(prompts(&paper, 0).is_empty());
        assert_eq!(prompts(&paper, 1), ["X", "Y", "A"]);
    }

    #[test]
    fn test_unknown_section_and_bad_source() {
        let mut paper = paper(vec![section("s1", &["A"])]);

        let drag = moving("nope", 0, "s1", 0);
        assert_eq!(
            apply_drag(&mut paper, &drag),
            Err(EditError::UnknownSection(ElementId::new("nope")))
        );

        let drag = moving("s1", 3, "s1", 0);
        assert_eq!(
            apply_drag(&mut paper, &drag),
            Err(EditError::QuestionOutOfRange { index: 3, len: 1 })
        );
    }

    #[test]
    fn test_untouched_sections_stay_shared() {
        let mut paper = paper(vec![section("s1", &["A", "B"]), section("s2", &["X"])]);
        let before = paper.clone();
        let drag = moving("s1", 0, "s1", 1);

        apply_drag(&mut paper, &drag).unwrap();
        assert!(!Arc::ptr_eq(&before.sections[0], &paper.sections[0]));
        assert!(Arc::ptr_eq(&before.sections[1], &paper.sections[1]));
        assert_eq!(prompts(&before, 0), ["A", "B"]);
    }
}
