//! Editing State Manager
//!
//! [`PaperEditor`] owns the question paper and applies [`Command`]s to it.
//! Each applied command builds a new tree: the current `Arc<QuestionPaper>`
//! is cloned shallowly, only the sections and questions on the edited path
//! are copied, and the result replaces the current revision. Snapshots
//! handed out earlier never change.

use std::sync::Arc;

use paper_editor_core::{EditMode, EditorSettings, Event, EventBus};
use tracing::{debug, info, warn};

use crate::commands::{Command, Outcome, QuestionField};
use crate::drag::{apply_drag, DragResult};
use crate::error::{check_index, EditError, EditResult};
use crate::history::History;
use crate::model::{
    ChildQuestion, Question, QuestionLike, QuestionOption, QuestionPaper, QuestionType, Rubric,
    Section,
};
use crate::policy::{TypeCheck, TypePolicy, TypeRejection};

/// What a mutation did to the working copy
enum Change {
    Changed,
    Unchanged,
    Rejected(TypeRejection),
}

/// Question paper editing state
pub struct PaperEditor {
    paper: Arc<QuestionPaper>,
    mode: EditMode,
    settings: EditorSettings,
    history: History,
    revision: u64,
    events: Option<Arc<EventBus>>,
}

impl PaperEditor {
    /// Editor holding one empty section named after the configured prefix
    pub fn new(settings: EditorSettings) -> Self {
        let mut editor = Self::empty(settings);
        let first = Section::new(editor.section_name(0));
        Arc::make_mut(&mut editor.paper)
            .sections
            .push(Arc::new(first));
        editor
    }

    /// Editor without any section
    pub fn empty(settings: EditorSettings) -> Self {
        Self {
            paper: Arc::new(QuestionPaper::default()),
            mode: settings.default_mode,
            history: History::new(settings.max_undo_history),
            settings,
            revision: 0,
            events: None,
        }
    }

    /// Editor over an existing paper, e.g. one produced elsewhere
    pub fn with_paper(settings: EditorSettings, paper: QuestionPaper) -> Self {
        let mut editor = Self::empty(settings);
        editor.paper = Arc::new(paper);
        editor
    }

    /// Publish change notifications on the given bus
    pub fn with_events(mut self, events: Arc<EventBus>) -> Self {
        self.events = Some(events);
        self
    }

    /// Current paper
    pub fn paper(&self) -> &QuestionPaper {
        &self.paper
    }

    /// Shared handle to the current revision
    pub fn snapshot(&self) -> Arc<QuestionPaper> {
        Arc::clone(&self.paper)
    }

    /// Number of edits applied so far, including undo/redo steps
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn policy(&self) -> TypePolicy {
        TypePolicy::for_mode(self.mode)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Execute a command
    pub fn apply(&mut self, command: Command) -> EditResult<Outcome> {
        match command {
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::SetMode { mode } => Ok(self.set_mode(mode)),
            command => self.edit(command),
        }
    }

    pub fn set_mode(&mut self, mode: EditMode) -> Outcome {
        if self.mode != mode {
            info!("Editing mode {} -> {}", self.mode, mode);
            self.mode = mode;
            self.emit(Event::ModeChanged(mode));
        }
        Outcome::ModeChanged(mode)
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> EditResult<Outcome> {
        self.apply(Command::SetTitle {
            title: title.into(),
        })
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> EditResult<Outcome> {
        self.apply(Command::SetDescription {
            description: description.into(),
        })
    }

    pub fn add_section(&mut self) -> EditResult<Outcome> {
        self.apply(Command::AddSection)
    }

    pub fn remove_section(&mut self, section: usize) -> EditResult<Outcome> {
        self.apply(Command::RemoveSection { section })
    }

    pub fn update_section_name(
        &mut self,
        section: usize,
        name: impl Into<String>,
    ) -> EditResult<Outcome> {
        self.apply(Command::SetSectionName {
            section,
            name: name.into(),
        })
    }

    pub fn update_section_instructions(
        &mut self,
        section: usize,
        instructions: impl Into<String>,
    ) -> EditResult<Outcome> {
        self.apply(Command::SetSectionInstructions {
            section,
            instructions: instructions.into(),
        })
    }

    pub fn add_question(&mut self, section: usize) -> EditResult<Outcome> {
        self.apply(Command::AddQuestion { section })
    }

    pub fn update_question(
        &mut self,
        section: usize,
        question: usize,
        update: QuestionField,
    ) -> EditResult<Outcome> {
        self.apply(Command::UpdateQuestion {
            section,
            question,
            update,
        })
    }

    pub fn remove_question(&mut self, section: usize, question: usize) -> EditResult<Outcome> {
        self.apply(Command::RemoveQuestion { section, question })
    }

    pub fn add_child_question(&mut self, section: usize, question: usize) -> EditResult<Outcome> {
        self.apply(Command::AddChildQuestion { section, question })
    }

    pub fn update_child_question(
        &mut self,
        section: usize,
        question: usize,
        child: usize,
        update: QuestionField,
    ) -> EditResult<Outcome> {
        self.apply(Command::UpdateChildQuestion {
            section,
            question,
            child,
            update,
        })
    }

    pub fn remove_child_question(
        &mut self,
        section: usize,
        question: usize,
        child: usize,
    ) -> EditResult<Outcome> {
        self.apply(Command::RemoveChildQuestion {
            section,
            question,
            child,
        })
    }

    /// Apply a finished drag gesture
    pub fn drag_end(&mut self, drag: DragResult) -> EditResult<Outcome> {
        self.apply(Command::Drag(drag))
    }

    pub fn undo(&mut self) -> EditResult<Outcome> {
        let previous = self
            .history
            .undo(Arc::clone(&self.paper))
            .ok_or(EditError::NothingToUndo)?;
        debug!("Undo {} (recorded {})", previous.label, previous.recorded_at);
        Ok(self.replace(previous.paper))
    }

    pub fn redo(&mut self) -> EditResult<Outcome> {
        let next = self
            .history
            .redo(Arc::clone(&self.paper))
            .ok_or(EditError::NothingToRedo)?;
        debug!("Redo {} (recorded {})", next.label, next.recorded_at);
        Ok(self.replace(next.paper))
    }

    fn edit(&mut self, command: Command) -> EditResult<Outcome> {
        let label = command.label();
        let mut next = QuestionPaper::clone(&self.paper);

        match self.mutate(&mut next, command) {
            Ok(Change::Changed) => {
                self.history.record(Arc::clone(&self.paper), label);
                Ok(self.replace(Arc::new(next)))
            }
            Ok(Change::Unchanged) => Ok(Outcome::Unchanged),
            Ok(Change::Rejected(rejection)) => {
                debug!("Rejected {}: {}", label, rejection);
                self.emit(Event::TypeChangeRejected {
                    requested: rejection.requested.to_string(),
                    mode: rejection.mode,
                    reason: rejection.to_string(),
                });
                Ok(Outcome::Rejected(rejection))
            }
            Err(err) => {
                warn!("Failed to {}: {}", label, err);
                self.emit(Event::Error {
                    message: err.to_string(),
                    details: Some(label.to_string()),
                });
                Err(err)
            }
        }
    }

    fn replace(&mut self, paper: Arc<QuestionPaper>) -> Outcome {
        self.paper = paper;
        self.revision += 1;
        self.emit(Event::PaperChanged {
            revision: self.revision,
        });
        Outcome::Applied {
            revision: self.revision,
        }
    }

    fn mutate(&self, paper: &mut QuestionPaper, command: Command) -> EditResult<Change> {
        match command {
            Command::SetTitle { title } => paper.title = title,
            Command::SetDescription { description } => paper.description = description,

            Command::AddSection => {
                let name = self.section_name(paper.sections.len());
                paper.sections.push(Arc::new(Section::new(name)));
            }
            Command::RemoveSection { section } => {
                let index = check_index(section, paper.sections.len(), EditError::section)?;
                let removed = paper.sections.remove(index);
                debug!("Removed section {} ({})", removed.name, removed.id);
            }
            Command::SetSectionName { section, name } => {
                section_mut(paper, section)?.name = name;
            }
            Command::SetSectionInstructions {
                section,
                instructions,
            } => {
                section_mut(paper, section)?.instructions = instructions;
            }

            Command::AddQuestion { section } => {
                let question = Question::new(&self.settings);
                section_mut(paper, section)?
                    .questions
                    .push(Arc::new(question));
            }
            Command::UpdateQuestion {
                section,
                question,
                update,
            } => {
                let target = question_mut(paper, section, question)?;
                return self.update_question_fields(target, update);
            }
            Command::RemoveQuestion { section, question } => {
                let questions = &mut section_mut(paper, section)?.questions;
                let index = check_index(question, questions.len(), EditError::question)?;
                questions.remove(index);
            }

            Command::AddChildQuestion { section, question } => {
                let child = ChildQuestion::new(&self.settings);
                question_mut(paper, section, question)?
                    .children
                    .get_or_insert_with(Vec::new)
                    .push(child);
            }
            Command::UpdateChildQuestion {
                section,
                question,
                child,
                update,
            } => {
                let children = children_mut(paper, section, question)?;
                let index = check_index(child, children.len(), EditError::child)?;
                return self.update_child_fields(&mut children[index], update);
            }
            Command::RemoveChildQuestion {
                section,
                question,
                child,
            } => {
                let children = children_mut(paper, section, question)?;
                let index = check_index(child, children.len(), EditError::child)?;
                children.remove(index);
            }

            Command::Drag(drag) => {
                if !apply_drag(paper, &drag)? {
                    return Ok(Change::Unchanged);
                }
            }

            Command::SetMode { .. } | Command::Undo | Command::Redo => {
                return Ok(Change::Unchanged);
            }
        }
        Ok(Change::Changed)
    }

    fn update_question_fields(
        &self,
        question: &mut Question,
        update: QuestionField,
    ) -> EditResult<Change> {
        if let QuestionField::Type(requested) = update {
            if let TypeCheck::Rejected(rejection) = self.policy().check_question(&requested) {
                return Ok(Change::Rejected(rejection));
            }
            if requested == QuestionType::Nested && self.mode.restricts_types() {
                let children = question.children.get_or_insert_with(Vec::new);
                for child in children.iter_mut() {
                    child.body.question_type = TypePolicy::coerce_child(&child.body.question_type);
                }
            }
            question.body.question_type = requested;
            return Ok(Change::Changed);
        }
        apply_field(question, update)?;
        Ok(Change::Changed)
    }

    fn update_child_fields(
        &self,
        child: &mut ChildQuestion,
        update: QuestionField,
    ) -> EditResult<Change> {
        if let QuestionField::Type(requested) = &update {
            if let TypeCheck::Rejected(rejection) = self.policy().check_child(requested) {
                return Ok(Change::Rejected(rejection));
            }
        }
        apply_field(child, update)?;
        Ok(Change::Changed)
    }

    /// Default name of the section at `position`, numbered from one
    fn section_name(&self, position: usize) -> String {
        format!("{} {}", self.settings.section_name_prefix, position + 1)
    }

    fn emit(&self, event: Event) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }
}

impl Default for PaperEditor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

fn section_mut(paper: &mut QuestionPaper, section: usize) -> EditResult<&mut Section> {
    let index = check_index(section, paper.sections.len(), EditError::section)?;
    Ok(Arc::make_mut(&mut paper.sections[index]))
}

fn question_mut(
    paper: &mut QuestionPaper,
    section: usize,
    question: usize,
) -> EditResult<&mut Question> {
    let questions = &mut section_mut(paper, section)?.questions;
    let index = check_index(question, questions.len(), EditError::question)?;
    Ok(Arc::make_mut(&mut questions[index]))
}

fn children_mut(
    paper: &mut QuestionPaper,
    section: usize,
    question: usize,
) -> EditResult<&mut Vec<ChildQuestion>> {
    question_mut(paper, section, question)?
        .children
        .as_mut()
        .ok_or(EditError::NoChildQuestions)
}

/// Apply a non-type field update to a question or child question
fn apply_field<Q: QuestionLike>(target: &mut Q, update: QuestionField) -> EditResult<()> {
    if let QuestionField::Difficulty(label) = update {
        target.set_difficulty(label);
        return Ok(());
    }

    let body = target.body_mut();
    match update {
        QuestionField::Prompt(text) => body.prompt = text,
        QuestionField::Type(question_type) => body.question_type = question_type,
        QuestionField::Marks(marks) => body.marks = marks,
        QuestionField::Answer(text) => body.answer = text,
        QuestionField::Difficulty(_) => {}

        QuestionField::AddOption { text, is_correct } => {
            body.options.push(QuestionOption::new(text, is_correct));
        }
        QuestionField::SetOptionText { index, text } => {
            let index = check_index(index, body.options.len(), EditError::option)?;
            body.options[index].text = text;
        }
        QuestionField::SetOptionCorrect { index, is_correct } => {
            let index = check_index(index, body.options.len(), EditError::option)?;
            body.options[index].is_correct = is_correct;
        }
        QuestionField::RemoveOption { index } => {
            let index = check_index(index, body.options.len(), EditError::option)?;
            body.options.remove(index);
        }

        QuestionField::AddRubric { criteria, weight } => {
            body.rubrics.push(Rubric::new(criteria, weight));
        }
        QuestionField::SetRubricCriteria { index, criteria } => {
            let index = check_index(index, body.rubrics.len(), EditError::rubric)?;
            body.rubrics[index].criteria = criteria;
        }
        QuestionField::SetRubricWeight { index, weight } => {
            let index = check_index(index, body.rubrics.len(), EditError::rubric)?;
            body.rubrics[index].weight = weight;
        }
        QuestionField::RemoveRubric { index } => {
            let index = check_index(index, body.rubrics.len(), EditError::rubric)?;
            body.rubrics.remove(index);
        }
    }
    Ok(())
}
