use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::skip_logic::{QuestionItemSkipLogic, TargetType};

/// Supported question types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Single,
    Multiple,
    Slider,
    Dropdown,
    Image,
    Rank,
    OpenEnded,
    DateTime,
}

/// How many options a respondent may pick for a question type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Multiple,
}

impl QuestionType {
    /// Selection mode for choice questions; `None` for types that cannot own skip logic.
    pub fn selection_mode(self) -> Option<SelectionMode> {
        match self {
            QuestionType::Single | QuestionType::Dropdown => Some(SelectionMode::Single),
            QuestionType::Multiple | QuestionType::Image => Some(SelectionMode::Multiple),
            QuestionType::Slider
            | QuestionType::Rank
            | QuestionType::OpenEnded
            | QuestionType::DateTime => None,
        }
    }

    pub fn supports_skip_logic(self) -> bool {
        self.selection_mode().is_some()
    }
}

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerOption {
    pub id: String,
    pub value: String,
}

/// Definition of a single survey question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_logic: Option<QuestionItemSkipLogic>,
}

impl QuestionItem {
    pub fn new(id: impl Into<String>, kind: QuestionType) -> Self {
        Self {
            id: id.into(),
            kind,
            title: String::new(),
            answers: Vec::new(),
            skip_logic: None,
        }
    }

    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.answers.iter().find(|option| option.id == option_id)
    }

    pub fn option_by_value(&self, value: &str) -> Option<&AnswerOption> {
        self.answers.iter().find(|option| option.value == value)
    }

    /// True when the question owns at least one rule.
    pub fn has_skip_logic(&self) -> bool {
        self.skip_logic
            .as_ref()
            .is_some_and(|skip_logic| !skip_logic.rules.is_empty())
    }
}

/// Ordered group of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurveySection {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionItem>,
}

/// Top-level survey definition.
///
/// A survey with a single section has no real section boundary: that section is
/// virtual and skip logic targets questions. With two or more sections skip
/// logic targets sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurveyItem {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub sections: Vec<SurveySection>,
}

impl SurveyItem {
    pub fn uses_sections(&self) -> bool {
        self.sections.len() >= 2
    }

    /// Destination type every rule in this survey must use.
    pub fn target_type(&self) -> TargetType {
        if self.uses_sections() {
            TargetType::Section
        } else {
            TargetType::Question
        }
    }

    /// Questions in flattened survey order.
    pub fn questions(&self) -> impl Iterator<Item = &QuestionItem> {
        self.sections
            .iter()
            .flat_map(|section| section.questions.iter())
    }

    pub fn questions_mut(&mut self) -> impl Iterator<Item = &mut QuestionItem> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.questions.iter_mut())
    }

    pub fn question(&self, question_id: &str) -> Option<&QuestionItem> {
        self.questions().find(|question| question.id == question_id)
    }

    /// 1-based position of a question in flattened order.
    pub fn sequence_of(&self, question_id: &str) -> Option<usize> {
        self.questions()
            .position(|question| question.id == question_id)
            .map(|idx| idx + 1)
    }

    /// Index of the section that owns a question.
    pub fn section_index_of(&self, question_id: &str) -> Option<usize> {
        self.sections.iter().position(|section| {
            section
                .questions
                .iter()
                .any(|question| question.id == question_id)
        })
    }
}
