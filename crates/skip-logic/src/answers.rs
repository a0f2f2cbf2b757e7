use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// State recorded for one option (or free-form slot) of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    Selected,
    NotSelected,
    Text(String),
    Number(f64),
}

impl AnswerValue {
    pub fn is_selected(&self) -> bool {
        matches!(self, AnswerValue::Selected)
    }
}

/// In-progress answers of one question, keyed by option id.
pub type QuestionAnswers = BTreeMap<String, AnswerValue>;

/// In-progress answers of a whole survey, keyed by question id.
pub type SurveyAnswers = BTreeMap<String, QuestionAnswers>;

pub fn is_option_selected(answers: &QuestionAnswers, option_id: &str) -> bool {
    answers.get(option_id).is_some_and(AnswerValue::is_selected)
}

pub fn selected_count(answers: &QuestionAnswers) -> u32 {
    let count = answers.values().filter(|value| value.is_selected()).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}
