use crate::answers::{AnswerValue, QuestionAnswers};
use crate::spec::QuestionItem;

/// Capabilities the question-type widgets expose to the skip-logic core.
pub trait QuestionHandler {
    /// Whether the preview answer counts as an answer for this question.
    fn is_preview_question_answered(
        &self,
        question: &QuestionItem,
        answers: Option<&QuestionAnswers>,
    ) -> bool;

    /// Whether the question has no authored content yet.
    fn is_empty(&self, question: &QuestionItem) -> bool;
}

/// Default handler: choice questions need a selected option, every other type
/// needs a non-blank value.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultQuestionHandler;

impl QuestionHandler for DefaultQuestionHandler {
    fn is_preview_question_answered(
        &self,
        question: &QuestionItem,
        answers: Option<&QuestionAnswers>,
    ) -> bool {
        let Some(answers) = answers else {
            return false;
        };
        if question.kind.supports_skip_logic() {
            return answers.values().any(AnswerValue::is_selected);
        }
        answers.values().any(|value| match value {
            AnswerValue::Text(text) => !text.trim().is_empty(),
            AnswerValue::Number(_) | AnswerValue::Selected => true,
            AnswerValue::NotSelected => false,
        })
    }

    fn is_empty(&self, question: &QuestionItem) -> bool {
        question.title.trim().is_empty()
            && question
                .answers
                .iter()
                .all(|option| option.value.trim().is_empty())
    }
}
