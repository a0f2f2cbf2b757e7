use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::answers::{QuestionAnswers, SurveyAnswers};
use crate::config::EngineConfig;
use crate::evaluate::evaluate_with;
use crate::handler::QuestionHandler;
use crate::spec::{QuestionItem, SurveyItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    Section,
    Question,
}

/// A question annotated with the respondent's preview answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PreviewQuestion {
    pub question: QuestionItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_answer: Option<QuestionAnswers>,
    pub is_answered: bool,
}

/// One navigation unit of the survey walkthrough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PreviewScreen {
    pub id: String,
    pub kind: ScreenKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub questions: Vec<PreviewQuestion>,
    pub is_complete: bool,
}

pub fn build_preview(
    survey: &SurveyItem,
    answers: &SurveyAnswers,
    handler: &dyn QuestionHandler,
) -> Vec<PreviewScreen> {
    build_preview_with(survey, answers, handler, &EngineConfig::default())
}

/// Builds the ordered preview screens for the answers given so far.
///
/// Questions jumped over by a matching rule or reported empty by the handler
/// are removed, screens left without questions are removed, and a section
/// screen stops at its first unanswered question that owns skip logic.
pub fn build_preview_with(
    survey: &SurveyItem,
    answers: &SurveyAnswers,
    handler: &dyn QuestionHandler,
    config: &EngineConfig,
) -> Vec<PreviewScreen> {
    let mut screens = build_screens(survey, answers, handler);
    let skipped = skipped_questions(&screens, answers, handler, config);

    screens.retain_mut(|screen| {
        screen.questions.retain(|entry| {
            !skipped.contains(&entry.question.id) && !handler.is_empty(&entry.question)
        });
        !screen.questions.is_empty()
    });

    for screen in &mut screens {
        screen.is_complete = screen.questions.iter().all(|entry| entry.is_answered);
        if screen.kind == ScreenKind::Section
            && let Some(stop) = screen
                .questions
                .iter()
                .position(|entry| !entry.is_answered && entry.question.has_skip_logic())
        {
            screen.questions.truncate(stop + 1);
        }
    }

    screens
}

fn build_screens(
    survey: &SurveyItem,
    answers: &SurveyAnswers,
    handler: &dyn QuestionHandler,
) -> Vec<PreviewScreen> {
    let annotate = |question: &QuestionItem| {
        let preview_answer = answers.get(&question.id).cloned();
        PreviewQuestion {
            is_answered: handler.is_preview_question_answered(question, preview_answer.as_ref()),
            question: question.clone(),
            preview_answer,
        }
    };

    if survey.uses_sections() {
        survey
            .sections
            .iter()
            .map(|section| PreviewScreen {
                id: section.id.clone(),
                kind: ScreenKind::Section,
                title: section.title.clone(),
                questions: section.questions.iter().map(&annotate).collect(),
                is_complete: false,
            })
            .collect()
    } else {
        survey
            .questions()
            .map(|question| PreviewScreen {
                id: question.id.clone(),
                kind: ScreenKind::Question,
                title: Some(question.title.clone()).filter(|title| !title.is_empty()),
                questions: vec![annotate(question)],
                is_complete: false,
            })
            .collect()
    }
}

/// Walks the screens in order and collects the ids of questions a matching
/// rule jumps over. Empty questions still end a jump that targets them but
/// never start one.
fn skipped_questions(
    screens: &[PreviewScreen],
    answers: &SurveyAnswers,
    handler: &dyn QuestionHandler,
    config: &EngineConfig,
) -> BTreeSet<String> {
    let unanswered = QuestionAnswers::new();
    let mut skipped = BTreeSet::new();
    let mut skip_until: Option<&str> = None;

    for screen in screens {
        if skip_until == Some(screen.id.as_str()) {
            skip_until = None;
        }
        for entry in &screen.questions {
            let question = &entry.question;
            if skip_until == Some(question.id.as_str()) {
                skip_until = None;
            }
            if skip_until.is_some() {
                skipped.insert(question.id.clone());
                continue;
            }
            if handler.is_empty(question) {
                continue;
            }

            let question_answers = answers.get(&question.id).unwrap_or(&unanswered);
            if let Some(target_id) = evaluate_with(question, question_answers, config)
                .and_then(|destination| destination.target_id.as_deref())
            {
                skip_until = Some(target_id);
            }
        }
    }

    skipped
}
