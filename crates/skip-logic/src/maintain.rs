use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::spec::{
    AnswerOption, ConditionKind, CountCondition, QuestionItem, SkipLogicDestination, SurveyItem,
    TargetType,
};

/// A question or section a rule may jump to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DestinationTarget {
    pub target_type: TargetType,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Options a specific-option condition may reference.
pub fn allowed_options(question: &QuestionItem) -> &[AnswerOption] {
    &question.answers
}

/// Counts a selected-count condition may compare against.
///
/// With `N` options: `greater` allows `0..=N-1`, `less` allows `1..=N`, every
/// other comparison (or none yet) allows `0..=N`.
pub fn allowed_counts(
    question: &QuestionItem,
    count_condition: Option<CountCondition>,
) -> Vec<u32> {
    match count_bounds(option_count(question), count_condition) {
        Some((low, high)) => (low..=high).collect(),
        None => Vec::new(),
    }
}

/// Destinations available to rules owned by `question_id`, in survey order.
pub fn allowed_destinations(survey: &SurveyItem, question_id: &str) -> Vec<DestinationTarget> {
    match survey.target_type() {
        TargetType::Question => survey
            .questions()
            .skip_while(|question| question.id != question_id)
            .skip(1)
            .map(|question| DestinationTarget {
                target_type: TargetType::Question,
                id: question.id.clone(),
                title: Some(question.title.clone()).filter(|title| !title.is_empty()),
            })
            .collect(),
        TargetType::Section => {
            let Some(owner) = survey.section_index_of(question_id) else {
                return Vec::new();
            };
            survey.sections[owner + 1..]
                .iter()
                .map(|section| DestinationTarget {
                    target_type: TargetType::Section,
                    id: section.id.clone(),
                    title: section.title.clone(),
                })
                .collect()
        }
    }
}

/// Clears every stale reference in every rule of the survey.
///
/// Only ever clears fields, so running it again on its own output is a no-op.
pub fn maintain_survey(survey: &mut SurveyItem) {
    let target_type = survey.target_type();
    let allowed: Vec<BTreeSet<String>> = survey
        .questions()
        .map(|question| {
            allowed_destinations(survey, &question.id)
                .into_iter()
                .map(|target| target.id)
                .collect()
        })
        .collect();

    for (question, allowed) in survey.questions_mut().zip(&allowed) {
        maintain_question(question, target_type, allowed);
    }
}

fn maintain_question(
    question: &mut QuestionItem,
    target_type: TargetType,
    allowed_targets: &BTreeSet<String>,
) {
    let count = option_count(question);
    let QuestionItem {
        id: question_id,
        answers,
        skip_logic,
        ..
    } = question;
    let question_id = question_id.as_str();
    let Some(skip_logic) = skip_logic.as_mut() else {
        return;
    };

    for rule in &mut skip_logic.rules {
        if maintain_destination(&mut rule.destination, target_type, allowed_targets) {
            debug!(%question_id, rule_id = %rule.id, "cleared stale skip-logic destination");
        }

        for condition in &mut rule.conditions {
            match &mut condition.kind {
                ConditionKind::SpecificOption { option_id, .. } => {
                    if let Some(id) = option_id.as_deref()
                        && !answers.iter().any(|option| option.id == id)
                    {
                        debug!(
                            %question_id,
                            condition_id = %condition.id,
                            option_id = id,
                            "cleared removed option from skip-logic condition"
                        );
                        *option_id = None;
                    }
                }
                ConditionKind::SelectedCount {
                    count_condition,
                    count: selected,
                } => {
                    if let Some(value) = *selected
                        && !count_in_bounds(value, count, *count_condition)
                    {
                        debug!(
                            %question_id,
                            condition_id = %condition.id,
                            count = value,
                            "cleared out-of-range count from skip-logic condition"
                        );
                        *selected = None;
                    }
                }
                ConditionKind::Empty => {}
            }
        }
    }
}

/// Returns true when a target id was cleared.
fn maintain_destination(
    destination: &mut SkipLogicDestination,
    target_type: TargetType,
    allowed_targets: &BTreeSet<String>,
) -> bool {
    if destination.target_type != Some(target_type) {
        destination.target_type = Some(target_type);
        return destination.target_id.take().is_some();
    }
    if let Some(target_id) = &destination.target_id
        && !allowed_targets.contains(target_id)
    {
        destination.target_id = None;
        return true;
    }
    false
}

fn option_count(question: &QuestionItem) -> u32 {
    u32::try_from(question.answers.len()).unwrap_or(u32::MAX)
}

fn count_bounds(option_count: u32, count_condition: Option<CountCondition>) -> Option<(u32, u32)> {
    match count_condition {
        Some(CountCondition::Greater) => option_count.checked_sub(1).map(|high| (0, high)),
        Some(CountCondition::Less) => (option_count >= 1).then_some((1, option_count)),
        _ => Some((0, option_count)),
    }
}

fn count_in_bounds(value: u32, option_count: u32, count_condition: Option<CountCondition>) -> bool {
    count_bounds(option_count, count_condition)
        .is_some_and(|(low, high)| (low..=high).contains(&value))
}
