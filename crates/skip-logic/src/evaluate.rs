use tracing::warn;

use crate::answers::{QuestionAnswers, is_option_selected, selected_count};
use crate::config::EngineConfig;
use crate::error::ReductionError;
use crate::spec::{
    Clause, ConditionKind, OptionCondition, QuestionItem, SkipLogicCondition,
    SkipLogicDestination, SkipLogicRule,
};

/// Returns the destination of the matching rule, if any.
///
/// Rules are checked from the last authored to the first and the first match
/// wins. A rule whose reduction fails counts as not matching.
pub fn evaluate<'q>(
    question: &'q QuestionItem,
    answers: &QuestionAnswers,
) -> Option<&'q SkipLogicDestination> {
    evaluate_with(question, answers, &EngineConfig::default())
}

pub fn evaluate_with<'q>(
    question: &'q QuestionItem,
    answers: &QuestionAnswers,
    config: &EngineConfig,
) -> Option<&'q SkipLogicDestination> {
    let skip_logic = question.skip_logic.as_ref()?;
    for rule in skip_logic.rules.iter().rev() {
        match rule_matches(rule, answers, config.max_reduction_iterations) {
            Ok(true) => return Some(&rule.destination),
            Ok(false) => {}
            Err(error) => warn!(
                %error,
                question_id = %question.id,
                rule_id = %rule.id,
                "aborting skip-logic rule evaluation"
            ),
        }
    }
    None
}

/// Truth of a single condition against a question's answers. Incomplete
/// conditions never hold.
pub fn condition_holds(condition: &SkipLogicCondition, answers: &QuestionAnswers) -> bool {
    match &condition.kind {
        ConditionKind::SpecificOption {
            option_id: Some(option_id),
            option_condition: Some(option_condition),
        } => {
            let selected = is_option_selected(answers, option_id);
            match option_condition {
                OptionCondition::Selected => selected,
                OptionCondition::NotSelected => !selected,
            }
        }
        ConditionKind::SelectedCount {
            count_condition: Some(count_condition),
            count: Some(count),
        } => count_condition.holds(selected_count(answers), *count),
        _ => false,
    }
}

pub fn rule_matches(
    rule: &SkipLogicRule,
    answers: &QuestionAnswers,
    max_iterations: usize,
) -> Result<bool, ReductionError> {
    let mut sequence = Vec::with_capacity(rule.conditions.len() * 2);
    for (idx, condition) in rule.conditions.iter().enumerate() {
        if idx > 0 {
            sequence.push(Item::Clause(rule.conditions[idx - 1].clause));
        }
        sequence.push(Item::Value(condition_holds(condition, answers)));
    }
    reduce(sequence, max_iterations)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Value(bool),
    Clause(Clause),
}

fn reduce(mut sequence: Vec<Item>, max_iterations: usize) -> Result<bool, ReductionError> {
    collapse(&mut sequence, Clause::And, max_iterations)?;
    collapse(&mut sequence, Clause::Or, max_iterations)?;
    match sequence.as_slice() {
        [Item::Value(value)] => Ok(*value),
        other => Err(ReductionError::NotSingle(other.len())),
    }
}

/// Replaces every `value clause value` triple for one clause, left to right.
fn collapse(
    sequence: &mut Vec<Item>,
    clause: Clause,
    max_iterations: usize,
) -> Result<(), ReductionError> {
    let mut iterations = 0;
    while let Some(position) = sequence
        .iter()
        .position(|item| *item == Item::Clause(clause))
    {
        if iterations >= max_iterations {
            return Err(ReductionError::IterationCapExceeded {
                limit: max_iterations,
            });
        }
        iterations += 1;

        let left = position.checked_sub(1).and_then(|idx| sequence.get(idx));
        let right = sequence.get(position + 1);
        let (Some(Item::Value(left)), Some(Item::Value(right))) = (left, right) else {
            return Err(ReductionError::MissingOperand { position });
        };
        let combined = match clause {
            Clause::And => *left && *right,
            Clause::Or => *left || *right,
        };
        sequence.splice(position - 1..=position + 1, [Item::Value(combined)]);
    }
    Ok(())
}
