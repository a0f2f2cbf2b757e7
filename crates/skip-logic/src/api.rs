use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::ids::IdGenerator;
use crate::serialize::expression_from_conditions;
use crate::spec::{
    QuestionItem, QuestionItemSkipLogic, SkipLogicCondition, SkipLogicDestination, SkipLogicRule,
    SurveyItem,
};
use crate::transform::conditions_from_expression_with;

/// Persisted form of a rule: conditions collapsed into one expression string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ApiSkipLogicRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub expression: String,
    #[serde(default)]
    pub destination: SkipLogicDestination,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct ApiQuestionSkipLogic {
    pub rules: Vec<ApiSkipLogicRule>,
}

/// Persisted form of a question's rules, using its current survey position.
pub fn skip_logic_to_api(survey: &SurveyItem, question_id: &str) -> Option<ApiQuestionSkipLogic> {
    let question = survey.question(question_id)?;
    let skip_logic = question.skip_logic.as_ref()?;
    let sequence = u32::try_from(survey.sequence_of(question_id)?).ok()?;
    Some(rules_to_api(question, sequence, skip_logic))
}

/// Serializes every non-empty rule, preserving authored order.
pub fn rules_to_api(
    question: &QuestionItem,
    sequence: u32,
    skip_logic: &QuestionItemSkipLogic,
) -> ApiQuestionSkipLogic {
    let rules = skip_logic
        .rules
        .iter()
        .filter(|rule| !rule.is_empty())
        .map(|rule| ApiSkipLogicRule {
            id: Some(rule.id.clone()),
            expression: expression_from_conditions(&rule.conditions, question, sequence),
            destination: rule.destination.clone(),
        })
        .collect();
    ApiQuestionSkipLogic { rules }
}

/// Rebuilds editable rules from their persisted form.
///
/// A rule whose expression is blank or discarded keeps its destination and
/// gets a single empty condition so it stays editable.
pub fn skip_logic_from_api(
    question: &QuestionItem,
    api: &ApiQuestionSkipLogic,
    ids: &mut dyn IdGenerator,
    config: &EngineConfig,
) -> QuestionItemSkipLogic {
    let rules = api
        .rules
        .iter()
        .map(|rule| {
            let id = rule.id.clone().unwrap_or_else(|| ids.next_id());
            let mut conditions =
                conditions_from_expression_with(&rule.expression, question, &mut *ids, config);
            if conditions.is_empty() {
                conditions.push(SkipLogicCondition::empty(&mut *ids));
            }
            SkipLogicRule {
                id,
                conditions,
                destination: rule.destination.clone(),
            }
        })
        .collect();
    QuestionItemSkipLogic { rules }
}
