use std::cmp::Ordering;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::IdGenerator;

/// Logical operator joining a condition to the next one in its rule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    #[default]
    And,
    Or,
}

impl Clause {
    pub fn as_str(self) -> &'static str {
        match self {
            Clause::And => "and",
            Clause::Or => "or",
        }
    }

    /// Binding strength when rendering infix sequences; `and` binds tighter.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            Clause::And => 2,
            Clause::Or => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum OptionCondition {
    Selected,
    NotSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CountCondition {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
}

impl CountCondition {
    pub const ALL: [CountCondition; 6] = [
        CountCondition::Equal,
        CountCondition::NotEqual,
        CountCondition::Greater,
        CountCondition::GreaterOrEqual,
        CountCondition::Less,
        CountCondition::LessOrEqual,
    ];

    /// Applies the comparison `actual <op> expected`.
    pub fn holds(self, actual: u32, expected: u32) -> bool {
        let ordering = actual.cmp(&expected);
        match self {
            CountCondition::Equal => ordering == Ordering::Equal,
            CountCondition::NotEqual => ordering != Ordering::Equal,
            CountCondition::Greater => ordering == Ordering::Greater,
            CountCondition::GreaterOrEqual => ordering != Ordering::Less,
            CountCondition::Less => ordering == Ordering::Less,
            CountCondition::LessOrEqual => ordering != Ordering::Greater,
        }
    }
}

/// Variant-specific part of a condition. Every field is optional while the
/// condition is being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConditionKind {
    Empty,
    SpecificOption {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        option_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        option_condition: Option<OptionCondition>,
    },
    SelectedCount {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        count_condition: Option<CountCondition>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        count: Option<u32>,
    },
}

/// A single test inside a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SkipLogicCondition {
    pub id: String,
    /// Joins this condition to the next one; ignored on the last condition.
    #[serde(default)]
    pub clause: Clause,
    #[serde(flatten)]
    pub kind: ConditionKind,
}

impl SkipLogicCondition {
    pub fn empty(ids: &mut dyn IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            clause: Clause::default(),
            kind: ConditionKind::Empty,
        }
    }

    pub fn specific_option(
        ids: &mut dyn IdGenerator,
        option_id: impl Into<String>,
        option_condition: OptionCondition,
        clause: Clause,
    ) -> Self {
        Self {
            id: ids.next_id(),
            clause,
            kind: ConditionKind::SpecificOption {
                option_id: Some(option_id.into()),
                option_condition: Some(option_condition),
            },
        }
    }

    pub fn selected_count(
        ids: &mut dyn IdGenerator,
        count_condition: CountCondition,
        count: u32,
        clause: Clause,
    ) -> Self {
        Self {
            id: ids.next_id(),
            clause,
            kind: ConditionKind::SelectedCount {
                count_condition: Some(count_condition),
                count: Some(count),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.kind, ConditionKind::Empty)
    }

    /// A condition is complete when all fields required by its variant are set.
    pub fn is_complete(&self) -> bool {
        match &self.kind {
            ConditionKind::Empty => false,
            ConditionKind::SpecificOption {
                option_id,
                option_condition,
            } => option_id.is_some() && option_condition.is_some(),
            ConditionKind::SelectedCount {
                count_condition,
                count,
            } => count_condition.is_some() && count.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    Question,
    Section,
}

/// Where a matching rule sends the respondent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct SkipLogicDestination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<TargetType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
}

impl SkipLogicDestination {
    pub fn new(target_type: TargetType, target_id: impl Into<String>) -> Self {
        Self {
            target_type: Some(target_type),
            target_id: Some(target_id.into()),
        }
    }

    pub fn has_target(&self) -> bool {
        self.target_id.is_some()
    }
}

/// Ordered conditions plus the destination taken when they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SkipLogicRule {
    pub id: String,
    pub conditions: Vec<SkipLogicCondition>,
    #[serde(default)]
    pub destination: SkipLogicDestination,
}

impl SkipLogicRule {
    /// Fresh rule holding one empty condition, as added by the editor.
    pub fn empty(ids: &mut dyn IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            conditions: vec![SkipLogicCondition::empty(ids)],
            destination: SkipLogicDestination::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.iter().all(SkipLogicCondition::is_empty)
            && !self.destination.has_target()
    }
}

/// Rules owned by one question, in authored order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct QuestionItemSkipLogic {
    pub rules: Vec<SkipLogicRule>,
}
