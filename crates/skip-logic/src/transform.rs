use tracing::warn;

use crate::config::EngineConfig;
use crate::error::{DecodeError, SkipLogicError};
use crate::expr::{Expr, Identifier, Literal, OptionOperator, parse_expression_with};
use crate::ids::IdGenerator;
use crate::spec::{Clause, ConditionKind, QuestionItem, SelectionMode, SkipLogicCondition};

/// Decodes a persisted expression into the ordered conditions of one rule.
///
/// Any failure discards the whole expression: the result is empty and a single
/// warning is logged. A blank expression is simply empty.
pub fn conditions_from_expression(
    expression: &str,
    question: &QuestionItem,
    ids: &mut dyn IdGenerator,
) -> Vec<SkipLogicCondition> {
    conditions_from_expression_with(expression, question, ids, &EngineConfig::default())
}

pub fn conditions_from_expression_with(
    expression: &str,
    question: &QuestionItem,
    ids: &mut dyn IdGenerator,
    config: &EngineConfig,
) -> Vec<SkipLogicCondition> {
    match try_conditions_from_expression(expression, question, ids, config) {
        Ok(conditions) => conditions,
        Err(error) => {
            warn!(
                %error,
                expression,
                question_id = %question.id,
                "discarding invalid skip-logic expression"
            );
            Vec::new()
        }
    }
}

/// Same as [`conditions_from_expression_with`] but surfaces the failure.
pub fn try_conditions_from_expression(
    expression: &str,
    question: &QuestionItem,
    ids: &mut dyn IdGenerator,
    config: &EngineConfig,
) -> Result<Vec<SkipLogicCondition>, SkipLogicError> {
    if expression.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mode = question
        .kind
        .selection_mode()
        .ok_or(DecodeError::UnsupportedQuestionType(question.kind))?;
    let tree = parse_expression_with(expression, config)?;

    let mut leaves = Vec::new();
    let mut walk = Walk {
        question,
        mode,
        next_node: 0,
        ancestors: Vec::new(),
    };
    walk.collect(&tree, &mut leaves)?;

    let mut clauses = vec![Clause::default(); leaves.len()];
    for idx in 1..leaves.len() {
        clauses[idx - 1] = shared_clause(&leaves[idx - 1].ancestors, &leaves[idx].ancestors);
    }

    Ok(leaves
        .into_iter()
        .zip(clauses)
        .map(|(leaf, clause)| SkipLogicCondition {
            id: ids.next_id(),
            clause,
            kind: leaf.kind,
        })
        .collect())
}

/// Logical ancestor of a leaf: preorder node index and its clause.
type Ancestor = (usize, Clause);

struct Leaf {
    ancestors: Vec<Ancestor>,
    kind: ConditionKind,
}

struct Walk<'q> {
    question: &'q QuestionItem,
    mode: SelectionMode,
    next_node: usize,
    ancestors: Vec<Ancestor>,
}

impl Walk<'_> {
    fn collect(&mut self, expr: &Expr, leaves: &mut Vec<Leaf>) -> Result<(), DecodeError> {
        match expr {
            Expr::Logical {
                clause,
                left,
                right,
            } => {
                let node = self.next_node;
                self.next_node += 1;
                self.ancestors.push((node, *clause));
                self.collect(left, leaves)?;
                self.collect(right, leaves)?;
                self.ancestors.pop();
            }
            Expr::Comparison {
                op,
                identifier: Identifier::Count(_),
                value,
            } => leaves.push(Leaf {
                ancestors: self.ancestors.clone(),
                kind: ConditionKind::SelectedCount {
                    count_condition: Some(op.to_count_condition()),
                    count: Some(decode_count(value)?),
                },
            }),
            Expr::Comparison {
                op,
                identifier: identifier @ Identifier::Value(_),
                value,
            } => {
                let kind = self.decode_option(OptionOperator::Comparison(*op), identifier, value)?;
                leaves.push(Leaf {
                    ancestors: self.ancestors.clone(),
                    kind,
                });
            }
            Expr::Membership {
                op,
                identifier: identifier @ Identifier::Value(_),
                value,
            } => {
                let kind = self.decode_option(OptionOperator::Membership(*op), identifier, value)?;
                leaves.push(Leaf {
                    ancestors: self.ancestors.clone(),
                    kind,
                });
            }
            Expr::Membership {
                op,
                identifier: identifier @ Identifier::Count(_),
                ..
            } => {
                return Err(DecodeError::OperatorMismatch {
                    operator: op.as_str(),
                    identifier: identifier.to_string(),
                });
            }
        }
        Ok(())
    }

    fn decode_option(
        &self,
        operator: OptionOperator,
        identifier: &Identifier,
        value: &Literal,
    ) -> Result<ConditionKind, DecodeError> {
        let option_condition =
            operator
                .to_condition(self.mode)
                .ok_or_else(|| DecodeError::OperatorMismatch {
                    operator: operator.as_str(),
                    identifier: identifier.to_string(),
                })?;
        let text = value.as_text();
        let option = self
            .question
            .option_by_value(&text)
            .ok_or(DecodeError::UnknownOption(text))?;
        Ok(ConditionKind::SpecificOption {
            option_id: Some(option.id.clone()),
            option_condition: Some(option_condition),
        })
    }
}

fn decode_count(value: &Literal) -> Result<u32, DecodeError> {
    match value {
        Literal::Integer(count) => {
            u32::try_from(*count).map_err(|_| DecodeError::InvalidCount(value.to_string()))
        }
        other => Err(DecodeError::InvalidCount(other.to_string())),
    }
}

/// Clause of the deepest logical node on both ancestor paths.
fn shared_clause(previous: &[Ancestor], current: &[Ancestor]) -> Clause {
    previous
        .iter()
        .zip(current)
        .take_while(|(left, right)| left.0 == right.0)
        .last()
        .map_or_else(Clause::default, |(shared, _)| shared.1)
}
