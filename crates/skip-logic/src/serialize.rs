use crate::expr::{ComparisonOp, Expr, Identifier, Literal, OptionOperator};
use crate::spec::{Clause, ConditionKind, QuestionItem, SelectionMode, SkipLogicCondition};

#[derive(Debug, Clone, PartialEq, Eq)]
enum InfixToken {
    Operand(String),
    Operator(Clause),
}

/// Renders a rule's conditions as a persisted prefix expression.
///
/// `sequence` is the owning question's 1-based position in the survey.
/// Conditions whose operands no longer resolve are dropped; the result is an
/// empty string when nothing resolves.
pub fn expression_from_conditions(
    conditions: &[SkipLogicCondition],
    question: &QuestionItem,
    sequence: u32,
) -> String {
    let Some(mode) = question.kind.selection_mode() else {
        return String::new();
    };
    let mut infix = Vec::with_capacity(conditions.len() * 2);
    let mut pending_clause: Option<Clause> = None;

    for condition in conditions {
        let Some(operand) = render_operand(condition, question, mode, sequence) else {
            continue;
        };
        if let Some(clause) = pending_clause {
            infix.push(InfixToken::Operator(clause));
        }
        infix.push(InfixToken::Operand(operand));
        pending_clause = Some(condition.clause);
    }

    infix_to_prefix(infix).join(" ")
}

fn render_operand(
    condition: &SkipLogicCondition,
    question: &QuestionItem,
    mode: SelectionMode,
    sequence: u32,
) -> Option<String> {
    let leaf = match &condition.kind {
        ConditionKind::Empty => return None,
        ConditionKind::SpecificOption {
            option_id,
            option_condition,
        } => {
            let option = question.option(option_id.as_deref()?)?;
            let value = Literal::String(option.value.clone());
            let identifier = Identifier::Value(sequence);
            match OptionOperator::for_condition(mode, (*option_condition)?) {
                OptionOperator::Comparison(op) => Expr::Comparison {
                    op,
                    identifier,
                    value,
                },
                OptionOperator::Membership(op) => Expr::Membership {
                    op,
                    identifier,
                    value,
                },
            }
        }
        ConditionKind::SelectedCount {
            count_condition,
            count,
        } => Expr::Comparison {
            op: ComparisonOp::from_count_condition((*count_condition)?),
            identifier: Identifier::Count(sequence),
            value: Literal::Integer(i64::from((*count)?)),
        },
    };
    Some(leaf.to_string())
}

/// Reorders an infix token stream into prefix order, scanning right to left
/// with an operator stack. `and` binds tighter than `or`; equal operators
/// associate to the left.
fn infix_to_prefix(tokens: Vec<InfixToken>) -> Vec<String> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Clause> = Vec::new();

    for token in tokens.into_iter().rev() {
        match token {
            InfixToken::Operand(operand) => output.push(operand),
            InfixToken::Operator(clause) => {
                while let Some(top) = operators.last().copied() {
                    if top.precedence() <= clause.precedence() {
                        break;
                    }
                    operators.pop();
                    output.push(top.as_str().to_string());
                }
                operators.push(clause);
            }
        }
    }
    while let Some(top) = operators.pop() {
        output.push(top.as_str().to_string());
    }

    output.reverse();
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operand(name: &str) -> InfixToken {
        InfixToken::Operand(name.to_string())
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let tokens = vec![
            operand("a"),
            InfixToken::Operator(Clause::Or),
            operand("b"),
            InfixToken::Operator(Clause::And),
            operand("c"),
        ];
        assert_eq!(infix_to_prefix(tokens), vec!["or", "a", "and", "b", "c"]);
    }

    #[test]
    fn equal_operators_associate_left() {
        let tokens = vec![
            operand("a"),
            InfixToken::Operator(Clause::And),
            operand("b"),
            InfixToken::Operator(Clause::And),
            operand("c"),
        ];
        assert_eq!(infix_to_prefix(tokens), vec!["and", "and", "a", "b", "c"]);
    }

    #[test]
    fn mixed_chain_groups_conjunctions() {
        let tokens = vec![
            operand("a"),
            InfixToken::Operator(Clause::And),
            operand("b"),
            InfixToken::Operator(Clause::Or),
            operand("c"),
            InfixToken::Operator(Clause::And),
            operand("d"),
        ];
        assert_eq!(
            infix_to_prefix(tokens),
            vec!["or", "and", "a", "b", "and", "c", "d"]
        );
    }

    #[test]
    fn single_operand_passes_through() {
        assert_eq!(infix_to_prefix(vec![operand("a")]), vec!["a"]);
        assert!(infix_to_prefix(Vec::new()).is_empty());
    }
}
