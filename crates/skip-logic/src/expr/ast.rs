use std::fmt;

use crate::expr::lexer::quote;
use crate::spec::{Clause, CountCondition, OptionCondition, SelectionMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Neq,
}

impl ComparisonOp {
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::Gt => "gt",
            ComparisonOp::Gte => "gte",
            ComparisonOp::Lt => "lt",
            ComparisonOp::Lte => "lte",
            ComparisonOp::Eq => "eq",
            ComparisonOp::Neq => "neq",
        }
    }

    pub fn from_count_condition(condition: CountCondition) -> Self {
        match condition {
            CountCondition::Equal => ComparisonOp::Eq,
            CountCondition::NotEqual => ComparisonOp::Neq,
            CountCondition::Greater => ComparisonOp::Gt,
            CountCondition::GreaterOrEqual => ComparisonOp::Gte,
            CountCondition::Less => ComparisonOp::Lt,
            CountCondition::LessOrEqual => ComparisonOp::Lte,
        }
    }

    pub fn to_count_condition(self) -> CountCondition {
        match self {
            ComparisonOp::Eq => CountCondition::Equal,
            ComparisonOp::Neq => CountCondition::NotEqual,
            ComparisonOp::Gt => CountCondition::Greater,
            ComparisonOp::Gte => CountCondition::GreaterOrEqual,
            ComparisonOp::Lt => CountCondition::Less,
            ComparisonOp::Lte => CountCondition::LessOrEqual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipOp {
    Contains,
    NotContains,
}

impl MembershipOp {
    pub fn as_str(self) -> &'static str {
        match self {
            MembershipOp::Contains => "contains",
            MembershipOp::NotContains => "notcontains",
        }
    }
}

/// Operator of an option-membership leaf. Single-choice questions persist it
/// as `eq`/`neq`, multi-choice questions as `contains`/`notcontains`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionOperator {
    Comparison(ComparisonOp),
    Membership(MembershipOp),
}

impl OptionOperator {
    pub fn for_condition(mode: SelectionMode, condition: OptionCondition) -> Self {
        match (mode, condition) {
            (SelectionMode::Single, OptionCondition::Selected) => {
                OptionOperator::Comparison(ComparisonOp::Eq)
            }
            (SelectionMode::Single, OptionCondition::NotSelected) => {
                OptionOperator::Comparison(ComparisonOp::Neq)
            }
            (SelectionMode::Multiple, OptionCondition::Selected) => {
                OptionOperator::Membership(MembershipOp::Contains)
            }
            (SelectionMode::Multiple, OptionCondition::NotSelected) => {
                OptionOperator::Membership(MembershipOp::NotContains)
            }
        }
    }

    /// Decodes the operator for the given selection mode, `None` when the pair
    /// is not one the serializer would produce.
    pub fn to_condition(self, mode: SelectionMode) -> Option<OptionCondition> {
        match (mode, self) {
            (SelectionMode::Single, OptionOperator::Comparison(ComparisonOp::Eq)) => {
                Some(OptionCondition::Selected)
            }
            (SelectionMode::Single, OptionOperator::Comparison(ComparisonOp::Neq)) => {
                Some(OptionCondition::NotSelected)
            }
            (SelectionMode::Multiple, OptionOperator::Membership(MembershipOp::Contains)) => {
                Some(OptionCondition::Selected)
            }
            (SelectionMode::Multiple, OptionOperator::Membership(MembershipOp::NotContains)) => {
                Some(OptionCondition::NotSelected)
            }
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OptionOperator::Comparison(op) => op.as_str(),
            OptionOperator::Membership(op) => op.as_str(),
        }
    }
}

/// Operand naming a question by its 1-based position at persistence time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identifier {
    /// `val<seq>`: option membership.
    Value(u32),
    /// `cnt<seq>`: number of selected options.
    Count(u32),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Value(seq) => write!(f, "val{seq}"),
            Identifier::Count(seq) => write!(f, "cnt{seq}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Integer(i64),
    /// Lexeme as written, matched verbatim against option values.
    Float(String),
}

impl Literal {
    /// Text used to match the literal against option values.
    pub fn as_text(&self) -> String {
        match self {
            Literal::String(text) => text.clone(),
            Literal::Integer(value) => value.to_string(),
            Literal::Float(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(text) => f.write_str(&quote(text)),
            Literal::Integer(value) => write!(f, "{value}"),
            Literal::Float(raw) => f.write_str(raw),
        }
    }
}

/// Parse tree of a persisted expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Logical {
        clause: Clause,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Comparison {
        op: ComparisonOp,
        identifier: Identifier,
        value: Literal,
    },
    Membership {
        op: MembershipOp,
        identifier: Identifier,
        value: Literal,
    },
}

impl fmt::Display for Expr {
    /// Renders the tree back into prefix notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Logical {
                clause,
                left,
                right,
            } => write!(f, "{} {} {}", clause.as_str(), left, right),
            Expr::Comparison {
                op,
                identifier,
                value,
            } => write!(f, "{} {} {}", op.as_str(), identifier, value),
            Expr::Membership {
                op,
                identifier,
                value,
            } => write!(f, "{} {} {}", op.as_str(), identifier, value),
        }
    }
}
