use thiserror::Error;

use crate::spec::QuestionType;

/// Lexical and syntactic failures of the expression grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,
    #[error("invalid token '{slice}' at position {position}")]
    InvalidToken { position: usize, slice: String },
    #[error("unexpected {found} at position {position}, expected {expected}")]
    UnexpectedToken {
        position: usize,
        found: String,
        expected: &'static str,
    },
    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("trailing input at position {position}")]
    TrailingInput { position: usize },
    #[error("expression nested deeper than {limit} levels")]
    TooDeep { limit: usize },
}

/// Failures turning a parsed leaf into a condition for a concrete question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("question type {0:?} does not support skip logic")]
    UnsupportedQuestionType(QuestionType),
    #[error("operator '{operator}' cannot be applied to '{identifier}'")]
    OperatorMismatch {
        operator: &'static str,
        identifier: String,
    },
    #[error("no option with value '{0}'")]
    UnknownOption(String),
    #[error("'{0}' is not a valid selected count")]
    InvalidCount(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipLogicError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Failures reducing a rule's `[bool, clause, bool, ...]` sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReductionError {
    #[error("reduction exceeded {limit} iterations")]
    IterationCapExceeded { limit: usize },
    #[error("clause at position {position} is missing an operand")]
    MissingOperand { position: usize },
    #[error("reduction ended with {0} items instead of one boolean")]
    NotSingle(usize),
}
