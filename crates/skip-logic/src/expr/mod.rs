//! Persisted skip-logic expression grammar.
//!
//! Expressions are space-delimited prefix notation:
//!
//! ```text
//! expression := (and|or) expression expression
//!             | (gt|gte|lt|lte|eq|neq) identifier value
//!             | (contains|notcontains) identifier value
//! identifier := val<seq> | cnt<seq>
//! value      := "quoted string" | integer | float
//! ```
//!
//! - `lexer`: logos tokenizer
//! - `ast`: tagged-union parse tree
//! - `parser`: recursive descent over the token stream

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{ComparisonOp, Expr, Identifier, Literal, MembershipOp, OptionOperator};
pub use parser::{parse_expression, parse_expression_with};
