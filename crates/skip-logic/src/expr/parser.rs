use std::ops::Range;

use crate::config::EngineConfig;
use crate::error::ParseError;
use crate::expr::ast::{ComparisonOp, Expr, Identifier, Literal, MembershipOp};
use crate::expr::lexer::{Token, tokenize, unescape};
use crate::spec::Clause;

/// Parses a prefix-notation expression with the default limits.
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    parse_expression_with(input, &EngineConfig::default())
}

pub fn parse_expression_with(input: &str, config: &EngineConfig) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser {
        tokens,
        current: 0,
        max_depth: config.max_expression_depth,
    };
    let expr = parser.expression()?;
    if let Some((_, span)) = parser.tokens.get(parser.current) {
        return Err(ParseError::TrailingInput {
            position: span.start,
        });
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: Vec<(Token<'a>, Range<usize>)>,
    current: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn advance(&mut self, expected: &'static str) -> Result<(Token<'a>, usize), ParseError> {
        let (token, span) = self
            .tokens
            .get(self.current)
            .cloned()
            .ok_or(ParseError::UnexpectedEnd { expected })?;
        self.current += 1;
        Ok((token, span.start))
    }

    /// expression := logical | comparison | membership
    ///
    /// Logical nodes wait on an explicit stack until both operands are built,
    /// so nesting depth never grows the call stack.
    fn expression(&mut self) -> Result<Expr, ParseError> {
        let mut pending: Vec<(Clause, Option<Expr>)> = Vec::new();
        loop {
            if pending.len() > self.max_depth {
                return Err(ParseError::TooDeep {
                    limit: self.max_depth,
                });
            }

            let (token, position) = self.advance("an operator")?;
            let mut expr = match token {
                Token::And => {
                    pending.push((Clause::And, None));
                    continue;
                }
                Token::Or => {
                    pending.push((Clause::Or, None));
                    continue;
                }
                Token::Gt => self.comparison(ComparisonOp::Gt)?,
                Token::Gte => self.comparison(ComparisonOp::Gte)?,
                Token::Lt => self.comparison(ComparisonOp::Lt)?,
                Token::Lte => self.comparison(ComparisonOp::Lte)?,
                Token::Eq => self.comparison(ComparisonOp::Eq)?,
                Token::Neq => self.comparison(ComparisonOp::Neq)?,
                Token::Contains => self.membership(MembershipOp::Contains)?,
                Token::NotContains => self.membership(MembershipOp::NotContains)?,
                other => {
                    return Err(ParseError::UnexpectedToken {
                        position,
                        found: other.to_string(),
                        expected: "an operator",
                    });
                }
            };

            loop {
                match pending.pop() {
                    None => return Ok(expr),
                    Some((clause, None)) => {
                        pending.push((clause, Some(expr)));
                        break;
                    }
                    Some((clause, Some(left))) => {
                        expr = Expr::Logical {
                            clause,
                            left: Box::new(left),
                            right: Box::new(expr),
                        };
                    }
                }
            }
        }
    }

    fn comparison(&mut self, op: ComparisonOp) -> Result<Expr, ParseError> {
        let identifier = self.identifier()?;
        let value = self.value()?;
        Ok(Expr::Comparison {
            op,
            identifier,
            value,
        })
    }

    fn membership(&mut self, op: MembershipOp) -> Result<Expr, ParseError> {
        let identifier = self.identifier()?;
        let value = self.value()?;
        Ok(Expr::Membership {
            op,
            identifier,
            value,
        })
    }

    fn identifier(&mut self) -> Result<Identifier, ParseError> {
        const EXPECTED: &str = "an identifier";
        let (token, position) = self.advance(EXPECTED)?;
        match token {
            Token::ValueIdent(seq) => Ok(Identifier::Value(seq)),
            Token::CountIdent(seq) => Ok(Identifier::Count(seq)),
            other => Err(ParseError::UnexpectedToken {
                position,
                found: other.to_string(),
                expected: EXPECTED,
            }),
        }
    }

    fn value(&mut self) -> Result<Literal, ParseError> {
        const EXPECTED: &str = "a value";
        let (token, position) = self.advance(EXPECTED)?;
        let invalid = |found: String| ParseError::UnexpectedToken {
            position,
            found,
            expected: EXPECTED,
        };
        match token {
            Token::StringLiteral(raw) => Ok(Literal::String(unescape(raw))),
            Token::IntLiteral(raw) => raw
                .parse::<i64>()
                .map(Literal::Integer)
                .map_err(|_| invalid(token.to_string())),
            Token::FloatLiteral(raw) => raw
                .parse::<f64>()
                .map(|_| Literal::Float(raw.to_string()))
                .map_err(|_| invalid(token.to_string())),
            other => Err(invalid(other.to_string())),
        }
    }
}
