use std::fmt;
use std::ops::Range;

use logos::Logos;

use crate::error::ParseError;

/// Tokens of the prefix skip-logic grammar.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token<'a> {
    // ===== Logical operators =====
    #[token("and")]
    And,

    #[token("or")]
    Or,

    // ===== Comparison operators =====
    #[token("gt")]
    Gt,

    #[token("gte")]
    Gte,

    #[token("lt")]
    Lt,

    #[token("lte")]
    Lte,

    #[token("eq")]
    Eq,

    #[token("neq")]
    Neq,

    // ===== Membership operators =====
    #[token("contains")]
    Contains,

    #[token("notcontains")]
    NotContains,

    // ===== Identifiers =====
    /// Option membership operand: `val<seq>`
    #[regex(r"val[0-9]+", |lex| lex.slice()[3..].parse::<u32>().ok())]
    ValueIdent(u32),

    /// Selected-count operand: `cnt<seq>`
    #[regex(r"cnt[0-9]+", |lex| lex.slice()[3..].parse::<u32>().ok())]
    CountIdent(u32),

    // ===== Literals =====
    /// String literal including its quotes: "..."
    #[regex(r#""([^"\\]|\\.)*""#, |lex| lex.slice())]
    StringLiteral(&'a str),

    #[regex(r"-?[0-9]+\.[0-9]+", |lex| lex.slice())]
    FloatLiteral(&'a str),

    #[regex(r"-?[0-9]+", |lex| lex.slice())]
    IntLiteral(&'a str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::And => f.write_str("'and'"),
            Token::Or => f.write_str("'or'"),
            Token::Gt => f.write_str("'gt'"),
            Token::Gte => f.write_str("'gte'"),
            Token::Lt => f.write_str("'lt'"),
            Token::Lte => f.write_str("'lte'"),
            Token::Eq => f.write_str("'eq'"),
            Token::Neq => f.write_str("'neq'"),
            Token::Contains => f.write_str("'contains'"),
            Token::NotContains => f.write_str("'notcontains'"),
            Token::ValueIdent(seq) => write!(f, "identifier 'val{seq}'"),
            Token::CountIdent(seq) => write!(f, "identifier 'cnt{seq}'"),
            Token::StringLiteral(raw) => write!(f, "string {raw}"),
            Token::FloatLiteral(raw) | Token::IntLiteral(raw) => write!(f, "number {raw}"),
        }
    }
}

/// Tokenizes a whole expression, keeping byte spans for diagnostics.
pub fn tokenize(input: &str) -> Result<Vec<(Token<'_>, Range<usize>)>, ParseError> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let span = lexer.span();
                return Err(ParseError::InvalidToken {
                    position: span.start,
                    slice: input[span].to_string(),
                });
            }
        }
    }
    Ok(tokens)
}

/// Strips the surrounding quotes and resolves backslash escapes.
pub(crate) fn unescape(raw: &str) -> String {
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Inverse of [`unescape`].
pub(crate) fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}
