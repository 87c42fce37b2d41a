use std::fmt;

use crate::operator::Operator;

/// The three interchangeable bracket kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bracket {
    Paren,
    Square,
    Curly,
}

impl Bracket {
    pub fn open_char(self) -> char {
        match self {
            Bracket::Paren => '(',
            Bracket::Square => '[',
            Bracket::Curly => '{',
        }
    }

    pub fn close_char(self) -> char {
        match self {
            Bracket::Paren => ')',
            Bracket::Square => ']',
            Bracket::Curly => '}',
        }
    }
}

/// Represents the type of a token in a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenType {
    /// A numeric literal, already parsed. Negative literals carry their sign.
    Number(f64),
    /// A variable or function name.
    Identifier(String),
    Operator(Operator),
    Open(Bracket),
    Close(Bracket),
    Comma,
    /// A single `=`, only meaningful at the top level of a statement.
    Assign,
}

/// A token with its source text.
///
/// `offset` is the byte offset of the lexeme in the statement it came from.
/// Synthetic tokens (SI multipliers, substituted values) reuse the offset of
/// the token that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub offset: usize,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: impl Into<String>, offset: usize) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            offset,
        }
    }

    /// A number token whose lexeme is the default rendering of `value`.
    pub fn number(value: f64, offset: usize) -> Self {
        Self::new(TokenType::Number(value), format_number(value), offset)
    }

    pub fn identifier(name: impl Into<String>, offset: usize) -> Self {
        let name = name.into();
        Self::new(TokenType::Identifier(name.clone()), name, offset)
    }

    pub fn operator(operator: Operator, offset: usize) -> Self {
        Self::new(TokenType::Operator(operator), operator.symbol(), offset)
    }

    pub fn open(bracket: Bracket, offset: usize) -> Self {
        Self::new(TokenType::Open(bracket), bracket.open_char().to_string(), offset)
    }

    pub fn close(bracket: Bracket, offset: usize) -> Self {
        Self::new(TokenType::Close(bracket), bracket.close_char().to_string(), offset)
    }

    pub fn is_open_paren(&self) -> bool {
        matches!(self.token_type, TokenType::Open(Bracket::Paren))
    }

    pub fn identifier_name(&self) -> Option<&str> {
        match &self.token_type {
            TokenType::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}

/// Default rendering of a value: shortest round-trip form, no exponent.
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Joins token lexemes with single spaces, e.g. `1 2 3 * +`.
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| token.lexeme.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Joins token lexemes without separators, i.e. the statement text form.
pub fn concat_tokens(tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.lexeme.as_str()).collect()
}

/// Returns `true` when `name` is a syntactically valid variable name:
/// a letter or underscore followed by letters, digits or underscores.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
