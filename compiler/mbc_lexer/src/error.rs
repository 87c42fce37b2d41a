use thiserror::Error;

/// Errors produced while tokenizing a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{character}' at offset {offset}")]
    UnexpectedCharacter { character: char, offset: usize },

    #[error("invalid number literal '{lexeme}' at offset {offset}")]
    InvalidNumber { lexeme: String, offset: usize },
}
