//! mbc lexical analyzer module
//!
//! This module provides lexical analysis for the mbc expression language,
//! converting statement text into a stream of tokens for the converter.
//! Numbers may carry an SI prefix suffix (`5k`, `2m`, `4da`) which the lexer
//! rewrites into an explicit, grouped multiplication.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod lexer;
pub mod logos_token;
pub mod operator;
pub mod si;
pub mod token;

// Re-export the main types for convenience
pub use error::LexError;
pub use lexer::{tokenize, Lexer};
pub use logos_token::LogosToken;
pub use operator::{Arity, Category, Operator, OperatorSpec, OPERATORS};
pub use si::{SiPrefix, SI_PREFIXES};
pub use token::{is_valid_name, Bracket, Token, TokenType};
