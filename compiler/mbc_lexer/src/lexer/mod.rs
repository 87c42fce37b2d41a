//! Lexer implementation for the mbc expression language.
//! Converts a statement into a flat sequence of tokens.

use logos::Logos;

use crate::error::LexError;
use crate::operator::Operator;
use crate::si;
use crate::token::{Bracket, Token, TokenType};
use crate::LogosToken;

/// The main lexer struct that holds the state of the lexing process
pub struct Lexer<'a> {
    /// The statement being lexed
    source: &'a str,
    /// The inner Logos lexer
    inner: logos::Lexer<'a, LogosToken>,
    /// Tokens emitted so far
    tokens: Vec<Token>,
    /// Offset of a `-` folded into the next number literal
    pending_sign: Option<usize>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given statement
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: LogosToken::lexer(source),
            tokens: Vec::new(),
            pending_sign: None,
        }
    }

    /// Consume the lexer and return every token of the statement.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let source = self.source;
        while let Some(result) = self.inner.next() {
            let span = self.inner.span();
            let lexeme = &source[span.clone()];

            let logos_token = result.map_err(|()| LexError::UnexpectedCharacter {
                character: lexeme.chars().next().unwrap_or_default(),
                offset: span.start,
            })?;

            #[cfg(feature = "logging")]
            log::trace!("lexeme {:?} '{}' at {:?}", logos_token, lexeme, span);

            self.convert_token(logos_token, lexeme, span.start)?;
        }
        Ok(self.tokens)
    }

    /// A `-` starts a negative literal when a digit follows it directly and
    /// the previous token does not end an operand.
    fn starts_negative_literal(&self) -> bool {
        let digit_follows = self
            .inner
            .remainder()
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit());
        let operand_before = matches!(
            self.tokens.last().map(|t| &t.token_type),
            Some(TokenType::Close(_) | TokenType::Number(_) | TokenType::Identifier(_))
        );
        digit_follows && !operand_before
    }

    /// Prefix `lexeme` with the pending sign, if any.
    fn signed(&mut self, lexeme: &str, offset: usize) -> (String, usize) {
        match self.pending_sign.take() {
            Some(sign_offset) => (format!("-{lexeme}"), sign_offset),
            None => (lexeme.to_string(), offset),
        }
    }

    fn push_number(&mut self, lexeme: String, offset: usize) -> Result<(), LexError> {
        let value: f64 = lexeme
            .parse()
            .map_err(|_| LexError::InvalidNumber {
                lexeme: lexeme.clone(),
                offset,
            })?;
        self.tokens
            .push(Token::new(TokenType::Number(value), lexeme, offset));
        Ok(())
    }

    /// `5k` becomes `(5*1E3)` so the multiplier binds tighter than any
    /// operator around the literal.
    fn push_si_number(&mut self, lexeme: &str, offset: usize) -> Result<(), LexError> {
        let (mantissa, prefix) =
            si::split_suffix(lexeme).ok_or_else(|| LexError::InvalidNumber {
                lexeme: lexeme.to_string(),
                offset,
            })?;
        let (mantissa, start) = self.signed(mantissa, offset);

        self.tokens.push(Token::open(Bracket::Paren, start));
        self.push_number(mantissa, start)?;
        self.tokens.push(Token::operator(Operator::Multiply, offset));
        self.tokens.push(Token::new(
            TokenType::Number(prefix.multiplier()),
            prefix.multiplier_lexeme(),
            offset,
        ));
        self.tokens.push(Token::close(Bracket::Paren, offset));
        Ok(())
    }

    /// Convert a LogosToken to our semantic token(s)
    fn convert_token(
        &mut self,
        logos_token: LogosToken,
        lexeme: &str,
        offset: usize,
    ) -> Result<(), LexError> {
        let token_type = match logos_token {
            // Literals
            LogosToken::Number | LogosToken::Scientific => {
                let (lexeme, offset) = self.signed(lexeme, offset);
                return self.push_number(lexeme, offset);
            }
            LogosToken::SiNumber => return self.push_si_number(lexeme, offset),
            LogosToken::Identifier => TokenType::Identifier(lexeme.to_string()),

            // Operators
            LogosToken::Minus if self.starts_negative_literal() => {
                self.pending_sign = Some(offset);
                return Ok(());
            }
            LogosToken::PlusPlus => TokenType::Operator(Operator::Increment),
            LogosToken::MinusMinus => TokenType::Operator(Operator::Decrement),
            LogosToken::StarStar => TokenType::Operator(Operator::Power),
            LogosToken::Star => TokenType::Operator(Operator::Multiply),
            LogosToken::Slash => TokenType::Operator(Operator::Divide),
            LogosToken::Percent => TokenType::Operator(Operator::Modulo),
            LogosToken::Plus => TokenType::Operator(Operator::Add),
            LogosToken::Minus => TokenType::Operator(Operator::Subtract),
            LogosToken::Shl => TokenType::Operator(Operator::ShiftLeft),
            LogosToken::Shr => TokenType::Operator(Operator::ShiftRight),
            LogosToken::LessEqual => TokenType::Operator(Operator::LessEqual),
            LogosToken::GreaterEqual => TokenType::Operator(Operator::GreaterEqual),
            LogosToken::Less => TokenType::Operator(Operator::Less),
            LogosToken::Greater => TokenType::Operator(Operator::Greater),
            LogosToken::EqualEqual => TokenType::Operator(Operator::Equal),
            LogosToken::NotEqual => TokenType::Operator(Operator::NotEqual),
            LogosToken::AndAnd => TokenType::Operator(Operator::And),
            LogosToken::BitAnd => TokenType::Operator(Operator::BitAnd),
            LogosToken::CaretCaret => TokenType::Operator(Operator::Xor),
            LogosToken::BitXor => TokenType::Operator(Operator::BitXor),
            LogosToken::OrOr => TokenType::Operator(Operator::Or),
            LogosToken::BitOr => TokenType::Operator(Operator::BitOr),
            LogosToken::Bang => TokenType::Operator(Operator::Not),

            LogosToken::Equal => TokenType::Assign,
            LogosToken::Comma => TokenType::Comma,

            // Delimiters
            LogosToken::LeftParen => TokenType::Open(Bracket::Paren),
            LogosToken::RightParen => TokenType::Close(Bracket::Paren),
            LogosToken::LeftBracket => TokenType::Open(Bracket::Square),
            LogosToken::RightBracket => TokenType::Close(Bracket::Square),
            LogosToken::LeftBrace => TokenType::Open(Bracket::Curly),
            LogosToken::RightBrace => TokenType::Close(Bracket::Curly),
        };

        self.tokens.push(Token::new(token_type, lexeme, offset));
        Ok(())
    }
}

/// Tokenize a whole statement.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}
