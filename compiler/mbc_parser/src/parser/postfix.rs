//! Infix to postfix conversion (shunting-yard).
//!
//! Operands and separators go straight to the output. An incoming operator
//! first pops every stacked operator of equal or higher precedence, which
//! makes chains of equal precedence left-associative: `8-3-2` is `8 3 - 2 -`.

use log::trace;
use mbc_lexer::token::render_tokens;
use mbc_lexer::{Bracket, Token, TokenType};

use super::error::ParseError;

/// Options for [`to_postfix`] and [`crate::build_call_tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Require `)` `]` `}` to close the same bracket kind that opened.
    /// When off, any closing bracket matches the nearest opening one.
    pub strict_brackets: bool,
    /// Deepest bracket nesting the call tree builder accepts.
    pub max_nesting: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            strict_brackets: false,
            max_nesting: 256,
        }
    }
}

impl ConverterConfig {
    pub fn strict() -> Self {
        Self {
            strict_brackets: true,
            ..Self::default()
        }
    }
}

/// Converts an infix token sequence into postfix order. Brackets never
/// reach the output.
pub fn to_postfix(tokens: &[Token], config: ConverterConfig) -> Result<Vec<Token>, ParseError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<&Token> = Vec::new();

    for token in tokens {
        match &token.token_type {
            TokenType::Operator(incoming) => {
                while let Some(top) = stack.last() {
                    match &top.token_type {
                        TokenType::Operator(stacked)
                            if stacked.precedence() >= incoming.precedence() =>
                        {
                            output.push((*top).clone());
                            stack.pop();
                        }
                        _ => break,
                    }
                }
                stack.push(token);
            }
            TokenType::Open(_) => stack.push(token),
            TokenType::Close(close) => close_bracket(&mut stack, &mut output, token, *close, config)?,
            _ => output.push(token.clone()),
        }
    }

    while let Some(top) = stack.pop() {
        if let TokenType::Open(open) = top.token_type {
            return Err(ParseError::UnclosedBracket {
                bracket: open.open_char(),
                offset: top.offset,
            });
        }
        output.push(top.clone());
    }

    trace!("postfix: {}", render_tokens(&output));
    Ok(output)
}

/// Pops operators to the output up to the nearest opening bracket, which is
/// discarded.
fn close_bracket<'t>(
    stack: &mut Vec<&'t Token>,
    output: &mut Vec<Token>,
    token: &Token,
    close: Bracket,
    config: ConverterConfig,
) -> Result<(), ParseError> {
    while let Some(top) = stack.pop() {
        match top.token_type {
            TokenType::Open(open) => {
                if config.strict_brackets && open != close {
                    return Err(ParseError::MismatchedBracket {
                        open: open.open_char(),
                        close: close.close_char(),
                        offset: top.offset,
                    });
                }
                return Ok(());
            }
            _ => output.push(top.clone()),
        }
    }
    Err(ParseError::UnmatchedClose {
        bracket: close.close_char(),
        offset: token.offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::init_test_logger;
    use mbc_lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn postfix(source: &str) -> String {
        init_test_logger();
        let tokens = tokenize(source).unwrap();
        render_tokens(&to_postfix(&tokens, ConverterConfig::default()).unwrap())
    }

    #[test]
    fn precedence_and_grouping() {
        assert_eq!(postfix("1+2*3"), "1 2 3 * +");
        assert_eq!(postfix("(1+2)*3"), "1 2 + 3 *");
        assert_eq!(postfix("2**3*4"), "2 3 ** 4 *");
        assert_eq!(postfix("a<b&&c"), "a b < c &&");
        assert_eq!(postfix("1|2^3&4"), "1 2 3 4 & ^ |");
    }

    #[test]
    fn equal_precedence_is_left_associative() {
        assert_eq!(postfix("8-3-2"), "8 3 - 2 -");
        assert_eq!(postfix("8/4*2"), "8 4 / 2 *");
        assert_eq!(postfix("2**3**2"), "2 3 ** 2 **");
    }

    #[test]
    fn brackets_are_interchangeable() {
        assert_eq!(postfix("[1+2}*{3-1)"), "1 2 + 3 1 - *");
    }

    #[test]
    fn unary_operators() {
        assert_eq!(postfix("!0"), "0 !");
        assert_eq!(postfix("3++"), "3 ++");
        assert_eq!(postfix("!a&&b"), "a ! b &&");
    }

    #[test]
    fn negative_literals_stay_operands() {
        assert_eq!(postfix("-3+5"), "-3 5 +");
        assert_eq!(postfix("5-3"), "5 3 -");
    }

    #[test]
    fn unmatched_brackets() {
        let tokens = tokenize("1+2)").unwrap();
        assert!(matches!(
            to_postfix(&tokens, ConverterConfig::default()),
            Err(ParseError::UnmatchedClose { bracket: ')', .. })
        ));

        let tokens = tokenize("(1+2").unwrap();
        assert!(matches!(
            to_postfix(&tokens, ConverterConfig::default()),
            Err(ParseError::UnclosedBracket { bracket: '(', .. })
        ));
    }

    #[test]
    fn strict_brackets_reject_mixed_kinds() {
        let tokens = tokenize("[1+2)").unwrap();
        assert!(matches!(
            to_postfix(&tokens, ConverterConfig::strict()),
            Err(ParseError::MismatchedBracket {
                open: '[',
                close: ')',
                ..
            })
        ));
        let tokens = tokenize("[1+2]").unwrap();
        assert!(to_postfix(&tokens, ConverterConfig::strict()).is_ok());
    }
}
