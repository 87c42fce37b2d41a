//! Lifts a flat token sequence into a call tree.
//!
//! An identifier directly followed by `(` starts a call; its arguments are
//! the comma separated pieces of the bracketed body. Every other bracket
//! pair becomes a [`GroupNode`]. Nesting is bounded by
//! [`ConverterConfig::max_nesting`], so every later pass over the tree
//! recurses a bounded number of times.

use mbc_ast::{CallNode, GroupNode, Node};
use mbc_lexer::{Bracket, Token, TokenType};

use super::error::ParseError;
use super::postfix::ConverterConfig;

/// Cursor over the tokens of one statement.
struct TreeBuilder<'t> {
    tokens: &'t [Token],
    position: usize,
    config: ConverterConfig,
}

impl<'t> TreeBuilder<'t> {
    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Reads nodes until the closing bracket matching `opener`, or until the
    /// end of input when `opener` is `None`. Returns the nodes and the kind
    /// of the bracket that closed them. `depth` counts the enclosing
    /// brackets.
    fn sequence(
        &mut self,
        opener: Option<(&'t Token, Bracket)>,
        depth: usize,
    ) -> Result<(Vec<Node>, Option<Bracket>), ParseError> {
        let mut nodes = Vec::new();

        while let Some(token) = self.next() {
            match &token.token_type {
                TokenType::Open(open) => {
                    if depth >= self.config.max_nesting {
                        return Err(ParseError::NestingTooDeep {
                            limit: self.config.max_nesting,
                            offset: token.offset,
                        });
                    }
                    let (body, close) = self.sequence(Some((token, *open)), depth + 1)?;
                    let close = close.unwrap_or(*open);
                    let callee = match open {
                        Bracket::Paren => detach_callee(&mut nodes),
                        _ => None,
                    };
                    nodes.push(bracketed(callee, token, *open, close, body)?);
                }
                TokenType::Close(close) => {
                    let Some((open_token, open)) = opener else {
                        return Err(ParseError::UnmatchedClose {
                            bracket: close.close_char(),
                            offset: token.offset,
                        });
                    };
                    if self.config.strict_brackets && open != *close {
                        return Err(ParseError::MismatchedBracket {
                            open: open.open_char(),
                            close: close.close_char(),
                            offset: open_token.offset,
                        });
                    }
                    return Ok((nodes, Some(*close)));
                }
                _ => nodes.push(Node::Token(token.clone())),
            }
        }

        match opener {
            Some((open_token, open)) => Err(ParseError::UnclosedBracket {
                bracket: open.open_char(),
                offset: open_token.offset,
            }),
            None => Ok((nodes, None)),
        }
    }
}

/// A closed parenthesis pair preceded by a bare identifier is a call,
/// anything else is a group.
fn bracketed(
    callee: Option<Token>,
    open_token: &Token,
    open: Bracket,
    close: Bracket,
    body: Vec<Node>,
) -> Result<Node, ParseError> {
    match callee {
        Some(name_token) => {
            let name = name_token.lexeme;
            let arguments = split_arguments(&name, body)?;
            Ok(Node::Call(CallNode {
                name,
                offset: name_token.offset,
                arguments,
            }))
        }
        None => Ok(Node::Group(GroupNode {
            open,
            close,
            offset: open_token.offset,
            body,
        })),
    }
}

/// Detaches a trailing identifier token from `nodes` so it can name a call.
fn detach_callee(nodes: &mut Vec<Node>) -> Option<Token> {
    match nodes.last() {
        Some(Node::Token(token)) if token.identifier_name().is_some() => match nodes.pop() {
            Some(Node::Token(token)) => Some(token),
            _ => None,
        },
        _ => None,
    }
}

/// Splits a call body on its top-level commas. `f()` has no arguments, and
/// an empty piece such as in `f(1,,2)` is an error.
fn split_arguments(name: &str, body: Vec<Node>) -> Result<Vec<Vec<Node>>, ParseError> {
    if body.is_empty() {
        return Ok(Vec::new());
    }

    let mut arguments = vec![Vec::new()];
    for node in body {
        match node {
            Node::Token(Token {
                token_type: TokenType::Comma,
                ..
            }) => arguments.push(Vec::new()),
            node => {
                if let Some(current) = arguments.last_mut() {
                    current.push(node);
                }
            }
        }
    }

    if let Some(position) = arguments.iter().position(Vec::is_empty) {
        return Err(ParseError::EmptyArgument {
            name: name.to_string(),
            position: position + 1,
        });
    }
    Ok(arguments)
}

/// Builds the call tree of a token sequence.
pub fn build_call_tree(tokens: &[Token], config: ConverterConfig) -> Result<Vec<Node>, ParseError> {
    let mut builder = TreeBuilder {
        tokens,
        position: 0,
        config,
    };
    let (nodes, _) = builder.sequence(None, 0)?;
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbc_ast::{contains_call, flatten};
    use mbc_lexer::token::concat_tokens;
    use mbc_lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn tree(source: &str) -> Vec<Node> {
        crate::tests::init_test_logger();
        build_call_tree(&tokenize(source).unwrap(), ConverterConfig::default()).unwrap()
    }

    #[test]
    fn plain_expression_has_no_calls() {
        let nodes = tree("1+(2*x)");
        assert_eq!(nodes.len(), 3);
        assert!(matches!(nodes[2], Node::Group(_)));
        assert!(!contains_call(&nodes));
    }

    #[test]
    fn call_arguments_split_at_top_level() {
        let nodes = tree("f(pow(2,3),(1,2),y)");
        let Node::Call(call) = &nodes[0] else {
            panic!("expected a call, got {:?}", nodes[0]);
        };
        assert_eq!(call.name, "f");
        assert_eq!(call.arguments.len(), 3);
        assert!(call.arguments[0][0].is_call());
        assert!(matches!(call.arguments[1][0], Node::Group(_)));
    }

    #[test]
    fn square_bracket_after_name_is_a_group() {
        let nodes = tree("f[2]");
        assert_eq!(nodes.len(), 2);
        assert!(!contains_call(&nodes));
    }

    #[test]
    fn empty_call_has_no_arguments() {
        let nodes = tree("g()+1");
        let Node::Call(call) = &nodes[0] else {
            panic!("expected a call");
        };
        assert!(call.arguments.is_empty());
    }

    #[test]
    fn flatten_round_trips_text() {
        let source = "f(x,g(1,[2+y]))*-3";
        assert_eq!(concat_tokens(&flatten(&tree(source))), source);
    }

    #[test]
    fn empty_argument_is_rejected() {
        let tokens = tokenize("f(1,,2)").unwrap();
        assert_eq!(
            build_call_tree(&tokens, ConverterConfig::default()),
            Err(ParseError::EmptyArgument {
                name: "f".to_string(),
                position: 2
            })
        );
        let tokens = tokenize("f(1,)").unwrap();
        assert!(build_call_tree(&tokens, ConverterConfig::default()).is_err());
    }

    #[test]
    fn bracket_errors() {
        let tokens = tokenize("f(1").unwrap();
        assert!(matches!(
            build_call_tree(&tokens, ConverterConfig::default()),
            Err(ParseError::UnclosedBracket { .. })
        ));
        let tokens = tokenize("1)").unwrap();
        assert!(matches!(
            build_call_tree(&tokens, ConverterConfig::default()),
            Err(ParseError::UnmatchedClose { .. })
        ));
        let tokens = tokenize("f(1]").unwrap();
        assert!(build_call_tree(&tokens, ConverterConfig::default()).is_ok());
        assert!(build_call_tree(&tokens, ConverterConfig::strict()).is_err());
    }

    #[test]
    fn nesting_is_bounded() {
        let config = ConverterConfig {
            max_nesting: 3,
            ..ConverterConfig::default()
        };
        let tokens = tokenize("(((1)))").unwrap();
        assert!(build_call_tree(&tokens, config).is_ok());

        let tokens = tokenize("f([{(1)}])").unwrap();
        assert_eq!(
            build_call_tree(&tokens, config),
            Err(ParseError::NestingTooDeep {
                limit: 3,
                offset: 4
            })
        );

        let deep = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));
        let tokens = tokenize(&deep).unwrap();
        assert!(matches!(
            build_call_tree(&tokens, ConverterConfig::default()),
            Err(ParseError::NestingTooDeep { limit: 256, .. })
        ));
    }
}
