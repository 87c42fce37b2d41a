use mbc_lexer::{Bracket, Token};

/// A node of the call tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Any token that is not a bracket: number, identifier, operator, comma, `=`.
    Token(Token),
    /// A bracketed sub-expression that is not a call.
    Group(GroupNode),
    /// `name(arg, arg, ...)`
    Call(CallNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupNode {
    pub open: Bracket,
    pub close: Bracket,
    pub offset: usize,
    pub body: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
    pub name: String,
    pub offset: usize,
    /// One sub-tree per top-level comma separated argument; empty for `f()`.
    pub arguments: Vec<Vec<Node>>,
}

impl Node {
    /// Appends the token form of this node to `out`.
    pub fn flatten_into(&self, out: &mut Vec<Token>) {
        match self {
            Node::Token(token) => out.push(token.clone()),
            Node::Group(group) => {
                out.push(Token::open(group.open, group.offset));
                for node in &group.body {
                    node.flatten_into(out);
                }
                out.push(Token::close(group.close, group.offset));
            }
            Node::Call(call) => {
                out.push(Token::identifier(call.name.clone(), call.offset));
                out.push(Token::open(Bracket::Paren, call.offset));
                for (index, argument) in call.arguments.iter().enumerate() {
                    if index > 0 {
                        out.push(Token::new(mbc_lexer::TokenType::Comma, ",", call.offset));
                    }
                    for node in argument {
                        node.flatten_into(out);
                    }
                }
                out.push(Token::close(Bracket::Paren, call.offset));
            }
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(self, Node::Call(_))
    }
}

/// Token form of a node sequence.
pub fn flatten(nodes: &[Node]) -> Vec<Token> {
    let mut out = Vec::new();
    for node in nodes {
        node.flatten_into(&mut out);
    }
    out
}

/// Returns `true` if any node of the sequence, at any depth, is a call.
pub fn contains_call(nodes: &[Node]) -> bool {
    nodes.iter().any(|node| match node {
        Node::Token(_) => false,
        Node::Group(group) => contains_call(&group.body),
        Node::Call(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbc_lexer::token::concat_tokens;
    use mbc_lexer::Operator;
    use pretty_assertions::assert_eq;

    fn number(value: f64) -> Node {
        Node::Token(Token::number(value, 0))
    }

    #[test]
    fn flatten_restores_statement_text() {
        let nodes = vec![
            Node::Call(CallNode {
                name: "pow".to_string(),
                offset: 0,
                arguments: vec![vec![number(2.0)], vec![number(3.0)]],
            }),
            Node::Token(Token::operator(Operator::Add, 0)),
            Node::Group(GroupNode {
                open: Bracket::Square,
                close: Bracket::Square,
                offset: 0,
                body: vec![number(1.0)],
            }),
        ];

        assert_eq!(concat_tokens(&flatten(&nodes)), "pow(2,3)+[1]");
        assert!(contains_call(&nodes));
        assert!(!contains_call(&nodes[1..]));
    }
}
