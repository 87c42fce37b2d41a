//! Visitor pattern implementation for traversing the call tree.
//!
//! A [`Visitor`] gets one callback per node kind. The default callbacks walk
//! into children, so an implementation only overrides what it cares about.

use mbc_lexer::Token;

use crate::ast::{CallNode, GroupNode, Node};

/// The result type for visitor operations.
pub type VisitResult<T = ()> = Result<T, VisitError>;

/// An error that can occur during tree traversal.
#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    /// An error tied to a byte offset in the statement.
    #[error("{message} at offset {offset}")]
    Located { message: String, offset: usize },
}

impl VisitError {
    pub fn located<T: Into<String>>(msg: T, offset: usize) -> Self {
        VisitError::Located {
            message: msg.into(),
            offset,
        }
    }
}

/// A trait for types that can be visited by a `Visitor`.
pub trait Visitable {
    /// Accepts a visitor and calls the appropriate visit method.
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output>;
}

impl Visitable for Node {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        match self {
            Node::Token(token) => visitor.visit_token(token),
            Node::Group(group) => visitor.visit_group(group),
            Node::Call(call) => visitor.visit_call(call),
        }
    }
}

impl Visitable for [Node] {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> VisitResult<V::Output> {
        for node in self {
            node.accept(visitor)?;
        }
        Ok(Default::default())
    }
}

/// A visitor for traversing the call tree.
pub trait Visitor {
    /// The output type of the visitor.
    type Output: Default;

    fn visit_token(&mut self, _token: &Token) -> VisitResult<Self::Output> {
        Ok(Default::default())
    }

    fn visit_group(&mut self, node: &GroupNode) -> VisitResult<Self::Output> {
        node.body.accept(self)
    }

    fn visit_call(&mut self, node: &CallNode) -> VisitResult<Self::Output> {
        for argument in &node.arguments {
            argument.accept(self)?;
        }
        Ok(Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbc_lexer::{Bracket, Operator};
    use pretty_assertions::assert_eq;

    /// Counts identifiers and calls, failing on a call named `boom`.
    #[derive(Default)]
    struct Counter {
        identifiers: usize,
        calls: usize,
    }

    impl Visitor for Counter {
        type Output = ();

        fn visit_token(&mut self, token: &Token) -> VisitResult {
            if token.identifier_name().is_some() {
                self.identifiers += 1;
            }
            Ok(())
        }

        fn visit_call(&mut self, node: &CallNode) -> VisitResult {
            if node.name == "boom" {
                return Err(VisitError::located("boom", node.offset));
            }
            self.calls += 1;
            for argument in &node.arguments {
                argument.accept(self)?;
            }
            Ok(())
        }
    }

    fn ident(name: &str) -> Node {
        Node::Token(Token::identifier(name, 0))
    }

    #[test]
    fn walks_groups_and_arguments() {
        let tree = vec![
            ident("a"),
            Node::Token(Token::operator(Operator::Add, 1)),
            Node::Group(GroupNode {
                open: Bracket::Paren,
                close: Bracket::Paren,
                offset: 2,
                body: vec![Node::Call(CallNode {
                    name: "f".to_string(),
                    offset: 3,
                    arguments: vec![vec![ident("b")], vec![ident("c")]],
                })],
            }),
        ];

        let mut counter = Counter::default();
        tree.accept(&mut counter).unwrap();
        assert_eq!(counter.identifiers, 3);
        assert_eq!(counter.calls, 1);
    }

    #[test]
    fn errors_stop_the_walk() {
        let tree = vec![Node::Call(CallNode {
            name: "boom".to_string(),
            offset: 7,
            arguments: vec![],
        })];
        let err = tree.accept(&mut Counter::default()).unwrap_err();
        assert_eq!(err.to_string(), "boom at offset 7");
    }
}
