//! Function expansion over the call tree.
//!
//! Calls are rewritten innermost first. Each argument is expanded on its
//! own, then the callee body is tokenized, its argument names are replaced
//! by the parenthesised argument tokens (or the expanded default), and the
//! result is parsed and expanded again one level deeper. Reserved natives
//! are evaluated on the spot. The finished call becomes a parenthesised
//! group, so an expanded statement contains no calls. Warnings raised while
//! evaluating native arguments are collected and handed back with the
//! expanded tokens.

use std::mem;

use log::{debug, trace};
use mbc_ast::{flatten, is_reserved_name, CallNode, FunctionSpec, GroupNode, Node};
use mbc_env::FunctionTable;
use mbc_lexer::{tokenize, Bracket, Token};
use mbc_parser::{build_call_tree, ConverterConfig};

use crate::error::{EvalError, EvalWarning};
use crate::evaluator::evaluate_infix;
use crate::natives::call_native;

/// Limits applied while expanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandConfig {
    /// Deepest allowed chain of function bodies expanding into each other.
    pub max_depth: usize,
    pub converter: ConverterConfig,
}

impl Default for ExpandConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            converter: ConverterConfig::default(),
        }
    }
}

/// A statement with every call expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct Expansion {
    pub tokens: Vec<Token>,
    pub warnings: Vec<EvalWarning>,
}

/// Expands function calls against one function table.
pub struct Expander<'a> {
    functions: &'a FunctionTable,
    config: ExpandConfig,
    warnings: Vec<EvalWarning>,
}

impl<'a> Expander<'a> {
    pub fn new(functions: &'a FunctionTable, config: ExpandConfig) -> Self {
        Self {
            functions,
            config,
            warnings: Vec::new(),
        }
    }

    /// Returns `tokens` with every call replaced by its expansion.
    ///
    /// Bracket nesting is bounded by the call tree builder, so the walk over
    /// groups below recurses at most `converter.max_nesting` times per body.
    pub fn expand(&mut self, tokens: &[Token]) -> Result<Expansion, EvalError> {
        self.warnings.clear();
        let tree = build_call_tree(tokens, self.config.converter)?;
        let expanded = self.expand_nodes(tree, 0)?;
        Ok(Expansion {
            tokens: flatten(&expanded),
            warnings: mem::take(&mut self.warnings),
        })
    }

    fn expand_nodes(&mut self, nodes: Vec<Node>, depth: usize) -> Result<Vec<Node>, EvalError> {
        nodes
            .into_iter()
            .map(|node| match node {
                Node::Token(_) => Ok(node),
                Node::Group(group) => Ok(Node::Group(GroupNode {
                    body: self.expand_nodes(group.body, depth)?,
                    ..group
                })),
                Node::Call(call) => self.expand_call(call, depth),
            })
            .collect()
    }

    /// Tokenizes `text`, then parses and expands it at `depth`.
    fn expand_text(&mut self, text: &str, depth: usize) -> Result<Vec<Token>, EvalError> {
        let tokens = tokenize(text)?;
        self.expand_tokens(&tokens, depth)
    }

    fn expand_tokens(&mut self, tokens: &[Token], depth: usize) -> Result<Vec<Token>, EvalError> {
        let tree = build_call_tree(tokens, self.config.converter)?;
        Ok(flatten(&self.expand_nodes(tree, depth)?))
    }

    fn expand_call(&mut self, call: CallNode, depth: usize) -> Result<Node, EvalError> {
        if depth >= self.config.max_depth {
            return Err(EvalError::RecursionLimitExceeded {
                name: call.name,
                limit: self.config.max_depth,
            });
        }

        let offset = call.offset;
        let arguments = call
            .arguments
            .into_iter()
            .map(|argument| Ok(flatten(&self.expand_nodes(argument, depth)?)))
            .collect::<Result<Vec<_>, EvalError>>()?;

        let body = if is_reserved_name(&call.name) {
            vec![Node::Token(Token::number(
                self.call_native(&call.name, &arguments)?,
                offset,
            ))]
        } else {
            let functions = self.functions;
            let spec = functions
                .get(&call.name)
                .ok_or_else(|| EvalError::UndefinedFunction(call.name.clone()))?;
            self.instantiate(spec, arguments, depth)?
        };

        Ok(Node::Group(GroupNode {
            open: Bracket::Paren,
            close: Bracket::Paren,
            offset,
            body,
        }))
    }

    fn call_native(&mut self, name: &str, arguments: &[Vec<Token>]) -> Result<f64, EvalError> {
        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            let evaluation = evaluate_infix(argument, self.config.converter)?;
            self.warnings.extend(evaluation.warnings);
            values.push(evaluation.value);
        }
        call_native(name, &values)
    }

    /// Substitutes the arguments into the body of `spec` and expands it one
    /// level deeper.
    fn instantiate(
        &mut self,
        spec: &FunctionSpec,
        arguments: Vec<Vec<Token>>,
        depth: usize,
    ) -> Result<Vec<Node>, EvalError> {
        check_argument_count(spec, arguments.len())?;
        debug!("expanding {} at depth {}", spec.signature(), depth);

        let mut values = Vec::with_capacity(spec.arguments.len());
        let mut supplied = arguments.into_iter();
        for argument in &spec.arguments {
            let tokens = match (supplied.next(), &argument.default) {
                (Some(tokens), _) => tokens,
                (None, Some(default)) => self.expand_text(default, depth + 1)?,
                (None, None) => missing_required(spec)?,
            };
            values.push((argument.name.as_str(), tokens));
        }

        let body = tokenize(&spec.body)?;
        let mut substituted = Vec::with_capacity(body.len());
        for (index, token) in body.iter().enumerate() {
            let called = body.get(index + 1).is_some_and(Token::is_open_paren);
            let value = token
                .identifier_name()
                .filter(|_| !called)
                .and_then(|name| values.iter().find(|(arg, _)| *arg == name));
            match value {
                Some((_, tokens)) => {
                    substituted.push(Token::open(Bracket::Paren, token.offset));
                    substituted.extend(tokens.iter().cloned());
                    substituted.push(Token::close(Bracket::Paren, token.offset));
                }
                None => substituted.push(token.clone()),
            }
        }
        trace!("{} -> {}", spec.name, mbc_lexer::token::concat_tokens(&substituted));

        let tree = build_call_tree(&substituted, self.config.converter)?;
        self.expand_nodes(tree, depth + 1)
    }
}

fn check_argument_count(spec: &FunctionSpec, supplied: usize) -> Result<(), EvalError> {
    let declared = spec.arguments.len();
    let required = spec.required_count();
    if supplied > declared {
        return Err(EvalError::TooManyArguments {
            name: spec.name.clone(),
            declared,
            supplied,
        });
    }
    if supplied < required {
        return Err(EvalError::TooFewArguments {
            name: spec.name.clone(),
            required,
            optional: spec.optional_count(),
            supplied,
        });
    }
    Ok(())
}

/// Required arguments are all supplied once the count check has passed.
fn missing_required(spec: &FunctionSpec) -> Result<Vec<Token>, EvalError> {
    Err(EvalError::TooFewArguments {
        name: spec.name.clone(),
        required: spec.required_count(),
        optional: spec.optional_count(),
        supplied: 0,
    })
}
