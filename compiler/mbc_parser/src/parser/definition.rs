//! Function definitions: `name(arg,arg=default):body"description"`.
//!
//! The header (`name(...)` followed by `:`) is what tells a definition apart
//! from an expression. The argument list may hold defaults that contain
//! brackets and commas of their own, so it is split at top-level commas
//! only.

use log::debug;
use mbc_ast::{
    is_reserved_name, ArgumentSpec, CallNode, FunctionSpec, VisitError, VisitResult, Visitable,
    Visitor,
};
use mbc_lexer::{is_valid_name, tokenize, Token};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_while},
    character::complete::{alpha1, char},
    combinator::{eof, opt, recognize},
    error::{Error as NomError, ErrorKind},
    sequence::{delimited, pair, terminated, tuple},
    IResult,
};

use super::call_tree::build_call_tree;
use super::error::{DefinitionError, ParseError};
use super::postfix::ConverterConfig;

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

/// `(` ... `)` with nested parentheses; yields the inner text.
fn parenthesized(input: &str) -> IResult<&str, &str> {
    let (rest, _) = char('(')(input)?;
    let mut depth = 1usize;
    for (index, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&rest[index + 1..], &rest[..index]));
                }
            }
            _ => {}
        }
    }
    Err(nom::Err::Error(NomError::new(input, ErrorKind::Char)))
}

/// `name(args):`
fn header(input: &str) -> IResult<&str, (&str, &str)> {
    let (rest, (name, arguments, _)) = tuple((identifier, parenthesized, char(':')))(input)?;
    Ok((rest, (name, arguments)))
}

/// `body"description"` up to the end of the statement.
fn body_and_description(input: &str, delimiter: char) -> IResult<&str, (&str, Option<&str>)> {
    terminated(
        pair(
            take_till(move |c| c == delimiter),
            opt(delimited(
                char(delimiter),
                take_till(move |c| c == delimiter),
                char(delimiter),
            )),
        ),
        eof,
    )(input)
}

/// Returns `true` when the statement has a definition header.
pub fn is_definition(statement: &str) -> bool {
    header(statement).is_ok()
}

/// Splits `text` on commas that are not nested in any bracket.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn parse_arguments(function: &str, text: &str) -> Result<Vec<ArgumentSpec>, DefinitionError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut arguments: Vec<ArgumentSpec> = Vec::new();
    for part in split_top_level(text) {
        if part.is_empty() {
            return Err(DefinitionError::EmptyArgument(function.to_string()));
        }
        let (name, default) = match part.split_once('=') {
            Some((name, default)) => (name, Some(default)),
            None => (part, None),
        };
        if !is_valid_name(name) || is_reserved_name(name) {
            return Err(DefinitionError::InvalidArgument {
                function: function.to_string(),
                argument: part.to_string(),
            });
        }
        if arguments.iter().any(|arg| arg.name == name) {
            return Err(DefinitionError::DuplicateArgument {
                function: function.to_string(),
                argument: name.to_string(),
            });
        }
        let argument = match default {
            Some("") => {
                return Err(DefinitionError::InvalidArgument {
                    function: function.to_string(),
                    argument: part.to_string(),
                })
            }
            Some(default) => ArgumentSpec::optional(name, default),
            None => {
                if arguments.iter().any(ArgumentSpec::is_optional) {
                    return Err(DefinitionError::DefaultOrder {
                        function: function.to_string(),
                        argument: name.to_string(),
                    });
                }
                ArgumentSpec::required(name)
            }
        };
        arguments.push(argument);
    }
    Ok(arguments)
}

/// Parses a definition statement. Returns `None` when the statement has no
/// definition header, i.e. it is an expression.
///
/// This checks the shape of the definition only; names used in the body are
/// checked against the function table by [`validate_definition`].
pub fn parse_definition(
    statement: &str,
    delimiter: char,
) -> Option<Result<FunctionSpec, DefinitionError>> {
    let (rest, (name, arguments)) = header(statement).ok()?;
    Some(build_spec(statement, rest, name, arguments, delimiter))
}

fn build_spec(
    statement: &str,
    rest: &str,
    name: &str,
    arguments: &str,
    delimiter: char,
) -> Result<FunctionSpec, DefinitionError> {
    if is_reserved_name(name) {
        return Err(DefinitionError::ReservedName(name.to_string()));
    }
    if !is_valid_name(name) {
        return Err(DefinitionError::InvalidName(name.to_string()));
    }

    let arguments = parse_arguments(name, arguments)?;

    let (_, (body, description)) = body_and_description(rest, delimiter)
        .map_err(|_| DefinitionError::Malformed(statement.to_string()))?;
    if body.is_empty() {
        return Err(DefinitionError::EmptyBody(name.to_string()));
    }

    debug!("parsed definition of '{}' with {} argument(s)", name, arguments.len());
    Ok(FunctionSpec::new(
        name,
        arguments,
        body,
        description.unwrap_or_default(),
    ))
}

/// Walks a body and stops at the first name that is neither a declared
/// argument nor a callable function.
struct NameCheck<'a, F> {
    function: &'a str,
    arguments: &'a [String],
    is_function: F,
    failure: Option<DefinitionError>,
}

impl<F> NameCheck<'_, F> {
    fn fail(&mut self, err: DefinitionError, offset: usize) -> VisitResult {
        let message = err.to_string();
        self.failure = Some(err);
        Err(VisitError::located(message, offset))
    }
}

impl<F: Fn(&str) -> bool> Visitor for NameCheck<'_, F> {
    type Output = ();

    fn visit_token(&mut self, token: &Token) -> VisitResult {
        match token.identifier_name() {
            Some(name) if !self.arguments.iter().any(|arg| arg == name) => {
                let err = DefinitionError::UnknownIdentifier {
                    function: self.function.to_string(),
                    identifier: name.to_string(),
                };
                self.fail(err, token.offset)
            }
            _ => Ok(()),
        }
    }

    fn visit_call(&mut self, node: &CallNode) -> VisitResult {
        if !(self.is_function)(&node.name) {
            let err = DefinitionError::UnknownFunction {
                function: self.function.to_string(),
                callee: node.name.clone(),
            };
            return self.fail(err, node.offset);
        }
        for argument in &node.arguments {
            argument.accept(self)?;
        }
        Ok(())
    }
}

/// Checks that every identifier in `text` is one of `arguments`, and that
/// every call names something `is_function` accepts.
fn check_names<F: Fn(&str) -> bool>(
    function: &str,
    text: &str,
    arguments: &[String],
    is_function: F,
    config: ConverterConfig,
) -> Result<(), DefinitionError> {
    let body_error = |source: ParseError| DefinitionError::Body {
        function: function.to_string(),
        source,
    };
    let tokens = tokenize(text).map_err(|err| body_error(err.into()))?;
    let tree = build_call_tree(&tokens, config).map_err(body_error)?;

    let mut check = NameCheck {
        function,
        arguments,
        is_function,
        failure: None,
    };
    match tree.accept(&mut check) {
        Ok(()) => Ok(()),
        Err(err) => {
            debug!("name check of '{}' stopped: {}", function, err);
            Err(check
                .failure
                .take()
                .unwrap_or_else(|| DefinitionError::Malformed(err.to_string())))
        }
    }
}

/// Validates the names used in a parsed definition: the body may refer to
/// its own arguments and call functions accepted by `is_function`; each
/// default may only call functions.
pub fn validate_definition<F: Fn(&str) -> bool>(
    spec: &FunctionSpec,
    is_function: F,
    config: ConverterConfig,
) -> Result<(), DefinitionError> {
    let names: Vec<String> = spec.arguments.iter().map(|arg| arg.name.clone()).collect();
    check_names(&spec.name, &spec.body, &names, &is_function, config)?;
    for default in spec.arguments.iter().filter_map(|arg| arg.default.as_deref()) {
        check_names(&spec.name, default, &[], &is_function, config)?;
    }
    Ok(())
}
