use mbc_lexer::{LexError, Operator};
use mbc_parser::ParseError;
use thiserror::Error;

/// Errors raised while expanding or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("operator '{0}' is missing an operand")]
    MissingOperand(Operator),

    #[error("unresolved identifier '{0}'")]
    UnresolvedIdentifier(String),

    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("undefined function '{0}'")]
    UndefinedFunction(String),

    #[error("unknown reserved function '{0}'")]
    UnknownReservedName(String),

    #[error("too many arguments for '{name}': expected at most {declared}, got {supplied}")]
    TooManyArguments {
        name: String,
        declared: usize,
        supplied: usize,
    },

    #[error(
        "too few arguments for '{name}': expected at least {required}, got {supplied}{}",
        optional_note(.optional)
    )]
    TooFewArguments {
        name: String,
        required: usize,
        optional: usize,
        supplied: usize,
    },

    #[error("'{name}' takes {expected} argument(s), got {supplied}")]
    NativeArity {
        name: String,
        expected: usize,
        supplied: usize,
    },

    #[error("expansion of '{name}' exceeds the nesting limit of {limit}")]
    RecursionLimitExceeded { name: String, limit: usize },
}

impl From<LexError> for EvalError {
    fn from(err: LexError) -> Self {
        EvalError::Parse(err.into())
    }
}

fn optional_note(optional: &usize) -> String {
    match optional {
        0 => String::new(),
        1 => " (1 further argument is optional)".to_string(),
        n => format!(" ({n} further arguments are optional)"),
    }
}

/// Non-fatal conditions noticed during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalWarning {
    #[error("multiple results: {0} values left on the stack, using the last")]
    MultipleResults(usize),
}
