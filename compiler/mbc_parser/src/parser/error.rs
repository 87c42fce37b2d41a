use mbc_lexer::LexError;
use thiserror::Error;

/// Errors raised while building a call tree or converting to postfix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("closing '{bracket}' at offset {offset} has no matching opening bracket")]
    UnmatchedClose { bracket: char, offset: usize },

    #[error("opening '{bracket}' at offset {offset} is never closed")]
    UnclosedBracket { bracket: char, offset: usize },

    #[error("'{open}' at offset {offset} is closed by '{close}'")]
    MismatchedBracket {
        open: char,
        close: char,
        offset: usize,
    },

    #[error("brackets nested deeper than {limit} levels at offset {offset}")]
    NestingTooDeep { limit: usize, offset: usize },

    #[error("argument {position} of call to '{name}' is empty")]
    EmptyArgument { name: String, position: usize },
}

/// Bracket or quote counts that cannot balance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("unbalanced brackets: {opens} '{open}' against {closes} '{close}'")]
    UnbalancedBrackets {
        open: char,
        close: char,
        opens: usize,
        closes: usize,
    },

    #[error("unbalanced quotes: {count} '{delimiter}' found")]
    UnbalancedQuotes { delimiter: char, count: usize },
}

/// Reasons a `name(args):body` statement is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error("malformed function definition '{0}'")]
    Malformed(String),

    #[error("invalid function name '{0}'")]
    InvalidName(String),

    #[error("'{0}' is a reserved name")]
    ReservedName(String),

    #[error("invalid argument name '{argument}' in definition of '{function}'")]
    InvalidArgument { function: String, argument: String },

    #[error("empty argument in definition of '{0}'")]
    EmptyArgument(String),

    #[error("argument '{argument}' is declared twice in definition of '{function}'")]
    DuplicateArgument { function: String, argument: String },

    #[error("argument '{argument}' of '{function}' has no default but follows a defaulted argument")]
    DefaultOrder { function: String, argument: String },

    #[error("function '{0}' has an empty body")]
    EmptyBody(String),

    #[error("unknown identifier '{identifier}' in definition of '{function}'")]
    UnknownIdentifier { function: String, identifier: String },

    #[error("unknown function '{callee}' called in definition of '{function}'")]
    UnknownFunction { function: String, callee: String },

    #[error("in definition of '{function}': {source}")]
    Body {
        function: String,
        #[source]
        source: ParseError,
    },
}
