use mbc_env::EnvError;
use mbc_eval::{EvalError, EvalWarning};
use mbc_lexer::LexError;
use mbc_parser::{DefinitionError, StructureError};
use thiserror::Error;

/// Everything a statement can fail with. The engine renders these into its
/// error text; they never escape [`crate::Engine`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Structure(#[from] StructureError),

    #[error(transparent)]
    Definition(#[from] DefinitionError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("no expression after '='")]
    EmptyExpression,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineWarning {
    #[error(transparent)]
    Eval(#[from] EvalWarning),

    #[error("invalid assignment target '{0}'")]
    InvalidTarget(String),
}
