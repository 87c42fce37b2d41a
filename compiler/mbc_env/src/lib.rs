//! Runtime environment of an engine session: the variable table and the
//! function table, plus the immutable reference definitions the function
//! table is seeded from and reset to.

pub mod builtins;
pub mod functions;
pub mod variables;

pub use builtins::{reference_function, REFERENCE_FUNCTIONS};
pub use functions::{Definition, EnvError, FunctionTable};
pub use variables::VariableTable;
