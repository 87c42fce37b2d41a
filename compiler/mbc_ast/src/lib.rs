//! Call tree for the mbc expression language.
//!
//! Statements are kept as flat token sequences everywhere except during
//! function expansion, where they are lifted into a shallow tree: plain
//! tokens, bracketed groups and function calls with one sub-tree per
//! argument. This crate defines those nodes, the [`FunctionSpec`] records
//! the function table stores, and a visitor for walking the tree.

pub mod ast;
pub mod function;
pub mod visit;

// Re-export commonly used types
pub use ast::{contains_call, flatten, CallNode, GroupNode, Node};
pub use function::{is_reserved_name, ArgumentSpec, FunctionSpec};
pub use visit::{VisitError, VisitResult, Visitable, Visitor};
