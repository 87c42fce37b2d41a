//! Parsing stages that sit between the lexer and the evaluator.
//!
//! - [`statement`]: splitting a loaded batch into statements, whitespace and
//!   comment cleanup, bracket/quote balance checks.
//! - [`definition`]: the `name(args):body"description"` form.
//! - [`call_tree`]: lifting a token sequence into a tree of calls and groups.
//! - [`postfix`]: shunting-yard conversion of infix tokens to postfix.

pub mod call_tree;
pub mod definition;
pub mod error;
pub mod postfix;
pub mod statement;
