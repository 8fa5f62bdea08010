//! Graph builder: syntax tree → rich execution graph
//!
//! Walks one function body with a lexical [`Scopes`] table and an
//! [`ExecutionBuilder`](crate::features::execution::ExecutionBuilder)
//! cursor, emitting selector assignments, call effects and returns.

pub mod domain;
pub mod infrastructure;

pub use domain::{Scopes, BLANK_NAME};
pub use infrastructure::{build_execution, ExecutionFromSyntax};
