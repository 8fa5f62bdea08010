//! Feature slices
//!
//! Ordered leaves first: the syntax tree and operation model feed the graph
//! builder, whose output is lowered and finally checked for generation
//! conflicts.

pub mod execution;
pub mod factorization;
pub mod function_summary;
pub mod generation_check;
pub mod graph_builder;
pub mod lowering;
pub mod syntax;
