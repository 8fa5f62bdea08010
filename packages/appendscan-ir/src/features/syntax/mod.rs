//! Syntax tree handed over by the front end
//!
//! The core never parses source text. A front end walks its own AST and
//! produces these nodes, each carrying its source span.

pub mod domain;

pub use domain::*;
