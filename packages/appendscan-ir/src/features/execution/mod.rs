//! Execution graphs
//!
//! A function body becomes a graph of numbered control points whose edges
//! carry [`Operation`]s. The same structure holds both the rich graph built
//! from syntax and the primitive graph produced by lowering.

pub mod domain;
pub mod infrastructure;

pub use domain::{
    Composition, Embed, Execution, FieldPath, GenDelta, Operation, Selector, Transition,
};
pub use infrastructure::ExecutionBuilder;
