//! Function summaries
//!
//! Declarative contracts describing how a call's outputs alias its inputs
//! and how far their generation moves. Two built-ins cover bounded
//! re-slicing and `append`; callers register more through the registry or
//! the YAML configuration.

pub mod domain;
pub mod infrastructure;

pub use domain::{
    BoundAssignment, FunctionSummary, InputRef, InputSlot, Outcome, OutputComponent, OutputSlot,
};
pub use infrastructure::{FunctionSummaryRegistry, APPEND_NAME, SLICE_NAME};
