//! Core models: source positions and the identifier newtypes

mod ids;
mod span;

pub use ids::{FuncId, PointId, ValueId};
pub use span::{Location, Span};
