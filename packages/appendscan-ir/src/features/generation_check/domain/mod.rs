mod lineage;
mod warning;

pub use lineage::{Lineage, Origin, TraceConflict};
pub use warning::{ValidationStats, ValidationWarning};
