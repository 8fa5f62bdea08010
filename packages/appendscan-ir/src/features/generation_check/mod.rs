//! Generation check: the bug oracle
//!
//! Bounded traces through the primitive execution are replayed one at a
//! time. Each trace tracks an (origin, generation) lineage per value; a
//! growth step that fails to move past the highest generation already
//! reached for its origin means two derivations share backing storage.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{check_execution, validate_execution, ValidationReport};
pub use domain::{Lineage, Origin, TraceConflict, ValidationStats, ValidationWarning};
pub use infrastructure::{
    generate_traces, validate_trace, GenerationValidator, Trace, TraceEnumerator, TraceStats,
};
