//! Reported findings

use crate::features::execution::Selector;
use crate::shared::models::{PointId, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A generation conflict mapped back to the rich execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Rich control point the conflicting edge leads to
    pub point: PointId,
    pub span: Option<Span>,
    /// `None` when the origin is an anonymous fresh value
    pub origin: Option<Selector>,
    /// Rich selector whose stale generation was grown again
    pub value: Option<Selector>,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{}: ", span)?,
            None => write!(f, "{}: ", self.point)?,
        }
        f.write_str("append result may share backing storage with an earlier append")?;
        if let Some(value) = &self.value {
            write!(f, " of {}", value)?;
        }
        if let Some(origin) = &self.origin {
            write!(f, " (origin {})", origin)?;
        }
        Ok(())
    }
}

/// Sizes observed while checking one function
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub rich_points: usize,
    pub primitive_points: usize,
    pub primitive_transitions: usize,
    pub traces: usize,
    /// Enumeration stopped at `max_traces`
    pub trace_budget_exhausted: bool,
    /// Conflicts before deduplication
    pub conflicts: usize,
}
