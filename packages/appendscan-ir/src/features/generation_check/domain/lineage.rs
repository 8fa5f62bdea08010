//! Lineage bookkeeping for one trace

use crate::shared::models::{PointId, ValueId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a lineage starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// A tracked value seen before any assignment defined it
    Value(ValueId),
    /// A value assigned from blank (unknown provenance)
    Fresh(u32),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{}", value),
            Self::Fresh(n) => write!(f, "fresh#{}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lineage {
    pub origin: Origin,
    pub generation: i64,
}

impl Lineage {
    pub fn new(origin: Origin, generation: i64) -> Self {
        Self { origin, generation }
    }
}

/// A growth step that did not move past its origin's highest generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceConflict {
    /// Destination point of the offending primitive edge
    pub point: PointId,
    pub origin: Origin,
    /// Primitive source of the offending edge
    pub source: ValueId,
}
