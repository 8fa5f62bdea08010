//! Execution graph: control points joined by operation-labeled transitions

use super::operation::Operation;
use crate::shared::models::{PointId, Span};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub to: PointId,
    pub op: Operation,
}

/// Adjacency-list graph with one designated root.
///
/// Outgoing transitions keep insertion order; trace enumeration relies on
/// it for deterministic results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Execution {
    root: PointId,
    point_count: u32,
    transitions: FxHashMap<PointId, Vec<Transition>>,
    references: FxHashMap<PointId, Span>,
}

impl Execution {
    /// Empty graph holding only the root point
    pub fn new() -> Self {
        Self {
            root: PointId::ROOT,
            point_count: 1,
            transitions: FxHashMap::default(),
            references: FxHashMap::default(),
        }
    }

    pub fn root(&self) -> PointId {
        self.root
    }

    pub fn point_count(&self) -> usize {
        self.point_count as usize
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }

    pub fn transitions_from(&self, point: PointId) -> &[Transition] {
        self.transitions
            .get(&point)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All `(from, transition)` pairs, sorted by source point
    pub fn edges(&self) -> Vec<(PointId, &Transition)> {
        let mut points: Vec<PointId> = self.transitions.keys().copied().collect();
        points.sort_unstable();
        points
            .into_iter()
            .flat_map(|from| self.transitions_from(from).iter().map(move |t| (from, t)))
            .collect()
    }

    pub fn reference(&self, point: PointId) -> Option<Span> {
        self.references.get(&point).copied()
    }

    pub fn contains_point(&self, point: PointId) -> bool {
        point.raw() < self.point_count
    }

    /// Allocate a fresh point, optionally tagged with a source span
    pub fn allocate_point(&mut self, span: Option<Span>) -> PointId {
        let point = PointId::new(self.point_count);
        self.point_count += 1;
        if let Some(span) = span {
            self.references.insert(point, span);
        }
        point
    }

    pub fn set_reference(&mut self, point: PointId, span: Span) {
        self.references.insert(point, span);
    }

    /// Raw edge insertion; self-loops and duplicates are allowed here
    pub fn insert_transition(&mut self, from: PointId, to: PointId, op: Operation) {
        self.transitions
            .entry(from)
            .or_default()
            .push(Transition { to, op });
    }

    pub(crate) fn has_transition(&self, from: PointId, to: PointId, op: &Operation) -> bool {
        self.transitions_from(from)
            .iter()
            .any(|t| t.to == to && &t.op == op)
    }
}

impl Default for Execution {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (from, transition) in self.edges() {
            write!(f, "{} -> {}: {}", from, transition.to, transition.op)?;
            if let Some(span) = self.reference(transition.to) {
                write!(f, "  @{}", span)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
