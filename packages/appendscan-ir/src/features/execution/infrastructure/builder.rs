//! Cursor over an execution under construction
//!
//! The builder owns the graph and a current point. Appending an operation
//! moves the cursor to a new point; connecting closes an edge to an existing
//! one (branch merge, loop back-edge). Branching is done by saving the
//! cursor with [`ExecutionBuilder::current`] and restoring it later.

use crate::errors::{AnalysisError, Result};
use crate::features::execution::domain::{Execution, Operation};
use crate::shared::models::{PointId, Span};

#[derive(Debug)]
pub struct ExecutionBuilder {
    execution: Execution,
    current: PointId,
}

impl ExecutionBuilder {
    pub fn new(root_span: Option<Span>) -> Self {
        let mut execution = Execution::new();
        if let Some(span) = root_span {
            execution.set_reference(execution.root(), span);
        }
        Self {
            current: execution.root(),
            execution,
        }
    }

    pub fn current(&self) -> PointId {
        self.current
    }

    pub fn set_current(&mut self, point: PointId) {
        self.current = point;
    }

    pub fn execution(&self) -> &Execution {
        &self.execution
    }

    /// Reserve a point without connecting it
    pub fn acquire_point(&mut self, span: Option<Span>) -> PointId {
        self.execution.allocate_point(span)
    }

    /// Append `op` to a new point and move there
    pub fn apply(&mut self, op: Operation, span: Option<Span>) -> PointId {
        let next = self.execution.allocate_point(span);
        self.execution.insert_transition(self.current, next, op);
        self.current = next;
        next
    }

    /// Append `op` as an edge into an existing point and move there
    pub fn apply_to(&mut self, op: Operation, to: PointId) -> Result<()> {
        if to == self.current {
            return Err(AnalysisError::internal(format!(
                "self edge requested at {} for {}",
                to,
                op.kind_name()
            )));
        }
        self.execution.insert_transition(self.current, to, op);
        self.current = to;
        Ok(())
    }

    /// No-op edge into an existing point; identical edges are coalesced
    pub fn connect_to(&mut self, to: PointId) -> Result<()> {
        if self.execution.has_transition(self.current, to, &Operation::NoOp) {
            self.current = to;
            return Ok(());
        }
        self.apply_to(Operation::NoOp, to)
    }

    /// Continue from a fresh unreachable point (code after `return`)
    pub fn detach(&mut self) {
        self.current = self.execution.allocate_point(None);
    }

    pub fn finish(self) -> Execution {
        self.execution
    }
}
