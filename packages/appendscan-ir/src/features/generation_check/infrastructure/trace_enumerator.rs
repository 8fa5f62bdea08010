//! Bounded trace enumeration
//!
//! Depth-first walk from the root. Every transition into a point counts as
//! one visit of that point along the current trace; a transition is only
//! taken while its target has fewer than `repeat_limit` visits. A point from
//! which no transition can be taken ends a trace.
//!
//! The walk keeps an explicit frame stack so deeply unrolled loops cannot
//! overflow the call stack.

use crate::config::TraceConfig;
use crate::errors::Result;
use crate::features::execution::{Execution, Transition};
use crate::shared::models::PointId;
use rustc_hash::FxHashMap;

/// One path through the graph, in order
pub type Trace<'a> = Vec<&'a Transition>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    pub traces: usize,
    pub longest: usize,
    /// Stopped early at `max_traces`
    pub budget_exhausted: bool,
}

struct Frame {
    point: PointId,
    next: usize,
    advanced: bool,
}

pub struct TraceEnumerator<'a> {
    execution: &'a Execution,
    repeat_limit: u32,
    max_traces: Option<usize>,
}

impl<'a> TraceEnumerator<'a> {
    pub fn new(execution: &'a Execution, config: &TraceConfig) -> Self {
        Self {
            execution,
            repeat_limit: config.repeat_limit,
            max_traces: config.max_traces,
        }
    }

    /// Call `visit` with every trace, in depth-first order
    pub fn for_each<F>(&self, mut visit: F) -> Result<TraceStats>
    where
        F: FnMut(&[&'a Transition]) -> Result<()>,
    {
        let mut stats = TraceStats::default();
        let mut visits: FxHashMap<PointId, u32> = FxHashMap::default();
        let mut path: Trace<'a> = Vec::new();
        let mut stack = vec![Frame {
            point: self.execution.root(),
            next: 0,
            advanced: false,
        }];

        while let Some(frame) = stack.last_mut() {
            let transitions = self.execution.transitions_from(frame.point);
            let mut chosen = None;
            while let Some(transition) = transitions.get(frame.next) {
                frame.next += 1;
                if visits.get(&transition.to).copied().unwrap_or(0) < self.repeat_limit {
                    chosen = Some(transition);
                    break;
                }
            }

            if let Some(transition) = chosen {
                frame.advanced = true;
                *visits.entry(transition.to).or_insert(0) += 1;
                path.push(transition);
                stack.push(Frame {
                    point: transition.to,
                    next: 0,
                    advanced: false,
                });
                continue;
            }

            let finished = !frame.advanced;
            stack.pop();
            if finished {
                if self.max_traces.is_some_and(|max| stats.traces >= max) {
                    stats.budget_exhausted = true;
                    tracing::warn!(
                        traces = stats.traces,
                        "trace budget exhausted, remaining paths skipped"
                    );
                    break;
                }
                visit(&path)?;
                stats.traces += 1;
                stats.longest = stats.longest.max(path.len());
            }
            if let Some(last) = path.pop() {
                if let Some(count) = visits.get_mut(&last.to) {
                    *count -= 1;
                }
            }
        }

        tracing::debug!(
            traces = stats.traces,
            longest = stats.longest,
            "trace enumeration complete"
        );
        Ok(stats)
    }
}

/// Collect every trace of `execution`
pub fn generate_traces<'a>(execution: &'a Execution, config: &TraceConfig) -> Vec<Trace<'a>> {
    let mut traces = Vec::new();
    // The visitor never fails
    let _ = TraceEnumerator::new(execution, config).for_each(|trace| {
        traces.push(trace.to_vec());
        Ok(())
    });
    traces
}
