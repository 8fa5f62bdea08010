//! Field-path closure over selector assignments
//!
//! Every path mentioned by an assignment is "interesting" on its identifier.
//! An interesting path below the target of `to = from` is also interesting
//! on `from` at the matching suffix, and the other way round. The closure is
//! computed with a worklist; the leaves of each identifier's interesting set
//! become its factorization rules.
//!
//! Recursive field cycles (`a = b.next; b = a`) would grow paths forever, so
//! propagated paths are capped at `max_path_depth` (or the longest seeded
//! path when that is longer).

use crate::config::FactorizationConfig;
use crate::features::execution::FieldPath;
use crate::features::factorization::domain::{leaf_paths, FactorizationRules, SelectorAssignment};
use crate::shared::models::ValueId;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Closure statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactorizationStats {
    pub assignments: usize,
    pub indexed: usize,
    pub interesting_paths: usize,
    /// Propagations dropped by the depth cap
    pub truncated: usize,
}

pub struct Factorizer {
    max_path_depth: usize,

    /// Assignments by target identifier (propagate to source)
    by_target: FxHashMap<ValueId, Vec<SelectorAssignment>>,

    /// Assignments by source identifier (propagate to target)
    by_source: FxHashMap<ValueId, Vec<SelectorAssignment>>,

    visited: FxHashSet<(ValueId, FieldPath)>,
    interesting: FxHashMap<ValueId, Vec<FieldPath>>,
    worklist: VecDeque<(ValueId, FieldPath)>,

    stats: FactorizationStats,
}

impl Factorizer {
    pub fn new(config: &FactorizationConfig) -> Self {
        Self {
            max_path_depth: config.max_path_depth,
            by_target: FxHashMap::default(),
            by_source: FxHashMap::default(),
            visited: FxHashSet::default(),
            interesting: FxHashMap::default(),
            worklist: VecDeque::new(),
            stats: FactorizationStats::default(),
        }
    }

    pub fn stats(&self) -> &FactorizationStats {
        &self.stats
    }

    /// Compute the rule set for one function's assignments
    pub fn factorize(&mut self, assignments: &[SelectorAssignment]) -> FactorizationRules {
        self.stats.assignments = assignments.len();
        self.index(assignments);

        let longest_seed = assignments
            .iter()
            .flat_map(|a| [a.from.path.len(), a.to.path.len()])
            .max()
            .unwrap_or(0);
        let depth_cap = self.max_path_depth.max(longest_seed);

        // Self-referential assignments still seed their paths
        for assignment in assignments {
            for selector in [&assignment.from, &assignment.to] {
                self.enqueue(selector.value, Vec::new());
                self.enqueue(selector.value, selector.path.clone());
            }
        }

        while let Some((value, path)) = self.worklist.pop_front() {
            self.propagate(value, &path, depth_cap);
        }

        let leaves: FxHashMap<ValueId, Vec<FieldPath>> = std::mem::take(&mut self.interesting)
            .into_iter()
            .map(|(value, paths)| (value, leaf_paths(paths)))
            .collect();

        tracing::debug!(
            assignments = self.stats.assignments,
            values = leaves.len(),
            paths = self.stats.interesting_paths,
            truncated = self.stats.truncated,
            "factorization complete"
        );

        FactorizationRules::new(leaves, self.stats.truncated > 0)
    }

    fn index(&mut self, assignments: &[SelectorAssignment]) {
        for assignment in assignments {
            if assignment.from.is_blank() || assignment.to.is_blank() {
                continue;
            }
            if assignment.is_self_referential() {
                continue;
            }
            self.by_target
                .entry(assignment.to.value)
                .or_default()
                .push(assignment.clone());
            self.by_source
                .entry(assignment.from.value)
                .or_default()
                .push(assignment.clone());
            self.stats.indexed += 1;
        }
    }

    fn enqueue(&mut self, value: ValueId, path: FieldPath) {
        if value.is_blank() {
            return;
        }
        let entry = (value, path);
        if self.visited.contains(&entry) {
            return;
        }
        self.visited.insert(entry.clone());
        self.interesting
            .entry(entry.0)
            .or_default()
            .push(entry.1.clone());
        self.stats.interesting_paths += 1;
        self.worklist.push_back(entry);
    }

    fn propagate(&mut self, value: ValueId, path: &[String], depth_cap: usize) {
        let mut discovered: Vec<(ValueId, FieldPath)> = Vec::new();

        if let Some(assignments) = self.by_target.get(&value) {
            for assignment in assignments {
                if let Some(suffix) = path.strip_prefix(assignment.to.path.as_slice()) {
                    discovered.push((assignment.from.value, join(&assignment.from.path, suffix)));
                }
            }
        }
        if let Some(assignments) = self.by_source.get(&value) {
            for assignment in assignments {
                if let Some(suffix) = path.strip_prefix(assignment.from.path.as_slice()) {
                    discovered.push((assignment.to.value, join(&assignment.to.path, suffix)));
                }
            }
        }

        for (next, next_path) in discovered {
            if next_path.len() > depth_cap {
                self.stats.truncated += 1;
                continue;
            }
            self.enqueue(next, next_path);
        }
    }
}

fn join(prefix: &[String], suffix: &[String]) -> FieldPath {
    let mut path = Vec::with_capacity(prefix.len() + suffix.len());
    path.extend_from_slice(prefix);
    path.extend_from_slice(suffix);
    path
}
