//! Factorization rule set
//!
//! Maps each identifier to its leaf paths: the minimal antichain (under the
//! prefix order) covering every path any assignment mentions.

use crate::errors::{AnalysisError, Result};
use crate::features::execution::{FieldPath, Selector};
use crate::shared::models::ValueId;
use rustc_hash::FxHashMap;

/// `to = from`, the unit the factorizer works on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorAssignment {
    pub from: Selector,
    pub to: Selector,
}

impl SelectorAssignment {
    pub fn new(from: Selector, to: Selector) -> Self {
        Self { from, to }
    }

    pub fn is_self_referential(&self) -> bool {
        self.from.value == self.to.value
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactorizationRules {
    leaves: FxHashMap<ValueId, Vec<FieldPath>>,
    truncated: bool,
}

impl FactorizationRules {
    pub fn new(leaves: FxHashMap<ValueId, Vec<FieldPath>>, truncated: bool) -> Self {
        Self { leaves, truncated }
    }

    /// Whether the depth cap cut some propagation short; leaf sets of
    /// aliased identifiers may then disagree below the cap
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Sorted leaf paths of `value`, if any assignment mentions it
    pub fn leaves(&self, value: ValueId) -> Option<&[FieldPath]> {
        self.leaves.get(&value).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Expand a selector into the leaf selectors beneath it.
    ///
    /// Identifiers no assignment mentions are returned unchanged.
    pub fn factorize_selector(&self, selector: &Selector) -> Result<Vec<Selector>> {
        let Some(paths) = self.leaves.get(&selector.value) else {
            return Ok(vec![selector.clone()]);
        };
        let covered: Vec<Selector> = paths
            .iter()
            .filter(|path| path.starts_with(&selector.path))
            .map(|path| Selector::new(selector.value, path.clone()))
            .collect();
        if covered.is_empty() {
            return Err(AnalysisError::internal(format!(
                "no factorization leaf of {} covers {}",
                selector.value, selector
            )));
        }
        Ok(covered)
    }
}

/// Sort, dedup and keep only paths no other path extends
pub fn leaf_paths(mut paths: Vec<FieldPath>) -> Vec<FieldPath> {
    paths.sort();
    paths.dedup();

    // Extensions of a path sort directly after it
    let mut leaves = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        match paths.get(i + 1) {
            Some(next) if next.starts_with(path) => continue,
            _ => leaves.push(path.clone()),
        }
    }
    leaves
}
