//! Lowering result and the leaf-selector value table

use crate::features::execution::{Execution, Selector};
use crate::features::factorization::FactorizationRules;
use crate::shared::models::{PointId, ValueId};
use rustc_hash::FxHashMap;

/// Dense primitive identifiers for leaf selectors.
///
/// The blank selector always maps to [`ValueId::BLANK`] and is never stored.
#[derive(Debug, Clone, Default)]
pub struct ValueTable {
    ids: FxHashMap<Selector, ValueId>,
    selectors: Vec<Selector>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `selector`, allocating the next one on first sight
    pub fn intern(&mut self, selector: &Selector) -> ValueId {
        if selector.is_blank() {
            return ValueId::BLANK;
        }
        if let Some(&id) = self.ids.get(selector) {
            return id;
        }
        let id = ValueId::new(self.selectors.len() as u32);
        self.ids.insert(selector.clone(), id);
        self.selectors.push(selector.clone());
        id
    }

    pub fn get(&self, selector: &Selector) -> Option<ValueId> {
        self.ids.get(selector).copied()
    }

    /// Rich selector behind a primitive id
    pub fn selector_of(&self, value: ValueId) -> Option<&Selector> {
        if value.is_blank() {
            return None;
        }
        self.selectors.get(value.raw() as usize)
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// Primitive graph plus the mappings back to the rich graph
#[derive(Debug, Clone)]
pub struct Lowering {
    execution: Execution,
    point_origins: FxHashMap<PointId, PointId>,
    values: ValueTable,
    rules: FactorizationRules,
}

impl Lowering {
    pub fn new(
        execution: Execution,
        point_origins: FxHashMap<PointId, PointId>,
        values: ValueTable,
        rules: FactorizationRules,
    ) -> Self {
        Self {
            execution,
            point_origins,
            values,
            rules,
        }
    }

    pub fn execution(&self) -> &Execution {
        &self.execution
    }

    /// Rich point a primitive point was emitted for
    pub fn origin_of(&self, point: PointId) -> Option<PointId> {
        self.point_origins.get(&point).copied()
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn selector_of(&self, value: ValueId) -> Option<&Selector> {
        self.values.selector_of(value)
    }

    pub fn rules(&self) -> &FactorizationRules {
        &self.rules
    }

    pub fn into_execution(self) -> Execution {
        self.execution
    }
}
