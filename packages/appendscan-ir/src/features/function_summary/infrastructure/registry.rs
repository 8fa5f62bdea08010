//! Function summary registry
//!
//! Owns the summaries and hands out [`FuncId`]s. The graph builder resolves
//! call names against it; the simplifier looks summaries up by id.

use crate::config::AnalysisConfig;
use crate::errors::{AnalysisError, Result};
use crate::features::execution::GenDelta;
use crate::features::function_summary::domain::FunctionSummary;
use crate::shared::models::FuncId;
use rustc_hash::FxHashMap;

/// Growth-append built-in
pub const APPEND_NAME: &str = "append";

/// Bounded re-slice built-in (`s[a:b:c]`); not spellable as an identifier
pub const SLICE_NAME: &str = "[::]";

#[derive(Debug, Clone)]
pub struct FunctionSummaryRegistry {
    summaries: Vec<FunctionSummary>,
    by_name: FxHashMap<String, FuncId>,
}

impl FunctionSummaryRegistry {
    /// Registry holding the two built-ins
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for builtin in [
            FunctionSummary::unary_alias(SLICE_NAME, GenDelta::Prev),
            FunctionSummary::unary_alias(APPEND_NAME, GenDelta::Next),
        ] {
            let id = FuncId::new(registry.summaries.len() as u32);
            registry.by_name.insert(builtin.name.clone(), id);
            registry.summaries.push(builtin);
        }
        registry
    }

    pub fn empty() -> Self {
        Self {
            summaries: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    /// Built-ins plus every summary declared in the configuration
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        let mut registry = Self::new();
        for summary in &config.summaries {
            registry.register(summary.clone())?;
        }
        Ok(registry)
    }

    /// Validate and add a summary
    pub fn register(&mut self, summary: FunctionSummary) -> Result<FuncId> {
        summary.validate()?;
        if self.by_name.contains_key(&summary.name) {
            return Err(AnalysisError::invalid_summary(
                &summary.name,
                "already registered",
            ));
        }
        let id = FuncId::new(self.summaries.len() as u32);
        tracing::debug!(function = %summary.name, id = %id, "registered function summary");
        self.by_name.insert(summary.name.clone(), id);
        self.summaries.push(summary);
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Option<FuncId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: FuncId) -> Option<&FunctionSummary> {
        self.summaries.get(id.index())
    }

    pub fn name_of(&self, id: FuncId) -> Option<&str> {
        self.get(id).map(|s| s.name.as_str())
    }

    pub fn slice_id(&self) -> Option<FuncId> {
        self.lookup(SLICE_NAME)
    }

    pub fn append_id(&self) -> Option<FuncId> {
        self.lookup(APPEND_NAME)
    }

    pub fn len(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

impl Default for FunctionSummaryRegistry {
    fn default() -> Self {
        Self::new()
    }
}
