//! Stage-specific configuration types
//!
//! Each analysis stage has its own configuration struct with validation.

use super::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// Trace enumeration
// ============================================================================

/// Trace enumeration configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceConfig {
    /// Visits allowed per destination point along one trace (1..=16)
    pub repeat_limit: u32,

    /// Stop enumerating after this many traces per function
    pub max_traces: Option<usize>,
}

impl TraceConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.repeat_limit < 1 || self.repeat_limit > 16 {
            return Err(ConfigError::range_with_hint(
                "repeat_limit",
                self.repeat_limit,
                1,
                16,
                "Each loop body must be visited at least once; large limits explode trace counts",
            ));
        }

        if self.max_traces == Some(0) {
            return Err(ConfigError::Validation(
                "max_traces must be positive when set (omit it for no budget)".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder: Set repeat_limit
    pub fn repeat_limit(mut self, v: u32) -> Self {
        self.repeat_limit = v;
        self
    }

    /// Builder: Set max_traces
    pub fn max_traces(mut self, v: Option<usize>) -> Self {
        self.max_traces = v;
        self
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            repeat_limit: 2,
            max_traces: None,
        }
    }
}

// ============================================================================
// Factorization
// ============================================================================

/// Factorization configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactorizationConfig {
    /// Longest field path produced by propagation (1..=256)
    pub max_path_depth: usize,
}

impl FactorizationConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_path_depth < 1 || self.max_path_depth > 256 {
            return Err(ConfigError::range_with_hint(
                "max_path_depth",
                self.max_path_depth,
                1,
                256,
                "Bounds propagation through recursive field assignments",
            ));
        }
        Ok(())
    }

    /// Builder: Set max_path_depth
    pub fn max_path_depth(mut self, v: usize) -> Self {
        self.max_path_depth = v;
        self
    }
}

impl Default for FactorizationConfig {
    fn default() -> Self {
        Self { max_path_depth: 16 }
    }
}

// ============================================================================
// Parallelism across functions
// ============================================================================

/// Parallel execution configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParallelConfig {
    /// Analyze functions on a rayon pool
    pub enabled: bool,

    /// Number of workers (0=auto, 0..=256)
    pub workers: usize,
}

impl ParallelConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.workers > 256 {
            return Err(ConfigError::range_with_hint(
                "workers",
                self.workers,
                0,
                256,
                "Number of workers must be reasonable (0=auto)",
            ));
        }
        Ok(())
    }

    /// Worker count with `0` resolved against the machine
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            (num_cpus::get() * 3 / 4).max(1)
        } else {
            self.workers
        }
    }

    /// Builder: Set enabled
    pub fn enabled(mut self, v: bool) -> Self {
        self.enabled = v;
        self
    }

    /// Builder: Set workers
    pub fn workers(mut self, v: usize) -> Self {
        self.workers = v;
        self
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            workers: 0, // Auto
        }
    }
}
