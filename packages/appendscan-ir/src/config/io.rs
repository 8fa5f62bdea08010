//! Configuration I/O
//!
//! Defines the YAML schema types. Loading and export live on
//! `AnalysisConfig` in analysis_config.rs.

use super::stage_configs::{FactorizationConfig, ParallelConfig, TraceConfig};
use crate::features::function_summary::FunctionSummary;
use serde::{Deserialize, Serialize};

pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// Base preset
    #[serde(default = "default_preset_name")]
    pub preset: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<TraceConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub factorization: Option<FactorizationConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelConfig>,

    /// Extra function summaries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summaries: Vec<FunctionSummary>,
}

fn default_preset_name() -> String {
    "balanced".to_string()
}
