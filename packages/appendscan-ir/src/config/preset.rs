//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use super::error::ConfigError;
use super::stage_configs::TraceConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// CI: two loop passes, at most 10 000 traces per function
    Fast,

    /// Development: two loop passes, no trace budget
    #[default]
    Balanced,

    /// Audit: three loop passes, no trace budget
    Thorough,
}

impl Preset {
    /// Trace enumeration defaults for this preset
    pub fn trace_config(&self) -> TraceConfig {
        match self {
            Self::Fast => TraceConfig::default().max_traces(Some(10_000)),
            Self::Balanced => TraceConfig::default(),
            Self::Thorough => TraceConfig::default().repeat_limit(3),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Balanced => "balanced",
            Self::Thorough => "thorough",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "thorough" => Ok(Self::Thorough),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}
