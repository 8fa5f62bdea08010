//! Top-level analysis configuration

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigFileV1, SUPPORTED_VERSIONS};
use super::preset::Preset;
use super::stage_configs::{FactorizationConfig, ParallelConfig, TraceConfig};
use crate::features::function_summary::FunctionSummary;
use std::path::Path;

/// Everything one analysis run needs besides the functions themselves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub preset: Preset,
    pub trace: TraceConfig,
    pub factorization: FactorizationConfig,
    pub parallel: ParallelConfig,
    /// Registered on top of the built-ins
    pub summaries: Vec<FunctionSummary>,
}

impl AnalysisConfig {
    /// Start from a preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            trace: preset.trace_config(),
            factorization: FactorizationConfig::default(),
            parallel: ParallelConfig::default(),
            summaries: Vec::new(),
        }
    }

    /// Override trace settings
    pub fn trace(mut self, f: impl FnOnce(TraceConfig) -> TraceConfig) -> Self {
        self.trace = f(self.trace);
        self
    }

    /// Override factorization settings
    pub fn factorization(
        mut self,
        f: impl FnOnce(FactorizationConfig) -> FactorizationConfig,
    ) -> Self {
        self.factorization = f(self.factorization);
        self
    }

    /// Override parallel settings
    pub fn parallel(mut self, f: impl FnOnce(ParallelConfig) -> ParallelConfig) -> Self {
        self.parallel = f(self.parallel);
        self
    }

    /// Add a user summary
    pub fn summary(mut self, summary: FunctionSummary) -> Self {
        self.summaries.push(summary);
        self
    }

    /// Validate every stage
    pub fn validate(&self) -> ConfigResult<()> {
        self.trace.validate()?;
        self.factorization.validate()?;
        self.parallel.validate()?;
        Ok(())
    }

    /// Load from a YAML string (schema v1)
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(yaml)?;
        Self::from_file_schema(file)
    }

    /// Load from a YAML file (schema v1)
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Export as YAML (schema v1)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            preset: self.preset.as_str().to_string(),
            trace: Some(self.trace.clone()),
            factorization: Some(self.factorization.clone()),
            parallel: Some(self.parallel.clone()),
            summaries: self.summaries.clone(),
        };
        Ok(serde_yaml::to_string(&file)?)
    }

    fn from_file_schema(file: ConfigFileV1) -> ConfigResult<Self> {
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let mut config = Self::preset(file.preset.parse()?);
        if let Some(trace) = file.trace {
            config.trace = trace;
        }
        if let Some(factorization) = file.factorization {
            config.factorization = factorization;
        }
        if let Some(parallel) = file.parallel {
            config.parallel = parallel;
        }
        config.summaries = file.summaries;

        config.validate()?;
        Ok(config)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::preset(Preset::Balanced)
    }
}
