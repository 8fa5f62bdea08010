//! Analysis configuration
//!
//! Presets give complete defaults; stage configs override them field by
//! field. Configurations load from YAML schema v1.
//!
//! # Example
//! ```rust,ignore
//! use appendscan_ir::config::{AnalysisConfig, Preset};
//!
//! let config = AnalysisConfig::preset(Preset::Thorough)
//!     .trace(|t| t.repeat_limit(4))
//!     .parallel(|p| p.workers(8));
//! config.validate()?;
//!
//! let from_file = AnalysisConfig::from_yaml_file("appendscan.yaml")?;
//! ```

mod analysis_config;
mod error;
mod io;
mod preset;
mod stage_configs;

pub use analysis_config::AnalysisConfig;
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigFileV1, SUPPORTED_VERSIONS};
pub use preset::Preset;
pub use stage_configs::{FactorizationConfig, ParallelConfig, TraceConfig};
