//! Unified error types for appendscan-ir
//!
//! Three classes of failure exist:
//! - invalid input shape handed over by the front end
//! - invalid user-supplied function summaries
//! - internal consistency violations between analysis stages
//!
//! Generation conflicts are not errors; they are reported as warnings.

use crate::config::ConfigError;
use crate::shared::models::Span;
use thiserror::Error;

/// Analysis errors
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The syntax tree does not have a shape the builder understands
    #[error("Invalid input at {span}: {reason}")]
    InvalidInput { span: Span, reason: String },

    /// A function summary failed registration checks
    #[error("Invalid summary for '{function}': {reason}")]
    InvalidSummary { function: String, reason: String },

    /// Invariant between two stages broken
    #[error("Internal consistency violation: {0}")]
    Internal(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AnalysisError {
    /// Create an invalid input error
    pub fn invalid_input(span: Span, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            span,
            reason: reason.into(),
        }
    }

    /// Create an invalid summary error
    pub fn invalid_summary(function: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSummary {
            function: function.into(),
            reason: reason.into(),
        }
    }

    /// Create an internal consistency error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the error points at a front-end contract violation
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::InvalidSummary { .. })
    }
}

/// Result type alias for appendscan-ir operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
