//! Serializable per-function results for reporting sinks

use crate::errors::AnalysisError;
use crate::features::generation_check::{ValidationStats, ValidationWarning};
use crate::shared::models::Span;
use serde::{Deserialize, Serialize};

/// Findings for one successfully analyzed function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionReport {
    pub function: String,
    pub span: Span,
    pub warnings: Vec<ValidationWarning>,
    pub stats: ValidationStats,
    pub duration_ms: f64,
}

impl FunctionReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Result slot for one function of a batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionOutcome {
    pub function: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<FunctionReport>,
    /// Set when the function could not be analyzed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FunctionOutcome {
    pub fn success(report: FunctionReport) -> Self {
        Self {
            function: report.function.clone(),
            report: Some(report),
            error: None,
        }
    }

    pub fn failure(function: impl Into<String>, error: &AnalysisError) -> Self {
        Self {
            function: function.into(),
            report: None,
            error: Some(error.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Warnings of the function, empty on failure
    pub fn warnings(&self) -> &[ValidationWarning] {
        self.report
            .as_ref()
            .map(|report| report.warnings.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::PointId;

    fn report() -> FunctionReport {
        FunctionReport {
            function: "parse".to_string(),
            span: Span::line(1),
            warnings: vec![ValidationWarning {
                point: PointId::new(4),
                span: Some(Span::line(5)),
                origin: None,
                value: None,
            }],
            stats: ValidationStats::default(),
            duration_ms: 0.5,
        }
    }

    #[test]
    fn test_report_json_shape() {
        let json: serde_json::Value = serde_json::from_str(&report().to_json().unwrap()).unwrap();
        assert_eq!(json["function"], "parse");
        assert_eq!(json["warnings"][0]["point"], 4);
        assert_eq!(json["warnings"][0]["span"]["start_line"], 5);
    }

    #[test]
    fn test_failure_outcome_has_no_warnings() {
        let outcome = FunctionOutcome::failure("broken", &AnalysisError::internal("boom"));
        assert!(!outcome.is_ok());
        assert!(outcome.warnings().is_empty());

        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json.get("report").is_none());
        assert!(json["error"].as_str().unwrap().contains("boom"));
    }

    #[test]
    fn test_success_outcome_exposes_warnings() {
        let outcome = FunctionOutcome::success(report());
        assert!(outcome.is_ok());
        assert_eq!(outcome.warnings().len(), 1);
    }
}
