//! Simplify → enumerate → replay → deduplicate

use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::features::execution::Execution;
use crate::features::function_summary::FunctionSummaryRegistry;
use crate::features::generation_check::domain::{
    Origin, TraceConflict, ValidationStats, ValidationWarning,
};
use crate::features::generation_check::infrastructure::{validate_trace, TraceEnumerator};
use crate::features::lowering::{simplify, Lowering};
use crate::shared::models::PointId;
use rustc_hash::FxHashSet;

/// Warnings plus what it took to find them
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub warnings: Vec<ValidationWarning>,
    pub stats: ValidationStats,
}

/// Deduplicated warnings of one rich execution
pub fn validate_execution(
    registry: &FunctionSummaryRegistry,
    execution: &Execution,
    config: &AnalysisConfig,
) -> Result<Vec<ValidationWarning>> {
    check_execution(registry, execution, config).map(|report| report.warnings)
}

/// [`validate_execution`] with statistics.
///
/// Conflicts are deduplicated by primitive point, first occurrence winning,
/// then by the rich point they map back to. Trace order decides which
/// occurrence is first.
pub fn check_execution(
    registry: &FunctionSummaryRegistry,
    execution: &Execution,
    config: &AnalysisConfig,
) -> Result<ValidationReport> {
    let lowering = simplify(registry, execution, &config.factorization)?;
    let primitive = lowering.execution();

    let mut conflicts: Vec<TraceConflict> = Vec::new();
    let mut seen: FxHashSet<PointId> = FxHashSet::default();
    let mut total = 0;

    let trace_stats = TraceEnumerator::new(primitive, &config.trace).for_each(|trace| {
        for conflict in validate_trace(trace)? {
            total += 1;
            if seen.insert(conflict.point) {
                conflicts.push(conflict);
            }
        }
        Ok(())
    })?;

    let warnings = map_back(&lowering, execution, conflicts);
    let stats = ValidationStats {
        rich_points: execution.point_count(),
        primitive_points: primitive.point_count(),
        primitive_transitions: primitive.transition_count(),
        traces: trace_stats.traces,
        trace_budget_exhausted: trace_stats.budget_exhausted,
        conflicts: total,
    };
    tracing::debug!(
        traces = stats.traces,
        conflicts = stats.conflicts,
        warnings = warnings.len(),
        "generation check complete"
    );

    Ok(ValidationReport { warnings, stats })
}

fn map_back(
    lowering: &Lowering,
    execution: &Execution,
    conflicts: Vec<TraceConflict>,
) -> Vec<ValidationWarning> {
    let mut reported: FxHashSet<PointId> = FxHashSet::default();
    let mut warnings = Vec::new();
    for conflict in conflicts {
        let point = lowering.origin_of(conflict.point).unwrap_or(conflict.point);
        if !reported.insert(point) {
            continue;
        }
        let origin = match conflict.origin {
            Origin::Value(value) => lowering.selector_of(value).cloned(),
            Origin::Fresh(_) => None,
        };
        warnings.push(ValidationWarning {
            point,
            span: execution.reference(point),
            origin,
            value: lowering.selector_of(conflict.source).cloned(),
        });
    }
    warnings
}
