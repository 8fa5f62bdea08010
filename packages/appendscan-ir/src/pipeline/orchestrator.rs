//! Batch orchestration
//!
//! Runs build → simplify → check per function. With the `parallel` feature
//! the batch is spread over a dedicated rayon pool sized from
//! [`ParallelConfig`](crate::config::ParallelConfig); results always come
//! back in input order.

use super::report::{FunctionOutcome, FunctionReport};
use crate::config::AnalysisConfig;
use crate::errors::Result;
use crate::features::function_summary::FunctionSummaryRegistry;
use crate::features::generation_check::check_execution;
use crate::features::graph_builder::build_execution;
use crate::features::syntax::FunctionDecl;
use std::time::Instant;

/// Analyze one function
pub fn analyze_function(
    registry: &FunctionSummaryRegistry,
    config: &AnalysisConfig,
    func: &FunctionDecl,
) -> Result<FunctionReport> {
    let start = Instant::now();

    let execution = build_execution(registry, func)?;
    tracing::debug!(
        function = %func.name,
        points = execution.point_count(),
        transitions = execution.transition_count(),
        "execution built"
    );

    let report = check_execution(registry, &execution, config)?;
    tracing::info!(
        function = %func.name,
        warnings = report.warnings.len(),
        traces = report.stats.traces,
        "function analyzed"
    );

    Ok(FunctionReport {
        function: func.name.clone(),
        span: func.span,
        warnings: report.warnings,
        stats: report.stats,
        duration_ms: start.elapsed().as_secs_f64() * 1000.0,
    })
}

/// Analyze a batch; each function succeeds or fails on its own
pub fn analyze_functions(
    registry: &FunctionSummaryRegistry,
    config: &AnalysisConfig,
    funcs: &[FunctionDecl],
) -> Vec<FunctionOutcome> {
    let start = Instant::now();
    let outcomes = run_batch(registry, config, funcs);

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    let warnings: usize = outcomes.iter().map(|o| o.warnings().len()).sum();
    tracing::info!(
        functions = funcs.len(),
        failed,
        warnings,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch analyzed"
    );
    outcomes
}

/// Validate `config`, register its summaries and analyze the batch
pub fn analyze_with_config(
    config: &AnalysisConfig,
    funcs: &[FunctionDecl],
) -> Result<Vec<FunctionOutcome>> {
    config.validate()?;
    let registry = FunctionSummaryRegistry::from_config(config)?;
    Ok(analyze_functions(&registry, config, funcs))
}

fn analyze_isolated(
    registry: &FunctionSummaryRegistry,
    config: &AnalysisConfig,
    func: &FunctionDecl,
) -> FunctionOutcome {
    match analyze_function(registry, config, func) {
        Ok(report) => FunctionOutcome::success(report),
        Err(e) => {
            tracing::warn!(function = %func.name, error = %e, "function analysis failed");
            FunctionOutcome::failure(func.name.clone(), &e)
        }
    }
}

fn run_sequential(
    registry: &FunctionSummaryRegistry,
    config: &AnalysisConfig,
    funcs: &[FunctionDecl],
) -> Vec<FunctionOutcome> {
    funcs
        .iter()
        .map(|func| analyze_isolated(registry, config, func))
        .collect()
}

#[cfg(feature = "parallel")]
fn run_batch(
    registry: &FunctionSummaryRegistry,
    config: &AnalysisConfig,
    funcs: &[FunctionDecl],
) -> Vec<FunctionOutcome> {
    use rayon::prelude::*;

    if !config.parallel.enabled || funcs.len() < 2 {
        return run_sequential(registry, config, funcs);
    }

    match build_pool(&config.parallel) {
        Ok(pool) => pool.install(|| {
            funcs
                .par_iter()
                .map(|func| analyze_isolated(registry, config, func))
                .collect()
        }),
        Err(e) => {
            tracing::warn!(error = %e, "worker pool unavailable, analyzing sequentially");
            run_sequential(registry, config, funcs)
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn run_batch(
    registry: &FunctionSummaryRegistry,
    config: &AnalysisConfig,
    funcs: &[FunctionDecl],
) -> Vec<FunctionOutcome> {
    run_sequential(registry, config, funcs)
}

#[cfg(feature = "parallel")]
fn build_pool(
    config: &crate::config::ParallelConfig,
) -> std::result::Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
    let workers = config.effective_workers();
    tracing::debug!(workers, "building analysis pool");
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("appendscan-worker-{}", i))
        .build()
}
