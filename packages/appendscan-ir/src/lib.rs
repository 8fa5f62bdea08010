/*
 * Appendscan IR - stale slice alias detection
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span, ids)
 * - features/    : Vertical slices (syntax → execution → lowering → generation check)
 * - config/      : Analysis configuration (YAML v1)
 * - pipeline/    : Per-function orchestration
 *
 * Data flow:
 *   syntax tree → graph_builder → rich Execution
 *     → lowering (function_summary + factorization) → primitive Execution
 *     → generation_check → warnings
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

pub mod config;
pub mod errors;
pub mod features;
pub mod pipeline;
pub mod shared;

pub use errors::{AnalysisError, Result};

pub use config::{AnalysisConfig, Preset};
pub use features::execution::{Execution, Operation};
pub use features::function_summary::FunctionSummaryRegistry;
pub use features::generation_check::{validate_execution, ValidationWarning};
pub use features::graph_builder::build_execution;
pub use features::syntax::FunctionDecl;
pub use pipeline::{analyze_function, analyze_functions, FunctionOutcome, FunctionReport};
pub use shared::models::{FuncId, PointId, Span, ValueId};
