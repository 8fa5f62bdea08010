//! Per-function analysis driver
//!
//! Functions are independent: each one is built, lowered and checked on its
//! own, and a failure in one never hides the findings of another.

mod orchestrator;
mod report;

pub use orchestrator::{analyze_function, analyze_functions, analyze_with_config};
pub use report::{FunctionOutcome, FunctionReport};
