//! Generation check use case

mod validate_execution;

pub use validate_execution::{check_execution, validate_execution, ValidationReport};
