//! Common test utilities for appendscan-ir
//!
//! This module provides syntax-tree builders and the scenario fixtures
//! shared by the integration tests.

#![allow(dead_code)]

mod builders;
mod fixtures;

// Re-export all utilities
pub use builders::*;
pub use fixtures::*;
