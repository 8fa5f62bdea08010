//! Factorization engine
//!
//! Decides, per value identifier, which field paths must be tracked as
//! separate scalars so that every selector assignment in a function lowers
//! to a consistent set of scalar assignments.

pub mod domain;
pub mod infrastructure;

pub use domain::{leaf_paths, FactorizationRules, SelectorAssignment};
pub use infrastructure::{FactorizationStats, Factorizer};
