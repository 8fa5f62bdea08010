//! Lowering: rich execution → primitive execution
//!
//! ## Architecture
//!
//! ```text
//! Rich graph (selector assigns, call effects, returns, no-ops)
//!   ↓ collect_assignments + Factorizer
//! Factorization rules (leaf paths per identifier)
//!   ↓ simplify
//! Primitive graph (scalar assigns with generation deltas, returns, no-ops)
//! ```
//!
//! Every primitive point remembers the rich point it came from so warnings
//! can be reported against the original graph.

pub mod domain;
pub mod infrastructure;

pub use domain::{Lowering, ValueTable};
pub use infrastructure::{collect_assignments, simplify};
