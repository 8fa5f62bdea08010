mod factorizer;

pub use factorizer::{FactorizationStats, Factorizer};
