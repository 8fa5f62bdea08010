mod simplifier;

pub use simplifier::{collect_assignments, simplify};
