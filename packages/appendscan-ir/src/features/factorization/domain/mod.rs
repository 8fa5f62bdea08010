mod rules;

pub use rules::{leaf_paths, FactorizationRules, SelectorAssignment};
