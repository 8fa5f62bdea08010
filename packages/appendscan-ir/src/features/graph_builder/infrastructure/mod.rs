mod expressions;
mod from_syntax;

pub use from_syntax::{build_execution, ExecutionFromSyntax};
