mod composition;
mod execution;
mod operation;

pub use composition::{Composition, Embed, FieldPath, Selector};
pub use execution::{Execution, Transition};
pub use operation::{GenDelta, Operation};
