mod summary;

pub use summary::{
    BoundAssignment, FunctionSummary, InputRef, InputSlot, Outcome, OutputComponent, OutputSlot,
};
