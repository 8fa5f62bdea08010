mod registry;

pub use registry::{FunctionSummaryRegistry, APPEND_NAME, SLICE_NAME};
