mod lowering;

pub use lowering::{Lowering, ValueTable};
