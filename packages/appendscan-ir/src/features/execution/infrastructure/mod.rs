mod builder;

pub use builder::ExecutionBuilder;
