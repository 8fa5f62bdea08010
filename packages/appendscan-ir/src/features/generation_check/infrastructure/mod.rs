mod generation_validator;
mod trace_enumerator;

pub use generation_validator::{validate_trace, GenerationValidator};
pub use trace_enumerator::{generate_traces, Trace, TraceEnumerator, TraceStats};
