mod scopes;

pub use scopes::{Scopes, BLANK_NAME};
