use super::statement::Block;
use crate::shared::models::Span;
use serde::{Deserialize, Serialize};

/// One function body as presented by the front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    /// One slot per declared result; `Some` for named results
    pub results: Vec<Option<String>>,
    pub body: Block,
    pub span: Span,
}

impl FunctionDecl {
    pub fn arity(&self) -> usize {
        self.results.len()
    }

    pub fn has_named_results(&self) -> bool {
        self.results.iter().any(Option::is_some)
    }
}
