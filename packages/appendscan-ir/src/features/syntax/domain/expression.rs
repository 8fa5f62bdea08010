//! Expression nodes

use crate::shared::models::Span;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    Ident(String),
    Paren(Box<Expr>),
    Selector {
        operand: Box<Expr>,
        field: String,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// `operand[low:high]` or the bounded form `operand[low:high:max]`
    Slice {
        operand: Box<Expr>,
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
        max: Option<Box<Expr>>,
    },
    CompositeLit {
        kind: CompositeKind,
        elements: Vec<CompositeElement>,
    },
    Unary(Box<Expr>),
    Binary(Box<Expr>, Box<Expr>),
    Index {
        operand: Box<Expr>,
        index: Box<Expr>,
    },
    TypeAssert(Box<Expr>),
    Literal,
    FuncLit,
    Other,
    /// Front-end error node
    Bad,
}

/// What a composite literal builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeKind {
    Struct,
    Sequence,
    Map,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeElement {
    /// Field name for keyed struct elements
    pub key: Option<String>,
    pub value: Expr,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Self::new(ExprKind::Ident(name.into()), span)
    }

    pub fn literal(span: Span) -> Self {
        Self::new(ExprKind::Literal, span)
    }

    pub fn select(self, field: impl Into<String>) -> Self {
        let span = self.span;
        Self::new(
            ExprKind::Selector {
                operand: Box::new(self),
                field: field.into(),
            },
            span,
        )
    }

    pub fn call(callee: impl Into<String>, args: Vec<Expr>, span: Span) -> Self {
        Self::new(
            ExprKind::Call {
                callee: Box::new(Self::ident(callee, span)),
                args,
            },
            span,
        )
    }

    /// Strip any number of enclosing parentheses
    pub fn unparen(&self) -> &Expr {
        let mut expr = self;
        while let ExprKind::Paren(inner) = &expr.kind {
            expr = inner;
        }
        expr
    }

    /// Callee name when the expression is a call through a plain identifier
    pub fn called_name(&self) -> Option<&str> {
        match &self.unparen().kind {
            ExprKind::Call { callee, .. } => match &callee.unparen().kind {
                ExprKind::Ident(name) => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}
