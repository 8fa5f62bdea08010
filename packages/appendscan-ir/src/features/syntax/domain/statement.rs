//! Statement nodes

use super::expression::Expr;
use crate::shared::models::Span;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StmtKind {
    Block(Block),
    Labeled {
        label: String,
        stmt: Box<Stmt>,
    },
    /// `else_branch` must be a `Block` or another `If`
    If {
        init: Option<Box<Stmt>>,
        cond: Expr,
        then_block: Block,
        else_branch: Option<Box<Stmt>>,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
        body: Block,
    },
    Range {
        key: Option<Expr>,
        value: Option<Expr>,
        /// `:=` rather than `=`
        define: bool,
        subject: Expr,
        body: Block,
    },
    /// Short variable declaration or `var` declaration; `values` may be
    /// empty for zero-value declarations
    Define {
        names: Vec<String>,
        values: Vec<Expr>,
    },
    /// Plain or compound assignment
    Assign {
        targets: Vec<Expr>,
        values: Vec<Expr>,
    },
    Switch {
        init: Option<Box<Stmt>>,
        tag: Option<Expr>,
        clauses: Vec<CaseClause>,
    },
    TypeSwitch {
        init: Option<Box<Stmt>>,
        binding: Option<String>,
        subject: Expr,
        clauses: Vec<CaseClause>,
    },
    Return(Vec<Expr>),
    Expr(Expr),
    Skipped(SkippedKind),
    /// Front-end error node
    Bad,
}

/// Statement kinds with no effect on value provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkippedKind {
    Branch,
    Defer,
    Go,
    Goto,
    Send,
    Select,
    IncDec,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseClause {
    /// Case expressions; empty for `default`
    pub exprs: Vec<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl CaseClause {
    pub fn is_default(&self) -> bool {
        self.exprs.is_empty()
    }
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn define(names: &[&str], values: Vec<Expr>, span: Span) -> Self {
        Self::new(
            StmtKind::Define {
                names: names.iter().map(|n| n.to_string()).collect(),
                values,
            },
            span,
        )
    }

    pub fn assign(targets: Vec<Expr>, values: Vec<Expr>, span: Span) -> Self {
        Self::new(StmtKind::Assign { targets, values }, span)
    }

    pub fn ret(results: Vec<Expr>, span: Span) -> Self {
        Self::new(StmtKind::Return(results), span)
    }
}

impl Block {
    pub fn new(stmts: Vec<Stmt>, span: Span) -> Self {
        Self { stmts, span }
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}
