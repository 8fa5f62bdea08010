//! Syntax tree builders
//!
//! Compact constructors for the front-end tree. Every node takes the source
//! line it should report; columns are always 1.

use appendscan_ir::features::syntax::{
    Block, CaseClause, CompositeElement, CompositeKind, Expr, ExprKind, FunctionDecl, SkippedKind,
    Stmt, StmtKind,
};
use appendscan_ir::Span;

pub fn sp(line: u32) -> Span {
    Span::line(line)
}

// ============================================================================
// Expressions
// ============================================================================

pub fn id(name: &str, line: u32) -> Expr {
    Expr::ident(name, sp(line))
}

pub fn field(operand: Expr, name: &str) -> Expr {
    operand.select(name)
}

/// Call of a plain identifier, e.g. `append(xs, x)`
pub fn call(name: &str, args: Vec<Expr>, line: u32) -> Expr {
    Expr::call(name, args, sp(line))
}

/// Call of an arbitrary callee, e.g. `strings.Fields(raw)`
pub fn call_expr(callee: Expr, args: Vec<Expr>, line: u32) -> Expr {
    Expr::new(
        ExprKind::Call {
            callee: Box::new(callee),
            args,
        },
        sp(line),
    )
}

/// `operand[:]`
pub fn slice(operand: Expr, line: u32) -> Expr {
    Expr::new(
        ExprKind::Slice {
            operand: Box::new(operand),
            low: None,
            high: None,
            max: None,
        },
        sp(line),
    )
}

/// `operand[low:]`
pub fn tail_slice(operand: Expr, low: Expr, line: u32) -> Expr {
    Expr::new(
        ExprKind::Slice {
            operand: Box::new(operand),
            low: Some(Box::new(low)),
            high: None,
            max: None,
        },
        sp(line),
    )
}

/// `operand[:n:n]`
pub fn bounded_slice(operand: Expr, line: u32) -> Expr {
    Expr::new(
        ExprKind::Slice {
            operand: Box::new(operand),
            low: None,
            high: Some(Box::new(lit(line))),
            max: Some(Box::new(lit(line))),
        },
        sp(line),
    )
}

/// `T{Key: value, ...}`
pub fn struct_lit(fields: Vec<(&str, Expr)>, line: u32) -> Expr {
    Expr::new(
        ExprKind::CompositeLit {
            kind: CompositeKind::Struct,
            elements: fields
                .into_iter()
                .map(|(key, value)| CompositeElement {
                    key: Some(key.to_string()),
                    value,
                })
                .collect(),
        },
        sp(line),
    )
}

/// `[]T{elements...}`
pub fn seq_lit(elements: Vec<Expr>, line: u32) -> Expr {
    Expr::new(
        ExprKind::CompositeLit {
            kind: CompositeKind::Sequence,
            elements: elements
                .into_iter()
                .map(|value| CompositeElement { key: None, value })
                .collect(),
        },
        sp(line),
    )
}

pub fn lit(line: u32) -> Expr {
    Expr::literal(sp(line))
}

pub fn binary(lhs: Expr, rhs: Expr, line: u32) -> Expr {
    Expr::new(ExprKind::Binary(Box::new(lhs), Box::new(rhs)), sp(line))
}

pub fn index(operand: Expr, idx: Expr, line: u32) -> Expr {
    Expr::new(
        ExprKind::Index {
            operand: Box::new(operand),
            index: Box::new(idx),
        },
        sp(line),
    )
}

// ============================================================================
// Statements
// ============================================================================

pub fn define(names: &[&str], values: Vec<Expr>, line: u32) -> Stmt {
    Stmt::define(names, values, sp(line))
}

pub fn assign(targets: Vec<Expr>, values: Vec<Expr>, line: u32) -> Stmt {
    Stmt::assign(targets, values, sp(line))
}

pub fn ret(values: Vec<Expr>, line: u32) -> Stmt {
    Stmt::ret(values, sp(line))
}

pub fn expr_stmt(expr: Expr, line: u32) -> Stmt {
    Stmt::new(StmtKind::Expr(expr), sp(line))
}

pub fn skipped(kind: SkippedKind, line: u32) -> Stmt {
    Stmt::new(StmtKind::Skipped(kind), sp(line))
}

pub fn block(stmts: Vec<Stmt>, line: u32) -> Block {
    Block::new(stmts, sp(line))
}

/// `for cond { body }`, or `for { body }` without a condition
pub fn for_loop(cond: Option<Expr>, body: Vec<Stmt>, line: u32) -> Stmt {
    Stmt::new(
        StmtKind::For {
            init: None,
            cond,
            post: None,
            body: block(body, line),
        },
        sp(line),
    )
}

/// `for key, value := range subject { body }`
pub fn range_loop(
    key: Option<&str>,
    value: Option<&str>,
    subject: Expr,
    body: Vec<Stmt>,
    line: u32,
) -> Stmt {
    Stmt::new(
        StmtKind::Range {
            key: key.map(|name| id(name, line)),
            value: value.map(|name| id(name, line)),
            define: true,
            subject,
            body: block(body, line),
        },
        sp(line),
    )
}

pub fn if_else(cond: Expr, then: Vec<Stmt>, otherwise: Option<Vec<Stmt>>, line: u32) -> Stmt {
    Stmt::new(
        StmtKind::If {
            init: None,
            cond,
            then_block: block(then, line),
            else_branch: otherwise
                .map(|stmts| Box::new(Stmt::new(StmtKind::Block(block(stmts, line)), sp(line)))),
        },
        sp(line),
    )
}

pub fn clause(exprs: Vec<Expr>, body: Vec<Stmt>, line: u32) -> CaseClause {
    CaseClause {
        exprs,
        body,
        span: sp(line),
    }
}

/// `switch binding := subject.(type) { clauses }`
pub fn type_switch(binding: &str, subject: Expr, clauses: Vec<CaseClause>, line: u32) -> Stmt {
    Stmt::new(
        StmtKind::TypeSwitch {
            init: None,
            binding: Some(binding.to_string()),
            subject,
            clauses,
        },
        sp(line),
    )
}

// ============================================================================
// Functions
// ============================================================================

/// Builder for FunctionDecl
#[derive(Debug)]
pub struct FunctionBuilder {
    name: String,
    params: Vec<String>,
    results: Vec<Option<String>>,
    body: Vec<Stmt>,
    line: u32,
}

impl FunctionBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
            results: Vec::new(),
            body: Vec::new(),
            line: 1,
        }
    }

    pub fn params(mut self, names: &[&str]) -> Self {
        self.params.extend(names.iter().map(|n| n.to_string()));
        self
    }

    /// Unnamed result slots
    pub fn results(mut self, count: usize) -> Self {
        self.results.extend(std::iter::repeat(None).take(count));
        self
    }

    pub fn named_results(mut self, names: &[&str]) -> Self {
        self.results.extend(names.iter().map(|n| Some(n.to_string())));
        self
    }

    pub fn stmt(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }

    pub fn build(self) -> FunctionDecl {
        FunctionDecl {
            name: self.name,
            params: self.params,
            results: self.results,
            body: block(self.body, self.line),
            span: sp(self.line),
        }
    }
}
