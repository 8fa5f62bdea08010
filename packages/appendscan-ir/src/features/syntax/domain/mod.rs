mod expression;
mod function;
mod statement;

pub use expression::{CompositeElement, CompositeKind, Expr, ExprKind};
pub use function::FunctionDecl;
pub use statement::{Block, CaseClause, SkippedKind, Stmt, StmtKind};
