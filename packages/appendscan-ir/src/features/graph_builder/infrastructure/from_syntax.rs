//! Statement walker
//!
//! Control flow shapes:
//! - if/else-if/else: inits run in sequence on the fall-through path, each
//!   body branches off and merges into one `after` point
//! - for/range: a no-op anchor precedes the body; the body's exit closes a
//!   back-edge to the anchor, and code after the loop leaves from it
//! - switch: every clause branches from the point after init and merges
//!   into `after`; fallthrough is not modeled
//! - return: emits the return and continues from a detached point

use crate::errors::{AnalysisError, Result};
use crate::features::execution::{Composition, Execution, ExecutionBuilder, Operation, Selector};
use crate::features::function_summary::FunctionSummaryRegistry;
use crate::features::graph_builder::domain::Scopes;
use crate::features::syntax::{Block, CaseClause, Expr, ExprKind, FunctionDecl, Stmt, StmtKind};
use crate::shared::models::{PointId, Span, ValueId};

/// Build the rich execution graph of one function
pub fn build_execution(registry: &FunctionSummaryRegistry, func: &FunctionDecl) -> Result<Execution> {
    ExecutionFromSyntax::new(registry).build(func)
}

pub struct ExecutionFromSyntax<'r> {
    pub(super) registry: &'r FunctionSummaryRegistry,
    pub(super) builder: ExecutionBuilder,
    named_results: Vec<ValueId>,
    arity: usize,
}

/// One arm of a flattened if-chain
struct IfBranch<'a> {
    init: Option<&'a Stmt>,
    cond: Option<&'a Expr>,
    body: &'a Block,
}

impl<'r> ExecutionFromSyntax<'r> {
    pub fn new(registry: &'r FunctionSummaryRegistry) -> Self {
        Self {
            registry,
            builder: ExecutionBuilder::new(None),
            named_results: Vec::new(),
            arity: 0,
        }
    }

    pub fn build(mut self, func: &FunctionDecl) -> Result<Execution> {
        self.builder = ExecutionBuilder::new(Some(func.span));
        self.arity = func.arity();

        let mut scopes = Scopes::new();
        for param in &func.params {
            scopes.create_variable(param);
        }
        self.named_results = func
            .results
            .iter()
            .flatten()
            .map(|name| scopes.create_variable(name))
            .filter(|id| !id.is_blank())
            .collect();

        self.build_block(&scopes, &func.body)?;

        let execution = self.builder.finish();
        tracing::debug!(
            function = %func.name,
            values = scopes.allocated(),
            points = execution.point_count(),
            transitions = execution.transition_count(),
            "built execution"
        );
        tracing::trace!(function = %func.name, "\n{}", execution);
        Ok(execution)
    }

    fn build_block(&mut self, scopes: &Scopes<'_>, block: &Block) -> Result<()> {
        let mut inner = scopes.push_frame();
        self.build_stmts(&mut inner, &block.stmts)
    }

    fn build_stmts(&mut self, scopes: &mut Scopes<'_>, stmts: &[Stmt]) -> Result<()> {
        for stmt in stmts {
            self.build_stmt(scopes, stmt)?;
        }
        Ok(())
    }

    fn build_stmt(&mut self, scopes: &mut Scopes<'_>, stmt: &Stmt) -> Result<()> {
        match &stmt.kind {
            StmtKind::Block(block) => self.build_block(scopes, block),
            StmtKind::Labeled { stmt: inner, .. } => self.build_stmt(scopes, inner),
            StmtKind::If { .. } => self.build_if(scopes, stmt),
            StmtKind::For {
                init,
                cond,
                post,
                body,
            } => self.build_for(scopes, stmt, init.as_deref(), cond.as_ref(), post.as_deref(), body),
            StmtKind::Range {
                key,
                value,
                define,
                subject,
                body,
            } => self.build_range(scopes, stmt, [key.as_ref(), value.as_ref()], *define, subject, body),
            StmtKind::Define { names, values } => {
                let compositions = self.evaluate_values(scopes, stmt.span, values, names.len())?;
                for (name, composition) in names.iter().zip(&compositions) {
                    let id = scopes.create_variable(name);
                    self.emit_composition(Selector::whole(id), composition, stmt.span);
                }
                Ok(())
            }
            StmtKind::Assign { targets, values } => {
                let compositions = self.evaluate_values(scopes, stmt.span, values, targets.len())?;
                for (target, composition) in targets.iter().zip(&compositions) {
                    // Targets that are not a single selector are skipped
                    let resolved = self.evaluate_single(scopes, target)?;
                    if let Some(selector) = resolved.as_selector() {
                        self.emit_composition(selector.clone(), composition, stmt.span);
                    }
                }
                Ok(())
            }
            StmtKind::Switch { init, tag, clauses } => {
                let mut switch_scope = scopes.push_frame();
                if let Some(init) = init {
                    self.build_stmt(&mut switch_scope, init)?;
                }
                if let Some(tag) = tag {
                    self.evaluate(&switch_scope, tag, 0)?;
                }
                self.build_clauses(&switch_scope, stmt.span, None, clauses)
            }
            StmtKind::TypeSwitch {
                init,
                binding,
                subject,
                clauses,
            } => {
                let mut switch_scope = scopes.push_frame();
                if let Some(init) = init {
                    self.build_stmt(&mut switch_scope, init)?;
                }
                let subject = self.evaluate_single(&switch_scope, subject)?;
                let binding = binding.as_deref().map(|name| (name, subject));
                self.build_clauses(&switch_scope, stmt.span, binding, clauses)
            }
            StmtKind::Return(results) => self.build_return(scopes, stmt.span, results),
            StmtKind::Expr(expr) => self.evaluate(scopes, expr, 0).map(|_| ()),
            StmtKind::Skipped(_) => Ok(()),
            StmtKind::Bad => Err(AnalysisError::invalid_input(stmt.span, "malformed statement")),
        }
    }

    fn build_if(&mut self, scopes: &Scopes<'_>, stmt: &Stmt) -> Result<()> {
        let (branches, has_else) = deconstruct_if(stmt)?;
        let mut if_scope = scopes.push_frame();
        let after = self.builder.acquire_point(Some(stmt.span));

        for branch in &branches {
            if let Some(init) = branch.init {
                self.build_stmt(&mut if_scope, init)?;
            }
            if let Some(cond) = branch.cond {
                self.evaluate(&if_scope, cond, 0)?;
            }
            let fork = self.builder.current();
            self.build_block(&if_scope, branch.body)?;
            self.builder.connect_to(after)?;
            self.builder.set_current(fork);
        }
        if !has_else {
            self.builder.connect_to(after)?;
        }
        self.builder.set_current(after);
        Ok(())
    }

    fn build_for(
        &mut self,
        scopes: &Scopes<'_>,
        stmt: &Stmt,
        init: Option<&Stmt>,
        cond: Option<&Expr>,
        post: Option<&Stmt>,
        body: &Block,
    ) -> Result<()> {
        let mut for_scope = scopes.push_frame();
        if let Some(init) = init {
            self.build_stmt(&mut for_scope, init)?;
        }
        let anchor = self.builder.apply(Operation::NoOp, Some(stmt.span));
        if let Some(cond) = cond {
            self.evaluate(&for_scope, cond, 0)?;
        }
        let exit = self.builder.current();

        self.build_block(&for_scope, body)?;
        if let Some(post) = post {
            self.build_stmt(&mut for_scope, post)?;
        }
        self.close_loop(anchor)?;
        self.builder.set_current(exit);
        Ok(())
    }

    fn build_range(
        &mut self,
        scopes: &Scopes<'_>,
        stmt: &Stmt,
        bindings: [Option<&Expr>; 2],
        define: bool,
        subject: &Expr,
        body: &Block,
    ) -> Result<()> {
        self.evaluate(scopes, subject, 0)?;
        let mut range_scope = scopes.push_frame();
        let anchor = self.builder.apply(Operation::NoOp, Some(stmt.span));

        for binding in bindings.into_iter().flatten() {
            let target = if define {
                match &binding.unparen().kind {
                    ExprKind::Ident(name) => Selector::whole(range_scope.create_variable(name)),
                    _ => {
                        return Err(AnalysisError::invalid_input(
                            binding.span,
                            "range definition must bind identifiers",
                        ))
                    }
                }
            } else {
                match self.evaluate_single(&range_scope, binding)?.as_selector() {
                    Some(selector) => selector.clone(),
                    None => continue,
                }
            };
            if !target.is_blank() {
                self.builder
                    .apply(Operation::assign(Selector::blank(), target), Some(binding.span));
            }
        }

        self.build_block(&range_scope, body)?;
        self.close_loop(anchor)?;
        self.builder.set_current(anchor);
        Ok(())
    }

    fn build_clauses(
        &mut self,
        switch_scope: &Scopes<'_>,
        span: Span,
        binding: Option<(&str, Composition)>,
        clauses: &[CaseClause],
    ) -> Result<()> {
        let after = self.builder.acquire_point(Some(span));
        let fork = self.builder.current();

        for clause in clauses {
            self.builder.set_current(fork);
            let mut clause_scope = switch_scope.push_frame();
            if let Some((name, subject)) = &binding {
                let id = clause_scope.create_variable(name);
                self.emit_composition(Selector::whole(id), subject, clause.span);
            }
            self.build_stmts(&mut clause_scope, &clause.body)?;
            self.builder.connect_to(after)?;
        }
        if !clauses.iter().any(CaseClause::is_default) {
            self.builder.set_current(fork);
            self.builder.connect_to(after)?;
        }
        self.builder.set_current(after);
        Ok(())
    }

    fn build_return(&mut self, scopes: &Scopes<'_>, span: Span, results: &[Expr]) -> Result<()> {
        let values = if results.is_empty() {
            self.named_results.clone()
        } else {
            let compositions = self.evaluate_values(scopes, span, results, self.arity)?;
            compositions
                .iter()
                .map(|composition| {
                    let id = scopes.fresh();
                    self.emit_composition(Selector::whole(id), composition, span);
                    id
                })
                .collect()
        };
        self.builder.apply(Operation::Return { values }, Some(span));
        self.builder.detach();
        Ok(())
    }

    fn close_loop(&mut self, anchor: PointId) -> Result<()> {
        if self.builder.current() != anchor {
            self.builder.connect_to(anchor)?;
        }
        Ok(())
    }

    /// Right-hand sides of an assignment, one composition per target.
    ///
    /// Accepts N:N, 1:N (one multi-valued expression) and 0:N (zero-value
    /// declaration).
    fn evaluate_values(
        &mut self,
        scopes: &Scopes<'_>,
        span: Span,
        values: &[Expr],
        targets: usize,
    ) -> Result<Vec<Composition>> {
        let compositions = match values {
            [] => vec![Composition::blank(); targets],
            [single] => self.evaluate(scopes, single, targets)?,
            _ if values.len() == targets => values
                .iter()
                .map(|value| self.evaluate_single(scopes, value))
                .collect::<Result<Vec<_>>>()?,
            _ => {
                return Err(AnalysisError::invalid_input(
                    span,
                    format!("{} values assigned to {} targets", values.len(), targets),
                ))
            }
        };
        if compositions.len() != targets {
            return Err(AnalysisError::invalid_input(
                span,
                format!(
                    "expression yields {} values for {} targets",
                    compositions.len(),
                    targets
                ),
            ));
        }
        Ok(compositions)
    }

    /// `target = composition`, one selector assignment per embed
    fn emit_composition(&mut self, target: Selector, composition: &Composition, span: Span) {
        if composition.is_unknown() {
            if !target.is_blank() {
                self.builder
                    .apply(Operation::assign(Selector::blank(), target), Some(span));
            }
            return;
        }
        for embed in composition.embeds() {
            if target.is_blank() && embed.selector.is_blank() {
                continue;
            }
            let to = target.extend(&embed.path);
            self.builder
                .apply(Operation::assign(embed.selector.clone(), to), Some(span));
        }
    }
}

/// Flatten `if / else if / else` into branches; `true` when a final else exists
fn deconstruct_if(stmt: &Stmt) -> Result<(Vec<IfBranch<'_>>, bool)> {
    let mut branches = Vec::new();
    let mut current = stmt;
    loop {
        let StmtKind::If {
            init,
            cond,
            then_block,
            else_branch,
        } = &current.kind
        else {
            return Err(AnalysisError::invalid_input(current.span, "expected if statement"));
        };
        branches.push(IfBranch {
            init: init.as_deref(),
            cond: Some(cond),
            body: then_block,
        });

        let Some(else_branch) = else_branch else {
            return Ok((branches, false));
        };
        match &else_branch.kind {
            StmtKind::If { .. } => current = else_branch,
            StmtKind::Block(block) => {
                branches.push(IfBranch {
                    init: None,
                    cond: None,
                    body: block,
                });
                return Ok((branches, true));
            }
            _ => {
                return Err(AnalysisError::invalid_input(
                    else_branch.span,
                    "else branch must be a block or an if statement",
                ))
            }
        }
    }
}
