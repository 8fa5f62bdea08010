//! Expression resolution
//!
//! Every expression resolves to one [`Composition`] per requested output.
//! Only identifiers, field selection, keyed struct literals, modeled calls
//! and slice expressions carry provenance; everything else is blank.

use super::from_syntax::ExecutionFromSyntax;
use crate::errors::{AnalysisError, Result};
use crate::features::execution::{Composition, Operation, Selector};
use crate::features::graph_builder::domain::Scopes;
use crate::features::syntax::{CompositeKind, Expr, ExprKind};
use crate::shared::models::{FuncId, ValueId};

impl<'r> ExecutionFromSyntax<'r> {
    /// Resolve `expr` into `outputs` compositions; `0` evaluates for effect
    pub(super) fn evaluate(
        &mut self,
        scopes: &Scopes<'_>,
        expr: &Expr,
        outputs: usize,
    ) -> Result<Vec<Composition>> {
        match &expr.kind {
            ExprKind::Paren(inner) => self.evaluate(scopes, inner, outputs),
            ExprKind::Ident(name) => {
                let value = scopes.lookup_or_blank(name);
                shape(expr, Composition::of(Selector::whole(value)), outputs)
            }
            ExprKind::Selector { operand, field } => {
                let base = self.evaluate_single(scopes, operand)?;
                shape(expr, base.select(field), outputs)
            }
            ExprKind::Call { callee, args } => self.evaluate_call(scopes, expr, callee, args, outputs),
            ExprKind::Slice {
                operand,
                low,
                high,
                max,
            } => {
                let base = self.evaluate_single(scopes, operand)?;
                for index in [low, high, max].into_iter().flatten() {
                    self.evaluate(scopes, index, 0)?;
                }
                // Two-index slices alias their operand
                if max.is_none() {
                    return shape(expr, base, outputs);
                }
                match self.registry.slice_id() {
                    Some(slice) => Ok(self.emit_call(scopes, expr, slice, vec![base], outputs)),
                    None => Ok(blanks(outputs)),
                }
            }
            ExprKind::CompositeLit { kind, elements } => {
                let mut composition = Composition::unknown();
                for element in elements {
                    let value = self.evaluate_single(scopes, &element.value)?;
                    let (CompositeKind::Struct, Some(key)) = (kind, &element.key) else {
                        continue;
                    };
                    let value = if value.is_unknown() {
                        Composition::blank()
                    } else {
                        value
                    };
                    for embed in value.nest(key).embeds() {
                        composition.push(embed.clone());
                    }
                }
                if composition.is_unknown() {
                    composition = Composition::blank();
                }
                shape(expr, composition, outputs)
            }
            ExprKind::Unary(operand) | ExprKind::TypeAssert(operand) => {
                self.evaluate(scopes, operand, 0)?;
                Ok(blanks(outputs))
            }
            ExprKind::Binary(lhs, rhs) => {
                self.evaluate(scopes, lhs, 0)?;
                self.evaluate(scopes, rhs, 0)?;
                Ok(blanks(outputs))
            }
            ExprKind::Index { operand, index } => {
                self.evaluate(scopes, operand, 0)?;
                self.evaluate(scopes, index, 0)?;
                Ok(blanks(outputs))
            }
            ExprKind::Literal | ExprKind::FuncLit | ExprKind::Other => Ok(blanks(outputs)),
            ExprKind::Bad => Err(AnalysisError::invalid_input(expr.span, "malformed expression")),
        }
    }

    pub(super) fn evaluate_single(&mut self, scopes: &Scopes<'_>, expr: &Expr) -> Result<Composition> {
        let mut compositions = self.evaluate(scopes, expr, 1)?;
        compositions.pop().ok_or_else(|| {
            AnalysisError::invalid_input(expr.span, "expression produced no value")
        })
    }

    fn evaluate_call(
        &mut self,
        scopes: &Scopes<'_>,
        expr: &Expr,
        callee: &Expr,
        args: &[Expr],
        outputs: usize,
    ) -> Result<Vec<Composition>> {
        // A local binding shadows a modeled function of the same name
        let modeled = match &callee.unparen().kind {
            ExprKind::Ident(name) if scopes.lookup(name).is_none() => self.registry.lookup(name),
            _ => None,
        };

        let inputs = args
            .iter()
            .map(|arg| self.evaluate_single(scopes, arg))
            .collect::<Result<Vec<_>>>()?;

        match modeled {
            Some(func) => Ok(self.emit_call(scopes, expr, func, inputs, outputs)),
            None => Ok(blanks(outputs)),
        }
    }

    /// Bind `inputs` to fresh outputs through a call effect
    fn emit_call(
        &mut self,
        scopes: &Scopes<'_>,
        expr: &Expr,
        func: FuncId,
        inputs: Vec<Composition>,
        outputs: usize,
    ) -> Vec<Composition> {
        let values: Vec<ValueId> = (0..outputs).map(|_| scopes.fresh()).collect();
        self.builder.apply(
            Operation::CallEffect {
                func,
                inputs,
                outputs: values.clone(),
            },
            Some(expr.span),
        );
        values
            .into_iter()
            .map(|value| Composition::of(Selector::whole(value)))
            .collect()
    }
}

/// Fit a single-valued result to the requested output count
fn shape(expr: &Expr, composition: Composition, outputs: usize) -> Result<Vec<Composition>> {
    match outputs {
        0 => Ok(Vec::new()),
        1 => Ok(vec![composition]),
        n => Err(AnalysisError::invalid_input(
            expr.span,
            format!("single-valued expression used where {} values are expected", n),
        )),
    }
}

fn blanks(outputs: usize) -> Vec<Composition> {
    vec![Composition::blank(); outputs]
}
