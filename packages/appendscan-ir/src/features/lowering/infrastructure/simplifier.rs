//! Simplifier
//!
//! Rewrites a rich execution into scalar `AssignValue` edges. Each rich edge
//! `p -> q` becomes one chain of primitive edges per possible outcome, from
//! the image of `p` to the image of `q`; the chain's intermediate points map
//! back to `q`.

use crate::config::FactorizationConfig;
use crate::errors::{AnalysisError, Result};
use crate::features::execution::{
    Composition, Execution, ExecutionBuilder, GenDelta, Operation, Selector, Transition,
};
use crate::features::factorization::{FactorizationRules, Factorizer, SelectorAssignment};
use crate::features::function_summary::FunctionSummaryRegistry;
use crate::features::lowering::domain::{Lowering, ValueTable};
use crate::shared::models::{FuncId, PointId, Span, ValueId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Lower `execution` using the registry's summaries
pub fn simplify(
    registry: &FunctionSummaryRegistry,
    execution: &Execution,
    config: &FactorizationConfig,
) -> Result<Lowering> {
    let assignments = collect_assignments(registry, execution);
    let rules = Factorizer::new(config).factorize(&assignments);
    tracing::debug!(
        assignments = assignments.len(),
        rules = rules.len(),
        "factorization rules ready"
    );

    let lowering = Simplifier::new(registry, execution, rules).run()?;
    tracing::debug!(
        rich_points = execution.point_count(),
        points = lowering.execution().point_count(),
        transitions = lowering.execution().transition_count(),
        values = lowering.values().len(),
        "execution simplified"
    );
    tracing::trace!("primitive execution:\n{}", lowering.execution());
    Ok(lowering)
}

/// Every selector assignment the rich graph performs, call effects included.
///
/// Registered calls contribute the bindings of all their outcomes; unknown
/// calls contribute blank assignments to their outputs.
pub fn collect_assignments(
    registry: &FunctionSummaryRegistry,
    execution: &Execution,
) -> Vec<SelectorAssignment> {
    let mut assignments = Vec::new();
    for (_, transition) in execution.edges() {
        match &transition.op {
            Operation::AssignSelector { from, to } => {
                assignments.push(SelectorAssignment::new(from.clone(), to.clone()));
            }
            Operation::CallEffect {
                func,
                inputs,
                outputs,
            } => match registry.get(*func) {
                Some(summary) => {
                    for bound in summary.bind(inputs, outputs).into_iter().flatten() {
                        assignments.push(SelectorAssignment::new(bound.from, bound.to));
                    }
                }
                None => {
                    for &output in outputs {
                        assignments.push(SelectorAssignment::new(
                            Selector::blank(),
                            Selector::whole(output),
                        ));
                    }
                }
            },
            Operation::Return { .. } | Operation::NoOp | Operation::AssignValue { .. } => {}
        }
    }
    assignments
}

struct Simplifier<'a> {
    registry: &'a FunctionSummaryRegistry,
    rich: &'a Execution,
    rules: FactorizationRules,
    values: ValueTable,
    builder: ExecutionBuilder,

    /// Rich point → primitive point
    images: FxHashMap<PointId, PointId>,

    /// Primitive point → rich point
    origins: FxHashMap<PointId, PointId>,

    visited: FxHashSet<PointId>,
    worklist: VecDeque<PointId>,
}

impl<'a> Simplifier<'a> {
    fn new(
        registry: &'a FunctionSummaryRegistry,
        rich: &'a Execution,
        rules: FactorizationRules,
    ) -> Self {
        let builder = ExecutionBuilder::new(rich.reference(rich.root()));
        let mut images = FxHashMap::default();
        let mut origins = FxHashMap::default();
        images.insert(rich.root(), builder.current());
        origins.insert(builder.current(), rich.root());

        Self {
            registry,
            rich,
            rules,
            values: ValueTable::new(),
            builder,
            images,
            origins,
            visited: FxHashSet::default(),
            worklist: VecDeque::new(),
        }
    }

    fn run(mut self) -> Result<Lowering> {
        self.visited.insert(self.rich.root());
        self.worklist.push_back(self.rich.root());

        while let Some(point) = self.worklist.pop_front() {
            let rich = self.rich;
            for transition in rich.transitions_from(point) {
                self.lower_transition(point, transition)?;
                if self.visited.insert(transition.to) {
                    self.worklist.push_back(transition.to);
                }
            }
        }

        Ok(Lowering::new(
            self.builder.finish(),
            self.origins,
            self.values,
            self.rules,
        ))
    }

    /// Primitive image of a rich point, allocated on first use
    fn image(&mut self, point: PointId) -> PointId {
        if let Some(&image) = self.images.get(&point) {
            return image;
        }
        let image = self.builder.acquire_point(self.rich.reference(point));
        self.images.insert(point, image);
        self.origins.insert(image, point);
        image
    }

    fn lower_transition(&mut self, from: PointId, transition: &Transition) -> Result<()> {
        let start = self.image(from);
        let end = self.image(transition.to);
        let chains = self.chains(&transition.op)?;

        for chain in chains {
            self.builder.set_current(start);
            self.emit_chain(chain, transition.to, end)?;
        }
        Ok(())
    }

    /// Primitive operation sequences for one rich operation, one per outcome
    fn chains(&mut self, op: &Operation) -> Result<Vec<Vec<Operation>>> {
        match op {
            Operation::AssignSelector { from, to } => {
                let mut chain = Vec::new();
                self.lower_assignment(from, to, GenDelta::Same, &mut chain)?;
                Ok(vec![chain])
            }
            Operation::CallEffect {
                func,
                inputs,
                outputs,
            } => self.lower_call(*func, inputs, outputs),
            Operation::Return { values } => {
                let mut leaves = Vec::with_capacity(values.len());
                for &value in values {
                    if value.is_blank() {
                        leaves.push(ValueId::BLANK);
                        continue;
                    }
                    for leaf in self.rules.factorize_selector(&Selector::whole(value))? {
                        leaves.push(self.values.intern(&leaf));
                    }
                }
                Ok(vec![vec![Operation::Return { values: leaves }]])
            }
            Operation::NoOp => Ok(vec![Vec::new()]),
            Operation::AssignValue { .. } => Err(AnalysisError::internal(format!(
                "primitive operation in rich execution: {}",
                op
            ))),
        }
    }

    fn lower_call(
        &mut self,
        func: FuncId,
        inputs: &[Composition],
        outputs: &[ValueId],
    ) -> Result<Vec<Vec<Operation>>> {
        let registry = self.registry;
        let Some(summary) = registry.get(func) else {
            // Unknown provenance
            let mut chain = Vec::new();
            for &output in outputs {
                self.lower_assignment(
                    &Selector::blank(),
                    &Selector::whole(output),
                    GenDelta::Same,
                    &mut chain,
                )?;
            }
            return Ok(vec![chain]);
        };

        let mut chains = Vec::new();
        for outcome in summary.bind(inputs, outputs) {
            let mut chain = Vec::new();
            for bound in outcome {
                self.lower_assignment(&bound.from, &bound.to, bound.gen, &mut chain)?;
            }
            chains.push(chain);
        }
        Ok(chains)
    }

    /// Scalar assignments for `to = from`, leaves paired by their suffix
    fn lower_assignment(
        &mut self,
        from: &Selector,
        to: &Selector,
        gen: GenDelta,
        chain: &mut Vec<Operation>,
    ) -> Result<()> {
        match (from.is_blank(), to.is_blank()) {
            (true, true) => {}
            (true, false) => {
                for target in self.rules.factorize_selector(to)? {
                    chain.push(Operation::AssignValue {
                        from: ValueId::BLANK,
                        to: self.values.intern(&target),
                        gen,
                    });
                }
            }
            (false, true) => {
                for source in self.rules.factorize_selector(from)? {
                    chain.push(Operation::AssignValue {
                        from: self.values.intern(&source),
                        to: ValueId::BLANK,
                        gen,
                    });
                }
            }
            (false, false) => {
                let sources = self.rules.factorize_selector(from)?;
                let targets = self.rules.factorize_selector(to)?;
                // `it = it.Parent` or a depth-capped cycle: leaf sets may differ
                let lenient = from.value == to.value || self.rules.is_truncated();
                if !lenient && sources.len() != targets.len() {
                    return Err(AnalysisError::internal(format!(
                        "inconsistent factorization for {} = {}: {} target leaves, {} source leaves",
                        to,
                        from,
                        targets.len(),
                        sources.len()
                    )));
                }

                for target in targets {
                    let suffix = target.path.get(to.path.len()..).unwrap_or_default();
                    let source = sources.iter().find(|source| {
                        source.path.strip_prefix(from.path.as_slice()) == Some(suffix)
                    });
                    let source_id = match source {
                        Some(source) => self.values.intern(source),
                        None if lenient => ValueId::BLANK,
                        None => {
                            return Err(AnalysisError::internal(format!(
                                "no source leaf of {} matches {}",
                                from, target
                            )))
                        }
                    };
                    chain.push(Operation::AssignValue {
                        from: source_id,
                        to: self.values.intern(&target),
                        gen,
                    });
                }
            }
        }
        Ok(())
    }

    /// Emit `chain` from the cursor into `end`
    fn emit_chain(&mut self, chain: Vec<Operation>, rich_to: PointId, end: PointId) -> Result<()> {
        let span = self.rich.reference(rich_to);
        let mut ops = chain.into_iter().peekable();
        while let Some(op) = ops.next() {
            if ops.peek().is_none() && self.builder.current() != end {
                return self.builder.apply_to(op, end);
            }
            self.step(op, span, rich_to);
        }
        // Rich self-loop with nothing to emit
        if self.builder.current() == end {
            self.step(Operation::NoOp, span, rich_to);
        }
        self.builder.connect_to(end)
    }

    fn step(&mut self, op: Operation, span: Option<Span>, rich_to: PointId) {
        let point = self.builder.apply(op, span);
        self.origins.insert(point, rich_to);
    }
}
