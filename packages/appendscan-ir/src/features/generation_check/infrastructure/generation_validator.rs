//! Per-trace generation replay

use crate::errors::{AnalysisError, Result};
use crate::features::execution::{GenDelta, Operation, Transition};
use crate::features::generation_check::domain::{Lineage, Origin, TraceConflict};
use crate::shared::models::{PointId, ValueId};
use rustc_hash::FxHashMap;

/// Replays one trace left to right
#[derive(Debug, Default)]
pub struct GenerationValidator {
    lineages: FxHashMap<ValueId, Lineage>,
    highest: FxHashMap<Origin, i64>,
    next_fresh: u32,
}

impl GenerationValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lineage of a value, if any edge defined or read it
    pub fn lineage(&self, value: ValueId) -> Option<Lineage> {
        self.lineages.get(&value).copied()
    }

    /// Highest generation reached by an origin so far
    pub fn highest(&self, origin: Origin) -> Option<i64> {
        self.highest.get(&origin).copied()
    }

    pub fn step(&mut self, transition: &Transition) -> Result<Option<TraceConflict>> {
        match &transition.op {
            Operation::AssignValue { from, to, gen } => {
                Ok(self.assign(*from, *to, *gen, transition.to))
            }
            Operation::NoOp | Operation::Return { .. } => Ok(None),
            Operation::AssignSelector { .. } | Operation::CallEffect { .. } => {
                Err(AnalysisError::internal(format!(
                    "{} edge reached the generation validator",
                    transition.op.kind_name()
                )))
            }
        }
    }

    fn assign(
        &mut self,
        from: ValueId,
        to: ValueId,
        gen: GenDelta,
        point: PointId,
    ) -> Option<TraceConflict> {
        if to.is_blank() {
            return None;
        }

        let candidate = if from.is_blank() {
            let origin = Origin::Fresh(self.next_fresh);
            self.next_fresh += 1;
            Lineage::new(origin, 0)
        } else {
            let source = *self
                .lineages
                .entry(from)
                .or_insert_with(|| Lineage::new(Origin::Value(from), 0));
            Lineage::new(source.origin, source.generation + gen.as_i64())
        };

        let mut conflict = None;
        match self.highest.get(&candidate.origin).copied() {
            Some(highest) if gen == GenDelta::Next && candidate.generation <= highest => {
                conflict = Some(TraceConflict {
                    point,
                    origin: candidate.origin,
                    source: from,
                });
            }
            Some(highest) if candidate.generation <= highest => {}
            _ => {
                self.highest.insert(candidate.origin, candidate.generation);
            }
        }

        self.lineages.insert(to, candidate);
        conflict
    }
}

/// Every conflict along `trace`, in order
pub fn validate_trace(trace: &[&Transition]) -> Result<Vec<TraceConflict>> {
    let mut validator = GenerationValidator::new();
    let mut conflicts = Vec::new();
    for transition in trace {
        if let Some(conflict) = validator.step(transition)? {
            conflicts.push(conflict);
        }
    }
    Ok(conflicts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn v(raw: u32) -> ValueId {
        ValueId::new(raw)
    }

    fn edge(to: u32, from: ValueId, target: ValueId, gen: GenDelta) -> Transition {
        Transition {
            to: PointId::new(to),
            op: Operation::AssignValue {
                from,
                to: target,
                gen,
            },
        }
    }

    fn run(edges: &[Transition]) -> Vec<TraceConflict> {
        let trace: Vec<&Transition> = edges.iter().collect();
        validate_trace(&trace).unwrap()
    }

    #[test]
    fn test_two_appends_from_same_base_conflict() {
        // next = append(prefix); next = append(prefix)
        let (prefix, next) = (v(0), v(1));
        let conflicts = run(&[
            edge(1, prefix, next, GenDelta::Next),
            edge(2, prefix, next, GenDelta::Next),
        ]);
        assert_eq!(
            conflicts,
            vec![TraceConflict {
                point: PointId::new(2),
                origin: Origin::Value(prefix),
                source: prefix,
            }]
        );
    }

    #[test]
    fn test_accumulating_append_is_clean() {
        // ret = append(ret); ret = append(ret)
        let ret = v(0);
        let conflicts = run(&[
            edge(1, ValueId::BLANK, ret, GenDelta::Same),
            edge(2, ret, ret, GenDelta::Next),
            edge(3, ret, ret, GenDelta::Next),
        ]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_append_after_bounded_reslice_is_clean() {
        // b = a[:n:n]; c = append(b); d = append(a)
        let (a, b, c, d) = (v(0), v(1), v(2), v(3));
        let conflicts = run(&[
            edge(1, a, b, GenDelta::Prev),
            edge(2, b, c, GenDelta::Next),
            edge(3, a, d, GenDelta::Next),
        ]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_alias_then_append_conflicts() {
        // b = a; c = append(a); d = append(b)
        let (a, b, c, d) = (v(0), v(1), v(2), v(3));
        let conflicts = run(&[
            edge(1, a, b, GenDelta::Same),
            edge(2, a, c, GenDelta::Next),
            edge(3, b, d, GenDelta::Next),
        ]);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].point, PointId::new(3));
        assert_eq!(conflicts[0].source, b);
    }

    #[test]
    fn test_blank_source_is_always_fresh() {
        let x = v(0);
        let mut validator = GenerationValidator::new();
        for point in 1..=3 {
            let conflict = validator
                .step(&edge(point, ValueId::BLANK, x, GenDelta::Next))
                .unwrap();
            assert_eq!(conflict, None);
        }
        assert_eq!(validator.lineage(x).unwrap().origin, Origin::Fresh(2));
    }

    #[test]
    fn test_blank_target_records_nothing() {
        let mut validator = GenerationValidator::new();
        validator
            .step(&edge(1, v(0), ValueId::BLANK, GenDelta::Next))
            .unwrap();
        assert_eq!(validator.lineage(ValueId::BLANK), None);
        assert_eq!(validator.lineage(v(0)), None);
        assert_eq!(validator.highest(Origin::Value(v(0))), None);
    }

    #[test]
    fn test_noop_and_return_are_skipped() {
        let conflicts = run(&[
            Transition {
                to: PointId::new(1),
                op: Operation::NoOp,
            },
            Transition {
                to: PointId::new(2),
                op: Operation::Return { values: vec![v(0)] },
            },
        ]);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_rich_operation_is_internal_error() {
        let mut validator = GenerationValidator::new();
        let err = validator
            .step(&Transition {
                to: PointId::new(1),
                op: Operation::assign(
                    crate::features::execution::Selector::blank(),
                    crate::features::execution::Selector::blank(),
                ),
            })
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Internal(_)));
    }
}
