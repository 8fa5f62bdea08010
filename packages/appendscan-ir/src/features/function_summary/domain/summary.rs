//! Summary contract types

use crate::errors::{AnalysisError, Result};
use crate::features::execution::{Composition, FieldPath, GenDelta, Selector};
use crate::shared::models::ValueId;
use serde::{Deserialize, Serialize};

/// Contract of one callable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FunctionSummary {
    pub name: String,

    /// One slot per argument
    #[serde(default)]
    pub inputs: Vec<InputSlot>,

    /// One entry per possible control outcome of the callee
    pub outcomes: Vec<Outcome>,
}

/// Argument shape: the sub-components outputs may refer to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputSlot {
    #[serde(default = "whole_value")]
    pub components: Vec<FieldPath>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Outcome {
    pub outputs: Vec<OutputSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSlot {
    pub components: Vec<OutputComponent>,
}

/// One region of an output value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputComponent {
    /// Where the region sits inside the output
    #[serde(default)]
    pub path: FieldPath,

    /// Input region it aliases; `None` means a fresh value
    #[serde(default)]
    pub source: Option<InputRef>,

    #[serde(default)]
    pub gen: GenDelta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputRef {
    pub arg: usize,
    #[serde(default)]
    pub component: usize,
}

/// Selector assignment produced by binding a summary to a call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundAssignment {
    pub from: Selector,
    pub to: Selector,
    pub gen: GenDelta,
}

fn whole_value() -> Vec<FieldPath> {
    vec![Vec::new()]
}

impl InputSlot {
    pub fn whole() -> Self {
        Self {
            components: whole_value(),
        }
    }
}

impl OutputComponent {
    pub fn from_input(arg: usize, gen: GenDelta) -> Self {
        Self {
            path: Vec::new(),
            source: Some(InputRef { arg, component: 0 }),
            gen,
        }
    }

    pub fn fresh() -> Self {
        Self {
            path: Vec::new(),
            source: None,
            gen: GenDelta::Same,
        }
    }
}

impl FunctionSummary {
    /// Single-argument, single-output summary aliasing argument 0 with `gen`
    pub fn unary_alias(name: impl Into<String>, gen: GenDelta) -> Self {
        Self {
            name: name.into(),
            inputs: vec![InputSlot::whole()],
            outcomes: vec![Outcome {
                outputs: vec![OutputSlot {
                    components: vec![OutputComponent::from_input(0, gen)],
                }],
            }],
        }
    }

    pub fn output_count(&self) -> usize {
        self.outcomes.first().map_or(0, |o| o.outputs.len())
    }

    /// Registration checks
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(AnalysisError::invalid_summary("<unnamed>", "empty name"));
        }
        let Some(first) = self.outcomes.first() else {
            return Err(AnalysisError::invalid_summary(&self.name, "no outcomes"));
        };
        let arity = first.outputs.len();

        for (o, outcome) in self.outcomes.iter().enumerate() {
            if outcome.outputs.len() != arity {
                return Err(AnalysisError::invalid_summary(
                    &self.name,
                    format!(
                        "outcome {} has {} outputs, expected {}",
                        o,
                        outcome.outputs.len(),
                        arity
                    ),
                ));
            }
            for (s, slot) in outcome.outputs.iter().enumerate() {
                for component in &slot.components {
                    let Some(input) = component.source else {
                        continue;
                    };
                    let in_range = self
                        .inputs
                        .get(input.arg)
                        .is_some_and(|slot| input.component < slot.components.len());
                    if !in_range {
                        return Err(AnalysisError::invalid_summary(
                            &self.name,
                            format!(
                                "outcome {} output {} refers to undeclared input {}:{}",
                                o, s, input.arg, input.component
                            ),
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Bind the summary to a call site: one assignment list per outcome.
    ///
    /// Output slots beyond `outputs.len()` are dropped (the caller did not
    /// ask for them). A referenced input region that cannot be selected out
    /// of the argument composition assigns from blank.
    pub fn bind(&self, inputs: &[Composition], outputs: &[ValueId]) -> Vec<Vec<BoundAssignment>> {
        self.outcomes
            .iter()
            .map(|outcome| {
                let mut bound = Vec::new();
                for (slot, &output) in outcome.outputs.iter().zip(outputs) {
                    for component in &slot.components {
                        let target = Selector::new(output, component.path.clone());
                        let selected = component
                            .source
                            .and_then(|input| self.select_input(inputs, input))
                            .unwrap_or_else(Composition::blank);

                        if selected.is_unknown() {
                            bound.push(BoundAssignment {
                                from: Selector::blank(),
                                to: target,
                                gen: component.gen,
                            });
                            continue;
                        }
                        for embed in selected.embeds() {
                            bound.push(BoundAssignment {
                                from: embed.selector.clone(),
                                to: target.extend(&embed.path),
                                gen: component.gen,
                            });
                        }
                    }
                }
                bound
            })
            .collect()
    }

    fn select_input(&self, inputs: &[Composition], input: InputRef) -> Option<Composition> {
        let argument = inputs.get(input.arg)?;
        let path = self.inputs.get(input.arg)?.components.get(input.component)?;
        Some(argument.select_path(path))
    }
}
