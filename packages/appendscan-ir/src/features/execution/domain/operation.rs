//! Edge labels of an execution graph

use super::composition::{Composition, Selector};
use crate::shared::models::{FuncId, ValueId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generation movement along an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenDelta {
    /// Re-expose an earlier version (bounded re-slice)
    Prev,
    /// Plain alias
    #[default]
    Same,
    /// New version that may share backing storage (append)
    Next,
}

impl GenDelta {
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Prev => -1,
            Self::Same => 0,
            Self::Next => 1,
        }
    }
}

impl fmt::Display for GenDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prev => f.write_str("-1"),
            Self::Same => f.write_str("0"),
            Self::Next => f.write_str("+1"),
        }
    }
}

/// Operation carried by a transition.
///
/// Rich graphs hold `AssignSelector`, `CallEffect`, `Return` and `NoOp`.
/// Primitive graphs hold `AssignValue`, `Return` and `NoOp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    AssignSelector {
        from: Selector,
        to: Selector,
    },
    CallEffect {
        func: FuncId,
        inputs: Vec<Composition>,
        outputs: Vec<ValueId>,
    },
    Return {
        values: Vec<ValueId>,
    },
    NoOp,
    AssignValue {
        from: ValueId,
        to: ValueId,
        gen: GenDelta,
    },
}

impl Operation {
    pub fn assign(from: Selector, to: Selector) -> Self {
        Self::AssignSelector { from, to }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::AssignSelector { .. } => "assign_selector",
            Self::CallEffect { .. } => "call_effect",
            Self::Return { .. } => "return",
            Self::NoOp => "noop",
            Self::AssignValue { .. } => "assign_value",
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssignSelector { from, to } => write!(f, "{} = {}", to, from),
            Self::CallEffect {
                func,
                inputs,
                outputs,
            } => {
                write!(f, "call {}(", func)?;
                for (i, input) in inputs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", input)?;
                }
                write!(f, ") -> {}", join_values(outputs))
            }
            Self::Return { values } => write!(f, "return {}", join_values(values)),
            Self::NoOp => f.write_str("noop"),
            Self::AssignValue { from, to, gen } => write!(f, "{} <- {} ({})", to, from, gen),
        }
    }
}

fn join_values(values: &[ValueId]) -> String {
    let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
