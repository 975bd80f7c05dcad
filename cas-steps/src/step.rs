//! The printed form of steps returned by the public entry points.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use crate::{change_type::ChangeType, equation::EquationStatus, status::Status};

/// One step of simplifying an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Step {
    /// The rule that was applied.
    pub change_type: ChangeType,

    /// The whole expression after the step.
    pub result: String,

    /// The smaller steps that explain this one.
    pub substeps: Vec<Step>,
}

impl From<&Status> for Step {
    fn from(status: &Status) -> Self {
        Self {
            change_type: status.change_type,
            result: status.new_node.to_string(),
            substeps: status.substeps.iter().map(Step::from).collect(),
        }
    }
}

/// One step of solving an equation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EquationStep {
    /// The rule that was applied.
    pub change_type: ChangeType,

    /// The whole equation after the step.
    pub result: String,

    /// The smaller steps that explain this one.
    pub substeps: Vec<EquationStep>,
}

impl From<&EquationStatus> for EquationStep {
    fn from(status: &EquationStatus) -> Self {
        Self {
            change_type: status.change_type,
            result: status.new_equation.to_string(),
            substeps: status.substeps.iter().map(EquationStep::from).collect(),
        }
    }
}
