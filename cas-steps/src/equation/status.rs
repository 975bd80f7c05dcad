use crate::{change_type::ChangeType, status::{ChangeGroups, Status}};
use super::{Equation, Side};

/// Change groups for both sides of an equation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EquationGroups {
    pub left: ChangeGroups,
    pub right: ChangeGroups,
}

impl EquationGroups {
    fn on(side: Side, groups: ChangeGroups) -> Self {
        match side {
            Side::Left => Self { left: groups, ..Self::default() },
            Side::Right => Self { right: groups, ..Self::default() },
        }
    }
}

/// The result of one step of solving an equation. The equation-level counterpart of [`Status`].
#[derive(Debug, Clone, PartialEq)]
pub struct EquationStatus {
    /// The rule that was applied.
    pub change_type: ChangeType,

    /// The equation before the step, present exactly when something changed.
    pub old_equation: Option<Equation>,

    /// The equation after the step.
    pub new_equation: Equation,

    /// The smaller steps that explain this step, in order.
    pub substeps: Vec<EquationStatus>,

    /// Correlation between parts of the old and new equation, per side.
    pub groups: EquationGroups,
}

impl EquationStatus {
    /// Creates a status recording that nothing changed.
    pub fn no_change(equation: Equation) -> Self {
        Self {
            change_type: ChangeType::NoChange,
            old_equation: None,
            new_equation: equation,
            substeps: Vec::new(),
            groups: EquationGroups::default(),
        }
    }

    /// Creates a status recording that `old_equation` became `new_equation`.
    ///
    /// # Panics
    ///
    /// Panics if `change_type` is [`ChangeType::NoChange`].
    pub fn equation_changed(change_type: ChangeType, old_equation: Equation, new_equation: Equation) -> Self {
        Self::with_substeps(change_type, old_equation, new_equation, Vec::new())
    }

    /// Like [`EquationStatus::equation_changed`], with the given substeps.
    pub fn with_substeps(
        change_type: ChangeType,
        old_equation: Equation,
        new_equation: Equation,
        substeps: Vec<EquationStatus>,
    ) -> Self {
        assert!(
            !change_type.is_no_change(),
            "a changed equation must be tagged with a rule other than {}",
            ChangeType::NoChange,
        );

        Self {
            change_type,
            old_equation: Some(old_equation),
            new_equation,
            substeps,
            groups: EquationGroups::default(),
        }
    }

    /// Lifts a step on one side of `equation` into a step on the whole equation. Substeps are
    /// lifted the same way.
    pub fn from_side(equation: &Equation, side: Side, status: &Status) -> Self {
        if !status.has_changed() {
            return Self::no_change(equation.clone());
        }

        Self {
            change_type: status.change_type,
            old_equation: status.old_node.as_ref().map(|old| equation.with_side(side, old.clone())),
            new_equation: equation.with_side(side, status.new_node.clone()),
            substeps: status.substeps.iter()
                .map(|substep| Self::from_side(equation, side, substep))
                .collect(),
            groups: EquationGroups::on(side, status.groups.clone()),
        }
    }

    /// Returns true if the step changed the equation.
    pub fn has_changed(&self) -> bool {
        !self.change_type.is_no_change()
    }

    /// Returns the status if it changed the equation.
    pub fn changed(self) -> Option<Self> {
        self.has_changed().then_some(self)
    }

    /// Drops all change groups, recursively through the substeps.
    pub fn reset_change_groups(mut self) -> Self {
        self.groups = EquationGroups::default();
        self.substeps = self.substeps.into_iter().map(Self::reset_change_groups).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::node::tests::parse_node;
    use super::*;

    #[test]
    fn lift_right_side() {
        let equation = Equation::parse("x = 2 + 3").unwrap();
        let status = Status::with_substeps(
            ChangeType::SimplifyArithmetic,
            parse_node("2 + 3"),
            parse_node("5"),
            vec![Status::node_changed(ChangeType::SimplifyArithmetic, parse_node("2 + 3"), parse_node("5"))],
        );

        let lifted = EquationStatus::from_side(&equation, Side::Right, &status);
        assert_eq!(lifted.old_equation.as_ref().map(ToString::to_string).as_deref(), Some("x = 2 + 3"));
        assert_eq!(lifted.new_equation.to_string(), "x = 5");
        assert_eq!(lifted.substeps[0].new_equation.to_string(), "x = 5");
        assert!(lifted.groups.left.is_empty());
        assert!(!lifted.groups.right.is_empty());
        assert!(lifted.reset_change_groups().groups.right.is_empty());
    }

    #[test]
    fn unchanged_side() {
        let equation = Equation::parse("x = 5").unwrap();
        let status = Status::no_change(parse_node("5"));
        assert!(!EquationStatus::from_side(&equation, Side::Right, &status).has_changed());
    }
}
