//! The solver: a loop of side simplification followed by one algebraic move, until the symbol is
//! isolated on the left side.
//!
//! Each iteration:
//!
//! 1. simplifies the left side, then the right side, recording the steps (grouped under
//!    [`ChangeType::SimplifyLeftSide`] / [`ChangeType::SimplifyRightSide`] when there is more than
//!    one);
//! 2. if no symbol is left, records whether the statement is true and stops;
//! 3. if one side is `0` and the other factors, records the factorization followed by one
//!    [`ChangeType::FindRoots`] step per distinct root, and stops;
//! 4. otherwise applies the first algebraic move that changes the equation, or stops if there is
//!    none.

use tracing::{debug, trace, warn};
use crate::{
    change_type::ChangeType,
    checks::has_unsupported_nodes,
    error::Error,
    factor::factor_quadratic,
    node::{
        negative::{is_negative, negate},
        term::{CoefficientTerm, PolynomialTerm},
        Node,
        Op,
    },
    simplify::{self, normalize::normalize, Limits, Termination},
    step_collector::StepCollector,
};
use super::{Comparator, Equation, EquationStatus, Side};

/// Wraps a sum in parentheses, so it can be used as an operand of a product or quotient.
fn grouped(node: &Node) -> Node {
    match node {
        Node::Operator { op: Op::Add | Op::Sub, .. } => Node::parens(node.clone()),
        _ => node.clone(),
    }
}

fn is_negative_value(node: &Node) -> bool {
    node.evaluate().is_some_and(|value| value < 0.0)
}

fn is_zero(node: &Node) -> bool {
    node.unparenthesized().as_number() == Some(0.0)
}

/// Applies the same operation to both sides of the equation.
fn both_sides(
    equation: &Equation,
    change_type: ChangeType,
    comparator: Comparator,
    f: impl Fn(&Node) -> Node,
) -> EquationStatus {
    let new_equation = Equation::new(f(&equation.left), f(&equation.right), comparator);
    EquationStatus::equation_changed(change_type, equation.clone(), new_equation)
}

/// Removes the term from the side it is on, by adding its negation to or subtracting it from both
/// sides.
fn move_term(equation: &Equation, term: &Node) -> EquationStatus {
    if is_negative(term) {
        let positive = negate(term);
        both_sides(equation, ChangeType::AddToBothSides, equation.comparator, |side| {
            Node::add(vec![side.clone(), positive.clone()])
        })
    } else {
        both_sides(equation, ChangeType::SubtractFromBothSides, equation.comparator, |side| {
            Node::operator(Op::Sub, vec![side.clone(), grouped(term)])
        })
    }
}

/// Multiplies both sides by the factor, flipping the comparator if the factor is negative.
fn multiply_both_sides(equation: &Equation, change_type: ChangeType, factor: &Node) -> EquationStatus {
    let comparator = if is_negative_value(factor) {
        equation.comparator.flip()
    } else {
        equation.comparator
    };
    both_sides(equation, change_type, comparator, |side| Node::mul(vec![grouped(side), grouped(factor)]))
}

/// Divides both sides by the divisor, flipping the comparator if the divisor is negative.
fn divide_both_sides(equation: &Equation, divisor: &Node) -> EquationStatus {
    let comparator = if is_negative_value(divisor) {
        equation.comparator.flip()
    } else {
        equation.comparator
    };
    both_sides(equation, ChangeType::DivideFromBothSides, comparator, |side| {
        Node::div(grouped(side), grouped(divisor))
    })
}

/// Returns `d/n` for the fraction `n/d`, keeping the sign in the numerator.
fn inverse_fraction(fraction: &Node) -> Option<Node> {
    let (numerator, denominator) = fraction.as_fraction()?;
    let (numerator, denominator) = if numerator < 0.0 {
        (-denominator, -numerator)
    } else {
        (denominator, numerator)
    };
    Some(Node::div(Node::Number(numerator), Node::Number(denominator)))
}

/// Multiplies both sides by the inverse of a constant fraction, or divides them by any other
/// constant.
fn cancel_factor(equation: &Equation, factor: &Node) -> EquationStatus {
    match inverse_fraction(factor) {
        Some(inverse) => multiply_both_sides(equation, ChangeType::MultiplyBothSidesByInverseFraction, &inverse),
        None => divide_both_sides(equation, factor),
    }
}

/// `3 = x` becomes `x = 3`.
fn ensure_symbol_in_left_node(equation: &Equation, symbol: &str) -> Option<EquationStatus> {
    if equation.left.contains_symbol(symbol) || !equation.right.contains_symbol(symbol) {
        return None;
    }

    let new_equation = Equation::new(equation.right.clone(), equation.left.clone(), equation.comparator.flip());
    Some(EquationStatus::equation_changed(ChangeType::SwapSides, equation.clone(), new_equation))
}

/// Symbols in a denominator are left where they are; simplification is the only thing that
/// removes them. This move never applies.
fn remove_symbol_from_denominator(_: &Equation, _: &str) -> Option<EquationStatus> {
    None
}

/// `2x = x + 3` becomes `2x - x = x + 3 - x`.
fn remove_symbol_from_right_side(equation: &Equation, symbol: &str) -> Option<EquationStatus> {
    let right = equation.right.unparenthesized();
    if !right.contains_symbol(symbol) {
        return None;
    }

    let term = match right {
        Node::Operator { op: Op::Add, args, .. } => args.iter().rev().find(|arg| arg.contains_symbol(symbol))?,
        _ => right,
    };
    Some(move_term(equation, term))
}

/// Moves constants, coefficients, and denominators off the left side, one at a time.
fn isolate_symbol_on_left_side(equation: &Equation, symbol: &str) -> Option<EquationStatus> {
    let left = equation.left.unparenthesized();
    if !left.contains_symbol(symbol) {
        return None;
    }

    // x + 3 = 4
    if let Node::Operator { op: Op::Add, args, .. } = left {
        let term = args.iter().rev().find(|arg| !arg.contains_symbol(symbol))?;
        return Some(move_term(equation, term));
    }

    // 2x = 4, x / 3 = 4, -x = 4
    if let Some(term) = PolynomialTerm::new(left, false) {
        if term.symbol_name() != symbol || !term.has_coeff() {
            return None;
        }

        let coeff = term.coeff_node();
        if coeff.as_number() == Some(-1.0) {
            return Some(multiply_both_sides(equation, ChangeType::MultiplyBothSidesByNegativeOne, &coeff));
        }
        return Some(cancel_factor(equation, &coeff));
    }

    match left {
        // 2 * nthRoot(x) = 4
        Node::Operator { op: Op::Mul, args, .. } => {
            let factor = args.iter().find(|arg| !arg.contains_symbol(symbol))?;
            Some(cancel_factor(equation, factor))
        },
        // (x + 1) / 3 = 4
        Node::Operator { op: Op::Div, args, .. } if !args[1].contains_symbol(symbol) => {
            Some(multiply_both_sides(equation, ChangeType::MultiplyToBothSides, &args[1]))
        },
        // -nthRoot(x) = 4
        Node::UnaryMinus(_) => Some(multiply_both_sides(
            equation,
            ChangeType::MultiplyBothSidesByNegativeOne,
            &Node::Number(-1.0),
        )),
        _ => None,
    }
}

/// `x^2 = 4` becomes `x^2 - 4 = 4 - 4`, when the left side minus the constant factors.
fn move_constant_for_factoring(equation: &Equation, _: &str) -> Option<EquationStatus> {
    if equation.comparator != Comparator::Eq {
        return None;
    }
    let value = equation.right.as_number().filter(|value| *value != 0.0)?;

    let candidate = simplify::simplify(&Node::add(vec![equation.left.clone(), Node::Number(-value)]));
    if !factor_quadratic(&candidate).has_changed() {
        return None;
    }
    Some(move_term(equation, &equation.right))
}

/// A transition of the solver.
type Move = fn(&Equation, &str) -> Option<EquationStatus>;

/// The algebraic moves, in the order they are tried.
const MOVES: &[(&str, Move)] = &[
    ("ensure_symbol_in_left_node", ensure_symbol_in_left_node),
    ("remove_symbol_from_denominator", remove_symbol_from_denominator),
    ("remove_symbol_from_right_side", remove_symbol_from_right_side),
    ("isolate_symbol_on_left_side", isolate_symbol_on_left_side),
    ("move_constant_for_factoring", move_constant_for_factoring),
];

/// Applies the first algebraic move that changes the equation.
fn apply_move(equation: &Equation, symbol: &str) -> Option<EquationStatus> {
    MOVES.iter().find_map(|(name, apply)| {
        trace!(target: "cas_steps::equation", transition = *name, equation = %equation, "trying move");
        apply(equation, symbol)
    })
}

/// Simplifies one side of the equation, recording the steps. Returns the new equation, and
/// whether simplification stopped at a division by zero.
fn simplify_side(
    equation: &Equation,
    side: Side,
    limits: &Limits,
    steps: &mut dyn StepCollector<EquationStatus>,
) -> (Equation, bool) {
    let side_steps = simplify::step_through_with(equation.side(side), limits);
    let division_by_zero = side_steps.last()
        .is_some_and(|status| status.change_type == ChangeType::DivisionByZero);

    let mut current = equation.clone();
    let mut lifted = side_steps.iter()
        .map(|status| {
            let step = EquationStatus::from_side(&current, side, status);
            current = step.new_equation.clone();
            step
        })
        .collect::<Vec<_>>();

    match lifted.len() {
        0 => {},
        1 => steps.push(lifted.remove(0)),
        _ => {
            let change_type = match side {
                Side::Left => ChangeType::SimplifyLeftSide,
                Side::Right => ChangeType::SimplifyRightSide,
            };
            steps.push(EquationStatus::with_substeps(change_type, equation.clone(), current.clone(), lifted));
        },
    }

    (current, division_by_zero)
}

/// Records whether an equation without symbols is true.
fn check_statement(equation: &Equation) -> Option<EquationStatus> {
    let (left, right) = (equation.left.evaluate()?, equation.right.evaluate()?);
    let change_type = if equation.comparator.holds(left, right) {
        ChangeType::StatementIsTrue
    } else {
        ChangeType::StatementIsFalse
    };
    Some(EquationStatus::equation_changed(change_type, equation.clone(), equation.clone()))
}

/// Returns the side with the symbol, if the other side is `0`.
fn zero_side(equation: &Equation, symbol: &str) -> Option<Side> {
    if equation.comparator != Comparator::Eq {
        return None;
    }

    if is_zero(&equation.right) && equation.left.contains_symbol(symbol) {
        Some(Side::Left)
    } else if is_zero(&equation.left) && equation.right.contains_symbol(symbol) {
        Some(Side::Right)
    } else {
        None
    }
}

/// Solves each factor of a product set to zero, one step per distinct root.
///
/// Returns an empty list unless every factor with the symbol solves to `symbol = constant`.
fn find_roots(equation: &Equation, side: Side, symbol: &str, limits: &Limits) -> Vec<EquationStatus> {
    let factors = match equation.side(side).unparenthesized() {
        Node::Operator { op: Op::Mul, args, .. } => args.iter().collect::<Vec<_>>(),
        Node::Operator { op: Op::Pow, args, .. } if args[1].as_number().is_some_and(|e| e > 0.0) => vec![&args[0]],
        _ => return Vec::new(),
    };

    let mut roots: Vec<EquationStatus> = Vec::new();
    for factor in factors.into_iter().filter(|factor| factor.contains_symbol(symbol)) {
        let factor_equation = Equation::new(factor.unparenthesized().clone(), Node::Number(0.0), Comparator::Eq);
        let mut substeps = Vec::new();
        if !collect_steps(&factor_equation, limits, &mut substeps).is_success() {
            return Vec::new();
        }

        let solved = substeps.last()
            .map(|status| status.new_equation.clone())
            .unwrap_or(factor_equation);
        if solved.left.as_symbol() != Some(symbol) || !solved.right.resolves_to_constant() {
            return Vec::new();
        }

        if roots.iter().all(|root| root.new_equation != solved) {
            roots.push(EquationStatus::with_substeps(ChangeType::FindRoots, equation.clone(), solved, substeps));
        }
    }
    roots
}

/// Factors the side opposite a `0` and finds its roots. Returns the factorization step (if the
/// side was not already factored) followed by the root steps, or an empty list if the roots
/// cannot all be found.
fn factor_and_find_roots(equation: &Equation, symbol: &str, limits: &Limits) -> Vec<EquationStatus> {
    let Some(side) = zero_side(equation, symbol) else {
        return Vec::new();
    };

    let factored = factor_quadratic(equation.side(side));
    if !factored.has_changed() {
        return find_roots(equation, side, symbol, limits);
    }

    let factor_step = EquationStatus::from_side(equation, side, &factored);
    let roots = find_roots(&factor_step.new_equation, side, symbol, limits);
    if roots.is_empty() {
        return Vec::new();
    }

    let mut steps = vec![factor_step];
    steps.extend(roots);
    steps
}

/// Steps through the equation, pushing every step to the collector, and returns why stepping
/// stopped. When the returned [`Termination`] is not a success, the collected steps should be
/// discarded.
pub fn collect_steps(
    equation: &Equation,
    limits: &Limits,
    steps: &mut dyn StepCollector<EquationStatus>,
) -> Termination {
    let symbol = equation.symbol().unwrap_or_default().to_string();
    let mut current = equation.map_sides(normalize);
    let mut iterations = 0;

    loop {
        if iterations > limits.max_iterations {
            warn!(target: "cas_steps::equation", equation = %equation, iterations, reason = %Termination::IterationCap, "abandoning equation");
            return Termination::IterationCap;
        }
        iterations += 1;

        for side in [Side::Left, Side::Right] {
            let (next, division_by_zero) = simplify_side(&current, side, limits, steps);
            if division_by_zero {
                return Termination::DivisionByZero;
            }
            current = next;
        }
        current = current.map_sides(normalize);

        if current.to_string().len() > limits.max_equation_len {
            warn!(target: "cas_steps::equation", equation = %equation, iterations, reason = %Termination::SizeCap, "abandoning equation");
            return Termination::SizeCap;
        }

        if current.is_constant() {
            if let Some(status) = check_statement(&current) {
                debug!(target: "cas_steps::equation", rule = %status.change_type, result = %status.new_equation, "step");
                steps.push(status);
            }
            return Termination::Converged;
        }

        let roots = factor_and_find_roots(&current, &symbol, limits);
        if !roots.is_empty() {
            for status in roots {
                debug!(target: "cas_steps::equation", rule = %status.change_type, result = %status.new_equation, "step");
                steps.push(status);
            }
            return Termination::Converged;
        }

        let Some(status) = apply_move(&current, &symbol) else {
            return Termination::Converged;
        };
        debug!(target: "cas_steps::equation", rule = %status.change_type, result = %status.new_equation, "step");
        current = status.new_equation.clone();
        steps.push(status);
    }
}

/// Solves the equation with the given limits.
///
/// Returns [`Error::Unsupported`] if either side contains an unsupported operation, and
/// [`Error::Diverged`] if a cap was exceeded.
pub fn try_step_through(equation: &Equation, limits: &Limits) -> Result<Vec<EquationStatus>, Error> {
    if has_unsupported_nodes(&equation.left) || has_unsupported_nodes(&equation.right) {
        return Err(Error::Unsupported);
    }

    let mut steps = Vec::new();
    match collect_steps(equation, limits, &mut steps) {
        reason if reason.is_success() => Ok(steps),
        reason => Err(Error::Diverged { reason }),
    }
}

/// Solves the equation with the given limits. Unsupported or diverging input produces no steps.
pub fn step_through_with(equation: &Equation, limits: &Limits) -> Vec<EquationStatus> {
    try_step_through(equation, limits).unwrap_or_else(|err| {
        debug!(target: "cas_steps::equation", equation = %equation, error = %err, "no steps");
        Vec::new()
    })
}

/// Solves the equation with the default [`Limits`].
pub fn step_through(equation: &Equation) -> Vec<EquationStatus> {
    step_through_with(equation, &Limits::default())
}
