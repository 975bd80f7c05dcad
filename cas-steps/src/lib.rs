//! Step-by-step simplification of algebraic expressions, and solving of single-symbol equations.
//!
//! Rather than jumping straight to an answer, the stepper records every rewrite it makes, tagged
//! with the rule that justified it ([`ChangeType`]) and broken into substeps where a rule does
//! several things at once. This makes the output suitable for showing the work behind an answer.
//!
//! ```
//! use cas_steps::{simplify_expression, solve_equation, ChangeType};
//!
//! let steps = simplify_expression("x + 4 + x + 5");
//! assert_eq!(steps.last().unwrap().result, "2x + 9");
//!
//! let steps = solve_equation("x + 3 = 4", None);
//! assert_eq!(steps.last().unwrap().result, "x = 1");
//!
//! let steps = solve_equation("2 = 3", None);
//! assert_eq!(steps[0].change_type, ChangeType::StatementIsFalse);
//! ```
//!
//! The infallible entry points return an empty list when the input cannot be parsed, contains an
//! unsupported operation, or does not settle. The `try_` variants report which of these happened.

pub mod change_type;
pub mod checks;
pub mod equation;
pub mod error;
pub mod factor;
pub mod node;
pub mod primitive;
pub mod simplify;
pub mod status;
pub mod step;
pub mod step_collector;
pub mod tree_search;

pub use change_type::ChangeType;
pub use equation::{Comparator, Equation, EquationStatus, Scope};
pub use error::Error;
pub use node::Node;
pub use simplify::{Limits, Termination};
pub use status::Status;
pub use step::{EquationStep, Step};

use tracing::debug;

/// Parses and simplifies the expression with the given limits.
pub fn try_simplify_expression(text: &str, limits: &Limits) -> Result<Vec<Step>, Error> {
    let node = Node::parse(text).map_err(|err| Error::parse(text, err))?;
    let steps = simplify::try_step_through(&node, limits)?;
    Ok(steps.iter().map(Step::from).collect())
}

/// Parses and simplifies the expression, returning an empty list on failure.
pub fn simplify_expression(text: &str) -> Vec<Step> {
    try_simplify_expression(text, &Limits::default()).unwrap_or_else(|err| {
        debug!(target: "cas_steps", input = text, error = %err, "cannot simplify");
        Vec::new()
    })
}

/// Parses the expression and factors it. Factoring takes at most one step.
pub fn try_factor_expression(text: &str) -> Result<Vec<Step>, Error> {
    let node = Node::parse(text).map_err(|err| Error::parse(text, err))?;
    if checks::has_unsupported_nodes(&node) {
        return Err(Error::Unsupported);
    }
    Ok(factor::step_through(&node).iter().map(Step::from).collect())
}

/// Parses the expression and factors it, returning an empty list on failure.
pub fn factor_expression(text: &str) -> Vec<Step> {
    try_factor_expression(text).unwrap_or_else(|err| {
        debug!(target: "cas_steps", input = text, error = %err, "cannot factor");
        Vec::new()
    })
}

/// Substitutes the scope into the equation, then parses and solves it with the given limits.
pub fn try_solve_equation(text: &str, scope: Option<&Scope>, limits: &Limits) -> Result<Vec<EquationStep>, Error> {
    let text = match scope {
        Some(scope) => equation::scope::substitute(text, scope, limits.max_iterations)?,
        None => text.to_string(),
    };
    let equation = Equation::parse(&text)?;
    let steps = equation::solve::try_step_through(&equation, limits)?;
    Ok(steps.iter().map(EquationStep::from).collect())
}

/// Substitutes the scope into the equation, then parses and solves it, returning an empty list on
/// failure.
pub fn solve_equation(text: &str, scope: Option<&Scope>) -> Vec<EquationStep> {
    try_solve_equation(text, scope, &Limits::default()).unwrap_or_else(|err| {
        debug!(target: "cas_steps", input = text, error = %err, "cannot solve");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn results(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|step| step.result.as_str()).collect()
    }

    #[test]
    fn like_terms() {
        let steps = simplify_expression("x + 4 + x + 5");
        assert_eq!(steps.last().map(|step| step.result.as_str()), Some("2x + 9"));
    }

    #[test]
    fn fraction_reduction() {
        let steps = simplify_expression("12/27");
        assert_eq!(results(&steps), vec!["4/9"]);
        assert_eq!(steps[0].change_type, ChangeType::SimplifyFraction);
        assert_eq!(
            steps[0].substeps.iter().map(|step| step.change_type).collect::<Vec<_>>(),
            vec![ChangeType::FindGcd, ChangeType::CancelGcd],
        );
    }

    #[test]
    fn nth_roots() {
        assert_eq!(simplify_expression("nthRoot(36)").last().map(|step| step.result.as_str()), Some("6"));
    }

    #[test]
    fn already_simple() {
        assert!(simplify_expression("2x + 3").is_empty());
    }

    #[test]
    fn idempotent() {
        let steps = simplify_expression("2(x + 3) + 4x");
        let result = steps.last().map(|step| step.result.clone()).unwrap_or_default();
        assert!(!result.is_empty());
        assert!(simplify_expression(&result).is_empty(), "{} simplified further", result);
    }

    #[test]
    fn division_by_zero() {
        let steps = simplify_expression("x / 0 + 1");
        assert_eq!(steps.last().map(|step| step.change_type), Some(ChangeType::DivisionByZero));
    }

    #[test]
    fn negative_bases_are_evaluated() {
        for (source, result) in [("(-2)^2", "4"), ("(-1)^3", "-1"), ("(-3) * (-2)", "6"), ("x * (-2)", "-2x")] {
            let steps = simplify_expression(source);
            assert_eq!(steps.last().map(|step| step.result.as_str()), Some(result), "{}", source);
        }
        assert!(!simplify_expression("(-2)^2 + x").is_empty());
    }

    #[test]
    fn numbers_are_never_juxtaposed() {
        let steps = simplify_expression("2 * nthRoot(2) * nthRoot(2)");
        assert!(!steps.is_empty());
        for step in &steps {
            assert!(!step.result.contains("2 2"), "{}", step.result);
        }
    }

    #[test]
    fn growing_expression_is_abandoned() {
        let source = "(a + b + c + d + e)^4";
        assert!(simplify_expression(source).is_empty());
        assert!(matches!(
            try_simplify_expression(source, &Limits::default()),
            Err(Error::Diverged { .. }),
        ));
    }

    #[test]
    fn failures() {
        assert!(simplify_expression("2 +").is_empty());
        assert!(simplify_expression("sin(x)").is_empty());
        assert!(matches!(try_simplify_expression("2 +", &Limits::default()), Err(Error::Parse { .. })));
        assert!(matches!(try_simplify_expression("sin(x)", &Limits::default()), Err(Error::Unsupported)));
    }

    #[test]
    fn factoring() {
        assert_eq!(results(&factor_expression("x^2 + 3x + 2")), vec!["(x + 1) * (x + 2)"]);
        assert_eq!(results(&factor_expression("4x^2 - 9")), vec!["(2x + 3) * (2x - 3)"]);
        assert!(factor_expression("x + 1").is_empty());
    }

    #[test]
    fn factoring_divides_out_the_gcd() {
        assert_eq!(results(&factor_expression("4x^2 + 6x")), vec!["2x (2x + 3)"]);
        assert_eq!(results(&factor_expression("2x^2 - 8")), vec!["2 * (x + 2) * (x - 2)"]);
        assert_eq!(results(&factor_expression("2x^2 + 4x + 2")), vec!["2 * (x + 1)^2"]);
        assert_eq!(results(&factor_expression("2x^2 + 6x + 4")), vec!["2 * (x + 1) * (x + 2)"]);
        assert_eq!(results(&factor_expression("3x^2 - 27")), vec!["3 * (x + 3) * (x - 3)"]);
    }

    #[test]
    fn huge_coefficients_return_promptly() {
        assert!(factor_expression("1000000000000x^2 + x + 1000000").is_empty());
        let steps = solve_equation("x^2 + 1000000000000 = 0", None);
        assert!(steps.iter().all(|step| step.change_type != ChangeType::FindRoots));
    }

    #[test]
    fn solving() {
        let steps = solve_equation("x + 3 = 4", None);
        assert_eq!(steps.last().map(|step| step.result.as_str()), Some("x = 1"));

        assert_eq!(solve_equation("2 = 2", None)[0].change_type, ChangeType::StatementIsTrue);
        assert_eq!(solve_equation("2 = 3", None)[0].change_type, ChangeType::StatementIsFalse);
    }

    #[test]
    fn solving_with_scope() {
        let scope = Scope::from([("y".to_string(), "3".to_string())]);
        let steps = solve_equation("x + y = 4", Some(&scope));
        assert_eq!(steps.last().map(|step| step.result.as_str()), Some("x = 1"));
    }

    #[test]
    fn equation_failures() {
        let limits = Limits::default();
        assert!(solve_equation("x + 3", None).is_empty());
        assert!(matches!(try_solve_equation("x + 3", None, &limits), Err(Error::MissingComparator)));
        assert!(matches!(try_solve_equation("= 3", None, &limits), Err(Error::EmptySide)));
        assert!(matches!(try_solve_equation("x = 3 +", None, &limits), Err(Error::Parse { .. })));
    }
}
