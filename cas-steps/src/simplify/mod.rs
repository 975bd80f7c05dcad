//! The expression pipeline: repeatedly applies the rewrite families, in priority order, until
//! none of them changes the expression.
//!
//! Each family is a [`Pass`] that searches the whole tree for the single best local rewrite. Every
//! iteration normalizes the current node, runs the passes in order, and records the first change
//! as a step. Stepping stops when no pass changes anything, or is abandoned when the iteration cap
//! or size cap in [`Limits`] is exceeded; those are treated as rewrite cycles and produce no steps.
//!
//! ```
//! use cas_steps::{node::Node, simplify};
//!
//! let node = Node::parse("x + 4 + x + 5").unwrap();
//! let steps = simplify::step_through(&node);
//! assert_eq!(steps.last().unwrap().new_node.to_string(), "2x + 9");
//! ```

pub mod arithmetic;
pub mod basics;
pub mod break_up;
pub mod collect;
pub mod distribute;
pub mod division;
pub mod fraction;
pub mod functions;
pub mod multiply_fractions;
pub mod normalize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace, warn};
use crate::{
    change_type::ChangeType,
    checks::has_unsupported_nodes,
    error::Error,
    node::Node,
    status::Status,
    step_collector::StepCollector,
};
use normalize::{normalize, remove_unnecessary_parens};

/// Caps that stop runaway rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Limits {
    /// The maximum number of steps taken for one expression, or one equation.
    pub max_iterations: usize,

    /// The maximum length of a printed expression while it is being simplified.
    pub max_expression_len: usize,

    /// The maximum length of a printed equation while it is being solved.
    pub max_equation_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            max_expression_len: 1000,
            max_equation_len: 300,
        }
    }
}

/// Why stepping stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// No pass could change the expression any further.
    Converged,

    /// A division by zero was found and recorded as the last step.
    DivisionByZero,

    /// More steps were taken than allowed, which indicates a rewrite cycle.
    IterationCap,

    /// The expression grew larger than allowed.
    SizeCap,
}

impl Termination {
    /// Returns true if stepping finished normally, so the steps taken are meaningful.
    pub fn is_success(self) -> bool {
        matches!(self, Termination::Converged | Termination::DivisionByZero)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Termination::Converged => write!(f, "converged"),
            Termination::DivisionByZero => write!(f, "division by zero"),
            Termination::IterationCap => write!(f, "iteration cap exceeded"),
            Termination::SizeCap => write!(f, "expression size cap exceeded"),
        }
    }
}

/// A rewrite family that can be run over a whole expression.
pub trait Pass {
    /// A short name for the family, used in logs.
    fn name(&self) -> &'static str;

    /// Returns the first change this family makes to the expression, if any.
    fn apply(&self, node: &Node) -> Option<Status>;
}

/// A [`Pass`] backed by a tree search function.
struct Family {
    name: &'static str,
    search: fn(&Node) -> Status,
}

impl Pass for Family {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, node: &Node) -> Option<Status> {
        (self.search)(node).changed()
    }
}

/// The rewrite families, in the order they are tried.
const PASSES: &[Family] = &[
    Family { name: "basics", search: basics::search },
    Family { name: "division", search: division::search },
    Family { name: "fractions", search: fraction::search },
    Family { name: "collect", search: collect::search },
    Family { name: "arithmetic", search: arithmetic::search },
    Family { name: "break_up", search: break_up::search },
    Family { name: "multiply_fractions", search: multiply_fractions::search },
    Family { name: "distribute", search: distribute::search },
    Family { name: "functions", search: functions::search },
];

/// Returns the passes of the pipeline, in the order they are tried.
pub fn passes() -> impl Iterator<Item = &'static dyn Pass> {
    PASSES.iter().map(|family| family as &dyn Pass)
}

/// Runs the first pass that changes the node.
fn apply_first(node: &Node) -> Option<(&'static str, Status)> {
    passes().find_map(|pass| {
        trace!(target: "cas_steps::simplify", pass = pass.name(), node = %node, "trying pass");
        pass.apply(node).map(|status| (pass.name(), status))
    })
}

/// Steps through the node, pushing every step to the collector, and returns why stepping stopped.
///
/// The node must be supported (see [`has_unsupported_nodes`]). When the returned [`Termination`]
/// is not a success, the steps already collected should be discarded.
pub fn collect_steps(node: &Node, limits: &Limits, steps: &mut dyn StepCollector<Status>) -> Termination {
    let mut current = node.clone();
    let mut taken = 0;

    loop {
        current = normalize(&current);

        let printed = current.to_string();
        if printed.len() > limits.max_expression_len {
            warn!(target: "cas_steps::simplify", expression = %node, iterations = taken, reason = %Termination::SizeCap, "abandoning simplification");
            return Termination::SizeCap;
        }

        let Some((pass, status)) = apply_first(&current) else {
            return Termination::Converged;
        };

        if taken == limits.max_iterations {
            warn!(target: "cas_steps::simplify", expression = %node, iterations = taken, reason = %Termination::IterationCap, "abandoning simplification");
            return Termination::IterationCap;
        }
        taken += 1;

        let status = status.map_nodes(&remove_unnecessary_parens);
        debug!(target: "cas_steps::simplify", pass, rule = %status.change_type, result = %status.new_node, "step");

        let division_by_zero = status.change_type == ChangeType::DivisionByZero;
        current = status.new_node.clone();
        steps.push(status);
        if division_by_zero {
            return Termination::DivisionByZero;
        }
    }
}

/// Steps through the node with the given limits.
///
/// Returns [`Error::Unsupported`] if the node contains an unsupported operation, and
/// [`Error::Diverged`] if a cap was exceeded.
pub fn try_step_through(node: &Node, limits: &Limits) -> Result<Vec<Status>, Error> {
    if has_unsupported_nodes(node) {
        return Err(Error::Unsupported);
    }

    let mut steps = Vec::new();
    match collect_steps(node, limits, &mut steps) {
        reason if reason.is_success() => Ok(steps),
        reason => Err(Error::Diverged { reason }),
    }
}

/// Steps through the node with the given limits. Unsupported or diverging input produces no
/// steps.
pub fn step_through_with(node: &Node, limits: &Limits) -> Vec<Status> {
    try_step_through(node, limits).unwrap_or_else(|err| {
        debug!(target: "cas_steps::simplify", expression = %node, error = %err, "no steps");
        Vec::new()
    })
}

/// Steps through the node with the default [`Limits`].
pub fn step_through(node: &Node) -> Vec<Status> {
    step_through_with(node, &Limits::default())
}

/// Returns the fully simplified node, without recording the steps.
///
/// If the node cannot be simplified (it is unsupported, or simplification diverges), the node is
/// returned normalized but otherwise unchanged.
pub fn simplify(node: &Node) -> Node {
    let mut last = None;
    let mut collector = LastStep(&mut last);
    let reason = if has_unsupported_nodes(node) {
        Termination::Converged
    } else {
        collect_steps(node, &Limits::default(), &mut collector)
    };

    match last {
        Some(status) if reason.is_success() => status.new_node,
        _ => remove_unnecessary_parens(&normalize(node)),
    }
}

/// Keeps only the most recent step.
struct LastStep<'a>(&'a mut Option<Status>);

impl StepCollector<Status> for LastStep<'_> {
    fn push(&mut self, step: Status) {
        *self.0 = Some(step);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tracing_subscriber::EnvFilter;
    use crate::node::tests::parse_node;
    use super::*;

    /// Routes step logs to the test harness. Run with `RUST_LOG=cas_steps=trace` to see every
    /// pass attempt.
    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn passes_in_priority_order() {
        let names = passes().map(|pass| pass.name()).collect::<Vec<_>>();
        assert_eq!(names.first(), Some(&"basics"));
        assert_eq!(names.last(), Some(&"functions"));
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn converges_on_like_terms() {
        init_logging();
        let mut steps = Vec::new();
        let reason = collect_steps(&parse_node("x + 4 + x + 5"), &Limits::default(), &mut steps);
        assert_eq!(reason, Termination::Converged);
        assert_eq!(steps.last().map(|s| s.new_node.to_string()), Some("2x + 9".to_string()));
    }

    #[test]
    fn division_by_zero_terminates() {
        init_logging();
        let mut steps = Vec::new();
        let reason = collect_steps(&parse_node("2 / 0"), &Limits::default(), &mut steps);
        assert_eq!(reason, Termination::DivisionByZero);
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn caps_discard_steps() {
        init_logging();
        let node = parse_node("1 + 2 + 3");

        let no_iterations = Limits { max_iterations: 0, ..Limits::default() };
        assert!(matches!(
            try_step_through(&node, &no_iterations),
            Err(Error::Diverged { reason: Termination::IterationCap }),
        ));

        let tiny = Limits { max_expression_len: 3, ..Limits::default() };
        assert!(matches!(
            try_step_through(&node, &tiny),
            Err(Error::Diverged { reason: Termination::SizeCap }),
        ));
        assert!(step_through_with(&node, &tiny).is_empty());
    }

    #[test]
    fn simplify_returns_the_final_node() {
        assert_eq!(simplify(&parse_node("2 * 3 + 4")).to_string(), "10");
        assert_eq!(simplify(&parse_node("sin(x)")).to_string(), "sin(x)");
    }
}
