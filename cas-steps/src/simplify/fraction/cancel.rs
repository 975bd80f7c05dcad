//! Cancellation of factors shared by the numerator and the denominator.

use std::collections::BTreeSet;
use crate::{
    change_type::ChangeType,
    node::{term::{CoefficientTerm, PolynomialTerm}, Node, Op},
    primitive::gcd,
    status::Status,
};

/// The factors of one side of a fraction: a constant coefficient, and each base with its
/// exponent, in order of appearance.
#[derive(Debug, Default)]
struct Factors {
    constant: f64,
    bases: Vec<(Node, f64)>,
}

impl Factors {
    /// Splits a side of a fraction into its factors. Returns [`None`] if a base appears twice,
    /// or if a base has a non-numeric exponent.
    fn of(node: &Node) -> Option<Self> {
        let mut factors = Self { constant: 1.0, bases: Vec::new() };
        let mut seen = BTreeSet::new();
        for factor in flatten_factors(node) {
            let (base, exponent) = match factor {
                Node::Number(value) => {
                    factors.constant *= value;
                    continue;
                },
                Node::Operator { op: Op::Pow, ref args, .. } => match args[1].as_number() {
                    Some(exponent) => (args[0].unparenthesized().clone(), exponent),
                    None => (factor.clone(), 1.0),
                },
                _ => match PolynomialTerm::try_from(&factor) {
                    Ok(term) if term.coeff().is_some_and(Node::is_constant) => {
                        factors.constant *= term.coeff_value()?;
                        (term.base().clone(), term.exponent_node().as_number()?)
                    },
                    _ => (factor.clone(), 1.0),
                },
            };

            if !seen.insert(base.to_string()) {
                return None;
            }
            factors.bases.push((base, exponent));
        }
        Some(factors)
    }

    fn exponent_of(&self, key: &str) -> Option<f64> {
        self.bases.iter().find(|(base, _)| base.to_string() == key).map(|(_, exponent)| *exponent)
    }
}

/// Returns the factors of a product, looking through nested products and parentheses.
fn flatten_factors(node: &Node) -> Vec<Node> {
    match node.unparenthesized() {
        Node::Operator { op: Op::Mul, args, .. } if PolynomialTerm::try_from(node.unparenthesized()).is_err() => {
            args.iter().flat_map(flatten_factors).collect()
        },
        other => vec![other.clone()],
    }
}

/// Builds the factors that remain on one side after cancellation.
fn remaining(side: &Factors, other: &Factors, constant: f64) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (base, exponent) in &side.bases {
        let exponent = match other.exponent_of(&base.to_string()) {
            Some(other_exponent) => exponent - other_exponent,
            None => *exponent,
        };
        if exponent > 0.0 {
            nodes.push(match exponent {
                e if e == 1.0 => base.clone(),
                e => Node::pow(base.clone(), Node::Number(e)),
            });
        }
    }

    if constant != 1.0 || nodes.is_empty() {
        nodes.insert(0, Node::Number(constant));
    }
    nodes
}

/// `(2x * 5) / (2x) = 5`
/// `x^3 / x = x^2`
///
/// Fires only when a base appears on both sides, and no base repeats within a side. The constant
/// factors of both sides are combined and reduced by their greatest common divisor.
pub fn cancel_like_terms(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Div, args, .. } = node else {
        return None;
    };
    if args.iter().all(Node::resolves_to_constant) {
        return None;
    }

    let numerator = Factors::of(&args[0])?;
    let denominator = Factors::of(&args[1])?;
    let shared = numerator.bases.iter().any(|(base, _)| denominator.exponent_of(&base.to_string()).is_some());
    if !shared || denominator.constant == 0.0 {
        return None;
    }

    let (mut top, mut bottom) = (numerator.constant, denominator.constant);
    if let Some(divisor) = gcd(top, bottom).filter(|&divisor| divisor > 1.0) {
        top /= divisor;
        bottom /= divisor;
    }

    let new_numerator = Node::mul(remaining(&numerator, &denominator, top));
    let new_denominator = remaining(&denominator, &numerator, bottom);
    let new_node = match new_denominator.as_slice() {
        [Node::Number(value)] if *value == 1.0 => new_numerator,
        _ => Node::div(new_numerator, Node::mul(new_denominator)),
    };

    Some(Status::node_changed(ChangeType::CancelTerms, node.clone(), new_node))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::node::tests::parse_node;
    use super::*;

    fn cancel(source: &str) -> Option<String> {
        cancel_like_terms(&parse_node(source)).map(|status| status.new_node.to_string())
    }

    #[test]
    fn cancels_shared_terms() {
        assert_eq!(cancel("(2x * 5) / (2x)"), Some("5".to_string()));
        assert_eq!(cancel("x^3 / x"), Some("x^2".to_string()));
        assert_eq!(cancel("x / x^3"), Some("1 / x^2".to_string()));
        assert_eq!(cancel("(x * y) / x"), Some("y".to_string()));
    }

    #[test]
    fn reduces_constants() {
        assert_eq!(cancel("(6 * x * y) / (4 * x)"), Some("3 * y / 2".to_string()));
    }

    #[test]
    fn requires_a_shared_base() {
        assert_eq!(cancel("x / y"), None);
        assert_eq!(cancel("2/4"), None);
        assert_eq!(cancel("(x * x) / x"), None);
    }
}
