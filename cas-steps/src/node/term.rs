//! Validating views over nodes that look like `coeff * base ^ exponent`.
//!
//! A [`PolynomialTerm`] has a symbol as its base (`3x^2`), and an [`NthRootTerm`] has an
//! `nthRoot(...)` call as its base (`2 nthRoot(3)`). Both are built by attempting to parse a node;
//! a node "is a term" exactly when the attempt succeeds.
//!
//! The accepted shapes are:
//!
//! - the bare base: `x`
//! - a power of the base: `x^2`
//! - a constant (or constant fraction) coefficient times one of the above: `3x`, `1/2 x^2`
//! - one of the above over a constant: `x / 4`, `3x / 4`
//! - the negation of any of the above: `-x`, `-3x^2`
//!
//! [`TryFrom`] only accepts implicit multiplication between the coefficient and the base (`3x`
//! but not `3 * x`). Use the `new` constructors to also accept explicit multiplication.

use super::{negative::negate, Node, Op};

/// Capability shared by polynomial and nth-root terms: something with a base, an exponent, and a
/// coefficient.
pub trait CoefficientTerm {
    /// The base of the term, such as the `x` in `3x^2`.
    fn base(&self) -> &Node;

    /// The exponent of the term, or [`None`] if the exponent is an implied 1.
    fn exponent(&self) -> Option<&Node>;

    /// The coefficient of the term, or [`None`] if the coefficient is an implied 1.
    fn coeff(&self) -> Option<&Node>;

    /// Returns true if the term has an explicit coefficient.
    fn has_coeff(&self) -> bool {
        self.coeff().is_some()
    }

    /// Returns the coefficient, with an implied coefficient of 1 made explicit.
    fn coeff_node(&self) -> Node {
        self.coeff().cloned().unwrap_or(Node::Number(1.0))
    }

    /// Returns the exponent, with an implied exponent of 1 made explicit.
    fn exponent_node(&self) -> Node {
        self.exponent().cloned().unwrap_or(Node::Number(1.0))
    }

    /// Returns the numeric value of the coefficient.
    fn coeff_value(&self) -> Option<f64> {
        self.coeff_node().evaluate()
    }

    /// Returns true if the coefficient is a fraction, such as the `1/2` in `1/2 x`.
    fn has_fraction_coeff(&self) -> bool {
        self.coeff().is_some_and(Node::is_constant_fraction)
    }
}

/// The parts of a term, shared by both term kinds.
#[derive(Debug, Clone, PartialEq)]
struct TermParts {
    base: Node,
    exponent: Option<Node>,
    coeff: Option<Node>,
}

/// Attempts to split the node into a term whose base satisfies `is_base`.
fn parse_parts(node: &Node, is_base: fn(&Node) -> bool, only_implicit: bool) -> Option<TermParts> {
    match node {
        _ if is_base(node) => Some(TermParts { base: node.clone(), exponent: None, coeff: None }),
        Node::UnaryMinus(operand) => {
            let parts = parse_parts(operand, is_base, only_implicit)?;
            let coeff = match parts.coeff {
                Some(coeff) => negate(&coeff),
                None => Node::Number(-1.0),
            };
            Some(TermParts { coeff: Some(coeff), ..parts })
        },
        Node::Operator { op, args, implicit } => match (op, args.as_slice()) {
            (Op::Pow, [base, exponent]) if is_base(base) => Some(TermParts {
                base: base.clone(),
                exponent: Some(exponent.clone()),
                coeff: None,
            }),
            (Op::Mul, [coeff, rest]) => {
                if only_implicit && !implicit {
                    return None;
                }
                if !coeff.is_constant_or_constant_fraction() {
                    return None;
                }
                let parts = parse_parts(rest, is_base, only_implicit)?;
                if parts.coeff.is_some() {
                    return None;
                }
                Some(TermParts { coeff: Some(coeff.clone()), ..parts })
            },
            (Op::Div, [numerator, Node::Number(denominator)]) => {
                let parts = parse_parts(numerator, is_base, only_implicit)?;
                let coeff = match &parts.coeff {
                    None => Node::div(Node::Number(1.0), Node::Number(*denominator)),
                    Some(Node::Number(n)) => Node::div(Node::Number(*n), Node::Number(*denominator)),
                    Some(_) => return None,
                };
                Some(TermParts { coeff: Some(coeff), ..parts })
            },
            _ => None,
        },
        _ => None,
    }
}

/// Generates a term type whose base satisfies the given predicate.
macro_rules! term_type {
    ($(#[$attr:meta])* $name:ident, $is_base:expr) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            parts: TermParts,
        }

        impl $name {
            /// Attempts to parse the node as a term. If `only_implicit` is false, explicit
            /// multiplication between the coefficient and the base is also accepted.
            pub fn new(node: &Node, only_implicit: bool) -> Option<Self> {
                parse_parts(node, $is_base, only_implicit).map(|parts| Self { parts })
            }

            /// Returns true if the node is a term of this kind.
            pub fn is_term(node: &Node, only_implicit: bool) -> bool {
                Self::new(node, only_implicit).is_some()
            }

            /// Rebuilds the node for this term.
            pub fn to_node(&self) -> Node {
                Node::polynomial_term(
                    self.parts.base.clone(),
                    self.parts.exponent.clone(),
                    self.parts.coeff.clone(),
                    false,
                )
            }
        }

        impl TryFrom<&Node> for $name {
            type Error = ();

            fn try_from(node: &Node) -> Result<Self, Self::Error> {
                Self::new(node, true).ok_or(())
            }
        }

        impl CoefficientTerm for $name {
            fn base(&self) -> &Node {
                &self.parts.base
            }

            fn exponent(&self) -> Option<&Node> {
                self.parts.exponent.as_ref()
            }

            fn coeff(&self) -> Option<&Node> {
                self.parts.coeff.as_ref()
            }
        }
    };
}

fn is_symbol(node: &Node) -> bool {
    matches!(node, Node::Symbol(_))
}

term_type!(
    /// A term with a symbol as its base, such as `3x^2`.
    PolynomialTerm,
    is_symbol
);

term_type!(
    /// A term with an nth root as its base, such as `2 nthRoot(3)`.
    NthRootTerm,
    Node::is_nth_root
);

impl PolynomialTerm {
    /// Returns the name of the symbol.
    pub fn symbol_name(&self) -> &str {
        self.parts.base.as_symbol().unwrap_or_default()
    }
}

impl NthRootTerm {
    /// Returns the root of the base, with an omitted root made explicit as 2.
    pub fn root_node(&self) -> Node {
        self.parts.base.args().get(1).cloned().unwrap_or(Node::Number(2.0))
    }
}

/// Returns true if the node is a polynomial term, accepting only implicit multiplication.
pub fn is_polynomial_term(node: &Node) -> bool {
    PolynomialTerm::is_term(node, true)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::node::tests::parse_node;
    use super::*;

    #[test]
    fn bare_symbol() {
        let term = PolynomialTerm::try_from(&parse_node("x")).unwrap();
        assert_eq!(term.symbol_name(), "x");
        assert_eq!(term.exponent(), None);
        assert!(!term.has_coeff());
        assert_eq!(term.coeff_node(), Node::Number(1.0));
    }

    #[test]
    fn coefficient_and_exponent() {
        let term = PolynomialTerm::try_from(&parse_node("3x^2")).unwrap();
        assert_eq!(term.coeff(), Some(&Node::Number(3.0)));
        assert_eq!(term.exponent(), Some(&Node::Number(2.0)));
        assert_eq!(term.to_node().to_string(), "3x^2");
    }

    #[test]
    fn negated_term() {
        let term = PolynomialTerm::try_from(&parse_node("-x^2")).unwrap();
        assert_eq!(term.coeff(), Some(&Node::Number(-1.0)));

        let node = Node::unary_minus(Node::implicit_mul(vec![Node::Number(3.0), Node::symbol("x")]));
        let term = PolynomialTerm::try_from(&node).unwrap();
        assert_eq!(term.coeff_value(), Some(-3.0));
    }

    #[test]
    fn over_constant() {
        let term = PolynomialTerm::try_from(&parse_node("x / 4")).unwrap();
        assert_eq!(term.coeff().map(ToString::to_string), Some("1/4".to_string()));
        assert!(term.has_fraction_coeff());

        let term = PolynomialTerm::try_from(&parse_node("3x / 4")).unwrap();
        assert_eq!(term.coeff().map(ToString::to_string), Some("3/4".to_string()));
    }

    #[test]
    fn explicit_multiplication() {
        let node = parse_node("3 * x");
        assert!(PolynomialTerm::try_from(&node).is_err());
        assert!(PolynomialTerm::new(&node, false).is_some());
    }

    #[test]
    fn rejected_shapes() {
        for source in ["x y", "x + 1", "2", "x * y * 2", "(x + 1)^2", "2x 3"] {
            assert!(!is_polynomial_term(&parse_node(source)), "{}", source);
        }
    }

    #[test]
    fn nth_root_terms() {
        let term = NthRootTerm::try_from(&parse_node("2 nthRoot(3)")).unwrap();
        assert_eq!(term.coeff_value(), Some(2.0));
        assert_eq!(term.root_node(), Node::Number(2.0));
        assert!(NthRootTerm::try_from(&parse_node("x")).is_err());
    }
}
