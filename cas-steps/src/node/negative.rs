//! Sign inspection and negation that keeps the result in its simplest shape.

use super::{term::{CoefficientTerm, PolynomialTerm}, Node, Op};

/// Returns true if the node is written with a leading minus: a negative number, a unary minus, a
/// constant fraction with a negative numerator, or a polynomial term with a negative coefficient.
pub fn is_negative(node: &Node) -> bool {
    match node {
        Node::Number(v) => *v < 0.0,
        Node::UnaryMinus(_) => true,
        _ if node.is_constant_fraction() => node.args().first().is_some_and(is_negative),
        _ => PolynomialTerm::new(node, true)
            .and_then(|term| term.coeff_value())
            .is_some_and(|coeff| coeff < 0.0),
    }
}

/// Returns the negation of the node, as simply as possible.
///
/// - `3` → `-3`
/// - `-x` → `x`
/// - `2/3` → `-2/3`
/// - `-2x` → `2x`
/// - `x + 1` → `-(x + 1)`
pub fn negate(node: &Node) -> Node {
    match node {
        Node::Number(v) => Node::Number(-v),
        Node::UnaryMinus(operand) => (**operand).clone(),
        Node::Parens(content) if !matches!(**content, Node::Operator { .. }) => negate(content),
        Node::Operator { op: Op::Div, args, implicit } if node.is_constant_fraction() => {
            let mut args = args.clone();
            args[0] = negate(&args[0]);
            Node::operator_with(Op::Div, args, *implicit)
        },
        _ => match PolynomialTerm::new(node, true) {
            Some(term) => {
                let coeff = match term.coeff() {
                    Some(coeff) => negate(coeff),
                    None => Node::Number(-1.0),
                };
                Node::polynomial_term(term.base().clone(), term.exponent().cloned(), Some(coeff), false)
            },
            None => Node::unary_minus(node.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::node::tests::parse_node;
    use super::*;

    #[test]
    fn negation() {
        assert_eq!(negate(&Node::Number(3.0)), Node::Number(-3.0));
        assert_eq!(negate(&parse_node("-x")), parse_node("x"));
        assert_eq!(negate(&parse_node("2/3")).to_string(), "-2/3");
        assert_eq!(negate(&parse_node("x^2")).to_string(), "-x^2");
        assert_eq!(negate(&parse_node("x + 1")).to_string(), "-(x + 1)");

        let negative_term = Node::implicit_mul(vec![Node::Number(-2.0), Node::symbol("x")]);
        assert_eq!(negate(&negative_term).to_string(), "2x");
    }

    #[test]
    fn sign_detection() {
        assert!(is_negative(&Node::Number(-1.0)));
        assert!(is_negative(&parse_node("-x")));
        assert!(is_negative(&Node::implicit_mul(vec![Node::Number(-2.0), Node::symbol("x")])));
        assert!(!is_negative(&parse_node("2x")));
        assert!(!is_negative(&parse_node("x + 1")));
    }
}
