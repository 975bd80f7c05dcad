//! Reduction of fractions by their greatest common divisor.

use crate::{
    change_type::ChangeType,
    node::{term::{CoefficientTerm, PolynomialTerm}, Node},
    primitive::gcd,
    simplify::arithmetic,
    status::Status,
};

/// `12/27 = (4 * 3) / (9 * 3) = 4/9`
///
/// Applies only to integer fractions. The divisor takes the sign of the denominator, so the
/// reduced denominator is never negative.
pub fn divide_by_gcd(node: &Node) -> Option<Status> {
    let (numerator, denominator) = node.as_fraction()?;
    if denominator == 0.0 {
        return None;
    }

    let mut divisor = gcd(numerator, denominator)?;
    if denominator < 0.0 {
        divisor = -divisor;
    }
    if divisor.abs() == 1.0 || divisor == 0.0 {
        return None;
    }

    let (numerator, denominator) = (numerator / divisor, denominator / divisor);
    let factored = Node::div(
        Node::parens(Node::mul(vec![Node::Number(numerator), Node::Number(divisor)])),
        Node::parens(Node::mul(vec![Node::Number(denominator), Node::Number(divisor)])),
    );
    let cancelled = if denominator == 1.0 {
        Node::Number(numerator)
    } else {
        Node::div(Node::Number(numerator), Node::Number(denominator))
    };

    let substeps = vec![
        Status::node_changed(ChangeType::FindGcd, node.clone(), factored.clone()),
        Status::node_changed(ChangeType::CancelGcd, factored, cancelled.clone()),
    ];
    Some(Status::with_substeps(ChangeType::SimplifyFraction, node.clone(), cancelled, substeps))
}

/// `2x / 4 = 1/2 x`
///
/// Reduces the fraction coefficient of a polynomial term, by its greatest common divisor for
/// integer fractions, or by evaluation for decimal ones.
pub fn simplify_polynomial_fraction(node: &Node) -> Option<Status> {
    let term = PolynomialTerm::try_from(node).ok()?;
    if !term.has_fraction_coeff() {
        return None;
    }

    let coeff = term.coeff_node();
    let coeff_status = divide_by_gcd(&coeff).or_else(|| arithmetic::evaluate(&coeff))?;

    let rebuild = |coeff: &Node| {
        Node::polynomial_term(term.base().clone(), term.exponent().cloned(), Some(coeff.clone()), false)
    };
    let new_node = rebuild(&coeff_status.new_node);

    // `(1 * 2) / (1 * 2) x` says nothing that `2/2 x = x` does not
    let substeps = if coeff_status.new_node.as_number().is_some() {
        Vec::new()
    } else {
        coeff_status.substeps
            .into_iter()
            .map(|substep| substep.map_nodes(&rebuild))
            .collect()
    };

    Some(Status::with_substeps(coeff_status.change_type, node.clone(), new_node, substeps))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::node::tests::parse_node;
    use super::*;

    #[test]
    fn reduces_by_gcd() {
        let status = divide_by_gcd(&parse_node("12/27")).unwrap();
        assert_eq!(status.change_type, ChangeType::SimplifyFraction);
        assert_eq!(status.new_node.to_string(), "4/9");
        assert_eq!(status.substeps[0].change_type, ChangeType::FindGcd);
        assert_eq!(status.substeps[0].new_node.to_string(), "(4 * 3) / (9 * 3)");
        assert_eq!(status.substeps[1].change_type, ChangeType::CancelGcd);
    }

    #[test]
    fn collapses_whole_numbers() {
        let status = divide_by_gcd(&parse_node("6/3")).unwrap();
        assert_eq!(status.new_node, Node::Number(2.0));
    }

    #[test]
    fn coprime_fractions_are_untouched() {
        assert!(divide_by_gcd(&parse_node("4/9")).is_none());
        assert!(divide_by_gcd(&parse_node("x/9")).is_none());
        assert!(divide_by_gcd(&parse_node("1.5/3")).is_none());
    }

    #[test]
    fn denominator_stays_positive() {
        let node = Node::div(Node::Number(4.0), Node::Number(-6.0));
        let status = divide_by_gcd(&node).unwrap();
        assert_eq!(status.new_node.to_string(), "-2/3");
    }

    #[test]
    fn polynomial_coefficient() {
        let status = simplify_polynomial_fraction(&parse_node("2x / 4")).unwrap();
        assert_eq!(status.new_node.to_string(), "1/2 x");
        assert!(simplify_polynomial_fraction(&parse_node("x / 4")).is_none());
    }

    #[test]
    fn whole_coefficient_has_no_substeps() {
        let node = Node::implicit_mul(vec![Node::div(Node::Number(2.0), Node::Number(2.0)), Node::symbol("x")]);
        let status = simplify_polynomial_fraction(&node).unwrap();
        assert_eq!(status.new_node, Node::symbol("x"));
        assert!(status.substeps.is_empty());

        let node = Node::implicit_mul(vec![Node::div(Node::Number(4.0), Node::Number(6.0)), Node::symbol("x")]);
        let status = simplify_polynomial_fraction(&node).unwrap();
        assert_eq!(status.new_node.to_string(), "2/3 x");
        assert_eq!(status.substeps.len(), 2);
    }
}
