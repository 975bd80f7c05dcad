//! Addition of like terms: `2x + 3x = 5x`, `nthRoot(2) + 3 nthRoot(2) = 4 nthRoot(2)`, and sums
//! of constants.

use crate::{
    change_type::ChangeType,
    node::{term::{CoefficientTerm, NthRootTerm, PolynomialTerm}, Node, Op},
    simplify::{arithmetic, fraction::add},
    status::Status,
};

/// Adds a sum whose terms are all numbers or constant fractions.
pub fn evaluate_constant_sum(node: &Node) -> Option<Status> {
    if !node.is_op(Op::Add) || !node.args().iter().all(Node::is_constant_or_constant_fraction) {
        return None;
    }
    arithmetic::evaluate(node)
        .or_else(|| add::add_constant_fractions(node))
        .or_else(|| add::add_constant_and_fraction(node))
}

/// The terms of a sum, split into their parts, if every term has the same base and exponent.
fn like_terms<T: CoefficientTerm>(node: &Node, parse: impl Fn(&Node) -> Option<T>) -> Option<Vec<T>> {
    let Node::Operator { op: Op::Add, args, .. } = node else {
        return None;
    };
    let terms = args.iter().map(parse).collect::<Option<Vec<_>>>()?;
    let (first, rest) = terms.split_first()?;
    let same_as_first = |term: &T| term.base() == first.base() && term.exponent_node() == first.exponent_node();
    if rest.is_empty() || !rest.iter().all(same_as_first) {
        return None;
    }
    Some(terms)
}

/// Returns true if [`add_like_terms`] would combine the polynomial or nth-root terms of the sum.
pub fn can_add_like_terms(node: &Node) -> bool {
    like_terms(node, |arg| PolynomialTerm::new(arg, false)).is_some()
        || like_terms(node, |arg| NthRootTerm::new(arg, false)).is_some()
}

/// Combines a sum of like terms by adding their coefficients.
///
/// ```text
/// x + 2x
/// 1x + 2x          ADD_COEFFICIENT_OF_ONE
/// (1 + 2) x        GROUP_COEFFICIENTS
/// 3x               SIMPLIFY_ARITHMETIC
/// ```
pub fn add_like_terms(node: &Node) -> Option<Status> {
    evaluate_constant_sum(node).or_else(|| add_like_polynomial_terms(node))
}

/// Like [`add_like_terms`], but leaves sums of constants alone.
pub fn add_like_polynomial_terms(node: &Node) -> Option<Status> {
    like_terms(node, |arg| PolynomialTerm::new(arg, false))
        .and_then(|terms| add_coefficients(node, &terms, ChangeType::AddPolynomialTerms))
        .or_else(|| {
            let terms = like_terms(node, |arg| NthRootTerm::new(arg, false))?;
            add_coefficients(node, &terms, ChangeType::AddNthRoots)
        })
}

fn add_coefficients<T: CoefficientTerm>(node: &Node, terms: &[T], change_type: ChangeType) -> Option<Status> {
    let base = terms[0].base().clone();
    let exponent = terms[0].exponent().cloned();
    let with_coeff = |coeff: Node| Node::polynomial_term(base.clone(), exponent.clone(), Some(coeff), true);

    let mut substeps = Vec::new();
    let mut current = node.clone();

    if terms.iter().any(|term| !term.has_coeff()) {
        let next = Node::add(node.args()
            .iter()
            .zip(terms)
            .map(|(arg, term)| match (arg, term.has_coeff()) {
                (_, false) => with_coeff(Node::Number(1.0)),
                (arg, true) => arg.clone(),
            })
            .collect());
        substeps.push(Status::node_changed(ChangeType::AddCoefficientOfOne, current, next.clone()));
        current = next;
    }

    if node.args().iter().any(|arg| matches!(arg, Node::UnaryMinus(_))) {
        let next = Node::add(terms.iter().map(|term| with_coeff(term.coeff_node())).collect());
        substeps.push(Status::node_changed(ChangeType::UnaryMinusToNegativeOne, current, next.clone()));
        current = next;
    }

    let coeff_sum = Node::add(terms.iter().map(CoefficientTerm::coeff_node).collect());
    let grouped = with_coeff(Node::parens(coeff_sum.clone()));
    substeps.push(Status::node_changed(ChangeType::GroupCoefficients, current, grouped.clone()));

    let coeff_status = evaluate_constant_sum(&coeff_sum)?;
    let new_node = Node::polynomial_term(base.clone(), exponent.clone(), Some(coeff_status.new_node.clone()), false);
    substeps.push(Status::node_changed(coeff_status.change_type, grouped, new_node.clone()));

    Some(Status::with_substeps(change_type, node.clone(), new_node, substeps))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{node::tests::parse_node, simplify::normalize::normalize};
    use super::*;

    fn add(source: &str) -> Status {
        add_like_terms(&normalize(&parse_node(source))).unwrap()
    }

    fn substeps(status: &Status) -> Vec<(ChangeType, String)> {
        status.substeps
            .iter()
            .map(|substep| (substep.change_type, substep.new_node.to_string()))
            .collect()
    }

    #[test]
    fn polynomial_terms() {
        let status = add("x + 2x");
        assert_eq!(status.change_type, ChangeType::AddPolynomialTerms);
        assert_eq!(status.new_node.to_string(), "3x");
        assert_eq!(substeps(&status), vec![
            (ChangeType::AddCoefficientOfOne, "1x + 2x".to_string()),
            (ChangeType::GroupCoefficients, "(1 + 2) x".to_string()),
            (ChangeType::SimplifyArithmetic, "3x".to_string()),
        ]);
    }

    #[test]
    fn negative_terms() {
        let status = add("2x^2 - x^2");
        assert_eq!(status.new_node.to_string(), "x^2");
        assert_eq!(substeps(&status)[0], (ChangeType::UnaryMinusToNegativeOne, "2x^2 - 1x^2".to_string()));
    }

    #[test]
    fn fraction_coefficients() {
        let term = |n: f64, d: f64| Node::implicit_mul(vec![
            Node::div(Node::Number(n), Node::Number(d)),
            Node::symbol("x"),
        ]);
        let status = add_like_terms(&Node::add(vec![term(1.0, 2.0), term(1.0, 3.0)])).unwrap();
        assert_eq!(status.new_node.to_string(), "5/6 x");
        assert_eq!(status.substeps.last().unwrap().change_type, ChangeType::AddFractions);
    }

    #[test]
    fn nth_roots() {
        let status = add("nthRoot(2) + 3 nthRoot(2)");
        assert_eq!(status.change_type, ChangeType::AddNthRoots);
        assert_eq!(status.new_node.to_string(), "4 nthRoot(2)");
    }

    #[test]
    fn unlike_terms() {
        assert!(add_like_terms(&normalize(&parse_node("x + x^2"))).is_none());
        assert!(add_like_terms(&normalize(&parse_node("x + y"))).is_none());
        assert!(!can_add_like_terms(&normalize(&parse_node("x + 2"))));
    }

    #[test]
    fn constants() {
        assert_eq!(add("2 + 3").new_node, Node::Number(5.0));
        assert_eq!(add("1/2 + 1/2").new_node, Node::Number(1.0));
    }
}
