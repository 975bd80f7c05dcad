//! Multiplication of like terms: `x * x^2 = x^3` and `nthRoot(2) * nthRoot(3) = nthRoot(2 * 3)`.

use crate::{
    change_type::ChangeType,
    node::{term::{CoefficientTerm, PolynomialTerm}, Node, Op},
    simplify::arithmetic,
    status::Status,
};

/// The factors of a product, if they are all powers of the same symbol without coefficients.
fn like_polynomial_factors(node: &Node) -> Option<Vec<PolynomialTerm>> {
    let Node::Operator { op: Op::Mul, args, .. } = node else {
        return None;
    };
    let terms = args.iter()
        .map(|arg| PolynomialTerm::new(arg, false).filter(|term| !term.has_coeff()))
        .collect::<Option<Vec<_>>>()?;
    let (first, rest) = terms.split_first()?;
    if rest.is_empty() || !rest.iter().all(|term| term.symbol_name() == first.symbol_name()) {
        return None;
    }
    Some(terms)
}

/// The radicands of a product of nth roots, if every root has the same degree.
fn like_nth_roots(node: &Node) -> Option<(Vec<Node>, Node)> {
    let Node::Operator { op: Op::Mul, args, .. } = node else {
        return None;
    };
    if args.len() < 2 || !args.iter().all(Node::is_nth_root) {
        return None;
    }

    let root_of = |arg: &Node| arg.args().get(1).cloned().unwrap_or(Node::Number(2.0));
    let root = root_of(&args[0]);
    if !args.iter().all(|arg| root_of(arg) == root) {
        return None;
    }
    let radicands = args.iter().map(|arg| arg.args()[0].clone()).collect();
    Some((radicands, root))
}

/// Returns true if [`multiply_like_terms`] would combine the factors of the product.
pub fn can_multiply_like_terms(node: &Node) -> bool {
    like_polynomial_factors(node).is_some() || like_nth_roots(node).is_some()
}

/// Combines a product of like factors.
///
/// ```text
/// x * x^2
/// x^1 * x^2        ADD_EXPONENT_OF_ONE
/// x^(1 + 2)        COLLECT_POLYNOMIAL_EXPONENTS
/// x^3              SIMPLIFY_ARITHMETIC
/// ```
pub fn multiply_like_terms(node: &Node) -> Option<Status> {
    if node.is_op(Op::Mul) && node.args().iter().all(Node::is_constant) {
        return arithmetic::evaluate(node);
    }
    multiply_like_polynomial_terms(node)
}

/// Like [`multiply_like_terms`], but leaves products of constants alone.
pub fn multiply_like_polynomial_terms(node: &Node) -> Option<Status> {
    multiply_polynomial_terms(node).or_else(|| multiply_nth_roots(node))
}

fn multiply_polynomial_terms(node: &Node) -> Option<Status> {
    let terms = like_polynomial_factors(node)?;
    let base = terms[0].base().clone();

    let mut substeps = Vec::new();
    let mut current = node.clone();

    if terms.iter().any(|term| term.exponent().is_none()) {
        let next = Node::mul(terms.iter()
            .map(|term| Node::pow(base.clone(), term.exponent_node()))
            .collect());
        substeps.push(Status::node_changed(ChangeType::AddExponentOfOne, current, next.clone()));
        current = next;
    }

    let exponent_sum = Node::add(terms.iter().map(CoefficientTerm::exponent_node).collect());
    let collected = Node::pow(base.clone(), exponent_sum.clone());
    substeps.push(Status::node_changed(ChangeType::CollectPolynomialExponents, current, collected.clone()));
    current = collected;

    if let Some(exponent_status) = arithmetic::evaluate(&exponent_sum) {
        let evaluated = Node::pow(base, exponent_status.new_node);
        substeps.push(Status::node_changed(exponent_status.change_type, current, evaluated.clone()));
        current = evaluated;
    }

    Some(Status::with_substeps(ChangeType::MultiplyPolynomialTerms, node.clone(), current, substeps))
}

/// `nthRoot(2) * nthRoot(3) = nthRoot(2 * 3)`
fn multiply_nth_roots(node: &Node) -> Option<Status> {
    let (radicands, root) = like_nth_roots(node)?;
    let new_node = Node::nth_root(Node::mul(radicands), root);
    Some(Status::node_changed(ChangeType::MultiplyNthRoots, node.clone(), new_node))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{node::tests::parse_node, simplify::normalize::normalize};
    use super::*;

    fn multiply(source: &str) -> Option<Status> {
        multiply_like_terms(&normalize(&parse_node(source)))
    }

    #[test]
    fn polynomial_terms() {
        let status = multiply("x * x^2").unwrap();
        assert_eq!(status.change_type, ChangeType::MultiplyPolynomialTerms);
        assert_eq!(status.new_node.to_string(), "x^3");

        let steps = status.substeps
            .iter()
            .map(|substep| (substep.change_type, substep.new_node.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(steps, vec![
            (ChangeType::AddExponentOfOne, "x^1 * x^2".to_string()),
            (ChangeType::CollectPolynomialExponents, "x^(1 + 2)".to_string()),
            (ChangeType::SimplifyArithmetic, "x^3".to_string()),
        ]);
    }

    #[test]
    fn symbolic_exponents_are_collected() {
        let status = multiply("x^y * x^2").unwrap();
        assert_eq!(status.new_node.to_string(), "x^(y + 2)");
    }

    #[test]
    fn nth_roots() {
        let status = multiply("nthRoot(2) * nthRoot(3)").unwrap();
        assert_eq!(status.change_type, ChangeType::MultiplyNthRoots);
        assert_eq!(status.new_node.to_string(), "nthRoot(2 * 3, 2)");
        assert!(multiply("nthRoot(2, 3) * nthRoot(3)").is_none());
    }

    #[test]
    fn unlike_factors() {
        assert!(multiply("x * y").is_none());
        assert!(multiply("2x * x").is_none());
    }
}
