//! Basic identities: absorbing zeros and ones, trivial exponents, and double negation.
//!
//! Division by zero is also detected here, first, so the pipeline can stop before any other rule
//! touches the expression.

use crate::{
    change_type::ChangeType,
    node::{
        negative::negate,
        term::{CoefficientTerm, PolynomialTerm},
        Node,
        Op,
    },
    status::Status,
    tree_search,
};

fn is_number(node: &Node, value: f64) -> bool {
    node.as_number() == Some(value)
}

/// `x / 0` is recorded as a terminal step, with the node left as it was.
fn division_by_zero(node: &Node) -> Option<Status> {
    match node {
        Node::Operator { op: Op::Div, args, .. } if args.get(1).is_some_and(|d| is_number(d.unparenthesized(), 0.0)) => {
            Some(Status::node_changed(ChangeType::DivisionByZero, node.clone(), node.clone()))
        },
        _ => None,
    }
}

/// `0 * x = 0`
fn multiply_by_zero(node: &Node) -> Option<Status> {
    match node {
        Node::Operator { op: Op::Mul, args, .. } if args.iter().any(|arg| is_number(arg, 0.0)) => {
            Some(Status::node_changed(ChangeType::MultiplyByZero, node.clone(), Node::Number(0.0)))
        },
        _ => None,
    }
}

/// `0 / x = 0`
fn reduce_zero_numerator(node: &Node) -> Option<Status> {
    match node {
        Node::Operator { op: Op::Div, args, .. } if is_number(&args[0], 0.0) => {
            Some(Status::node_changed(ChangeType::ReduceZeroNumerator, node.clone(), Node::Number(0.0)))
        },
        _ => None,
    }
}

/// `x^0 = 1`
fn reduce_exponent_by_zero(node: &Node) -> Option<Status> {
    match node {
        Node::Operator { op: Op::Pow, args, .. } if is_number(&args[1], 0.0) => {
            Some(Status::node_changed(ChangeType::ReduceExponentByZero, node.clone(), Node::Number(1.0)))
        },
        _ => None,
    }
}

/// `x^1 = x`
fn remove_exponent_by_one(node: &Node) -> Option<Status> {
    match node {
        Node::Operator { op: Op::Pow, args, .. } if is_number(&args[1], 1.0) => {
            Some(Status::node_changed(ChangeType::RemoveExponentByOne, node.clone(), args[0].clone()))
        },
        _ => None,
    }
}

/// `1^x = 1`, when the exponent is a constant expression
fn remove_exponent_base_one(node: &Node) -> Option<Status> {
    match node {
        Node::Operator { op: Op::Pow, args, .. }
            if is_number(&args[0], 1.0) && args[1].resolves_to_constant() =>
        {
            Some(Status::node_changed(ChangeType::RemoveExponentBaseOne, node.clone(), Node::Number(1.0)))
        },
        _ => None,
    }
}

/// `--x = x`
fn resolve_double_minus(node: &Node) -> Option<Status> {
    match node {
        Node::UnaryMinus(operand) => match operand.unparenthesized() {
            Node::UnaryMinus(inner) => {
                Some(Status::node_changed(ChangeType::ResolveDoubleMinus, node.clone(), (**inner).clone()))
            },
            _ => None,
        },
        _ => None,
    }
}

/// `x + 0 = x`
fn remove_adding_zero(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Add, args, .. } = node else {
        return None;
    };

    let kept = args.iter().filter(|arg| !is_number(arg, 0.0)).cloned().collect::<Vec<_>>();
    if kept.len() == args.len() {
        return None;
    }

    let new_node = match kept.len() {
        0 => Node::Number(0.0),
        _ => Node::add(kept),
    };
    Some(Status::node_changed(ChangeType::RemoveAddingZero, node.clone(), new_node))
}

/// `1 * x = x`
fn remove_multiplying_by_one(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Mul, args, implicit } = node else {
        return None;
    };

    let kept = args.iter().filter(|arg| !is_number(arg, 1.0)).cloned().collect::<Vec<_>>();
    if kept.len() == args.len() {
        return None;
    }

    let new_node = match kept.len() {
        0 => Node::Number(1.0),
        1 => kept.into_iter().next()?,
        _ => Node::operator_with(Op::Mul, kept, *implicit),
    };
    Some(Status::node_changed(ChangeType::RemoveMultiplyingByOne, node.clone(), new_node))
}

/// `-1 * x = -x`
///
/// The `-1` is merged into the factor after it, or the factor before it if it is last. Merging
/// with a number is left to arithmetic.
fn remove_multiplying_by_negative_one(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Mul, args, implicit } = node else {
        return None;
    };

    let minus_one = args.iter().position(|arg| is_number(arg, -1.0))?;
    let neighbor = if minus_one + 1 == args.len() {
        minus_one.checked_sub(1)?
    } else {
        minus_one + 1
    };
    if args[neighbor].is_constant() {
        return None;
    }

    let mut new_args = args.clone();
    new_args[neighbor] = negate(&args[neighbor]);
    new_args.remove(minus_one);

    let new_node = match new_args.len() {
        1 => new_args.remove(0),
        _ => Node::operator_with(Op::Mul, new_args, *implicit),
    };
    Some(Status::node_changed(ChangeType::RemoveMultiplyingByNegativeOne, node.clone(), new_node))
}

/// `x / 1 = x`
/// `x / -1 = -x`
fn remove_dividing_by_one(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Div, args, .. } = node else {
        return None;
    };

    if is_number(&args[1], 1.0) {
        Some(Status::node_changed(ChangeType::RemoveDividingByOne, node.clone(), args[0].clone()))
    } else if is_number(&args[1], -1.0) {
        Some(Status::node_changed(ChangeType::DivisionByNegativeOne, node.clone(), negate(&args[0])))
    } else {
        None
    }
}

/// `x^2 * 5 = 5x^2`
fn rearrange_coeff(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Mul, args, .. } = node else {
        return None;
    };
    let [term, coeff @ Node::Number(_)] = args.as_slice() else {
        return None;
    };

    let term = PolynomialTerm::try_from(term).ok()?;
    if term.has_coeff() {
        return None;
    }

    let new_node = Node::polynomial_term(term.base().clone(), term.exponent().cloned(), Some(coeff.clone()), false);
    Some(Status::node_changed(ChangeType::RearrangeCoeff, node.clone(), new_node))
}

/// Applies the first basic identity that matches the node.
pub fn simplify(node: &Node) -> Status {
    division_by_zero(node)
        .or_else(|| multiply_by_zero(node))
        .or_else(|| reduce_zero_numerator(node))
        .or_else(|| reduce_exponent_by_zero(node))
        .or_else(|| remove_exponent_by_one(node))
        .or_else(|| remove_exponent_base_one(node))
        .or_else(|| resolve_double_minus(node))
        .or_else(|| remove_adding_zero(node))
        .or_else(|| remove_multiplying_by_one(node))
        .or_else(|| remove_multiplying_by_negative_one(node))
        .or_else(|| remove_dividing_by_one(node))
        .or_else(|| rearrange_coeff(node))
        .unwrap_or_else(|| Status::no_change(node.clone()))
}

/// Applies the first basic identity found, searching from the root.
pub fn search(node: &Node) -> Status {
    tree_search::pre_order(&simplify, node)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{node::tests::parse_node, simplify::normalize::normalize};
    use super::*;

    fn step(source: &str) -> (ChangeType, String) {
        let status = search(&normalize(&parse_node(source)));
        (status.change_type, status.new_node.to_string())
    }

    #[test]
    fn division_by_zero_keeps_the_node() {
        let node = parse_node("x / 0");
        let status = search(&node);
        assert_eq!(status.change_type, ChangeType::DivisionByZero);
        assert_eq!(status.new_node, node);
    }

    #[test]
    fn zeros() {
        assert_eq!(step("2 * 0 * x"), (ChangeType::MultiplyByZero, "0".to_string()));
        assert_eq!(step("0 / x"), (ChangeType::ReduceZeroNumerator, "0".to_string()));
        assert_eq!(step("x^0"), (ChangeType::ReduceExponentByZero, "1".to_string()));
        assert_eq!(step("x + 0 + y"), (ChangeType::RemoveAddingZero, "x + y".to_string()));
    }

    #[test]
    fn ones() {
        assert_eq!(step("x^1"), (ChangeType::RemoveExponentByOne, "x".to_string()));
        assert_eq!(step("1^(2 + 3)"), (ChangeType::RemoveExponentBaseOne, "1".to_string()));
        assert_eq!(step("1 * x"), (ChangeType::RemoveMultiplyingByOne, "x".to_string()));
        assert_eq!(step("x / 1"), (ChangeType::RemoveDividingByOne, "x".to_string()));
        assert_eq!(step("x / -1"), (ChangeType::DivisionByNegativeOne, "-x".to_string()));
    }

    #[test]
    fn base_one_needs_a_constant_exponent() {
        let status = search(&parse_node("1^x"));
        assert!(!status.has_changed());
    }

    #[test]
    fn negative_one() {
        assert_eq!(step("-1 * x"), (ChangeType::RemoveMultiplyingByNegativeOne, "-x".to_string()));
        assert_eq!(step("x * -1"), (ChangeType::RemoveMultiplyingByNegativeOne, "-x".to_string()));
        assert!(!search(&normalize(&parse_node("-1 * 3"))).has_changed());
    }

    #[test]
    fn double_minus() {
        assert_eq!(step("--x"), (ChangeType::ResolveDoubleMinus, "x".to_string()));
    }

    #[test]
    fn rearrange_coefficient() {
        assert_eq!(step("x^2 * 5"), (ChangeType::RearrangeCoeff, "5x^2".to_string()));
    }
}
