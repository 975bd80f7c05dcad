//! Multiplication of fractions: `a/b * c/d = (a * c) / (b * d)`.

use crate::{
    change_type::ChangeType,
    node::{term::is_polynomial_term, Node, Op},
    status::Status,
    tree_search,
};

/// Builds one side of the product: a single factor as is, or a parenthesized product.
fn product_side(mut factors: Vec<Node>) -> Node {
    match factors.len() {
        1 => factors.remove(0),
        _ => Node::parens(Node::mul(factors)),
    }
}

/// `2 * x / 3 = (2 * x) / 3`
/// `1/2 * 3/4 = (1 * 3) / (2 * 4)`
///
/// Products that read as a single term with a fraction coefficient, like `1/2 x`, are left alone.
fn multiply_fractions(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Mul, args, .. } = node else {
        return None;
    };
    if is_polynomial_term(node) || !args.iter().any(|arg| arg.is_op(Op::Div)) {
        return None;
    }

    let mut numerators = Vec::new();
    let mut denominators = Vec::new();
    for arg in args {
        match arg {
            Node::Operator { op: Op::Div, args: parts, .. } => {
                numerators.push(parts[0].clone());
                denominators.push(parts[1].clone());
            },
            factor => numerators.push(factor.clone()),
        }
    }

    let new_node = Node::div(product_side(numerators), product_side(denominators));
    Some(Status::node_changed(ChangeType::MultiplyFractions, node.clone(), new_node))
}

/// Multiplies the fractions of the first product that has any, searching from the root.
pub fn search(node: &Node) -> Status {
    tree_search::pre_order(
        &|node| multiply_fractions(node).unwrap_or_else(|| Status::no_change(node.clone())),
        node,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{node::tests::parse_node, simplify::normalize::normalize};
    use super::*;

    fn fraction(numerator: f64, denominator: f64) -> Node {
        Node::div(Node::Number(numerator), Node::Number(denominator))
    }

    #[test]
    fn multiplies_fractions() {
        let status = search(&Node::mul(vec![fraction(1.0, 2.0), fraction(3.0, 4.0)]));
        assert_eq!(status.change_type, ChangeType::MultiplyFractions);
        assert_eq!(status.new_node.to_string(), "(1 * 3) / (2 * 4)");

        let status = search(&Node::mul(vec![Node::symbol("x"), fraction(2.0, 3.0)]));
        assert_eq!(status.new_node.to_string(), "(x * 2) / 3");
    }

    #[test]
    fn nested_in_a_sum() {
        let status = search(&normalize(&parse_node("y + x * (2 / 3)")));
        assert_eq!(status.new_node.to_string(), "y + (x * 2) / 3");
    }

    #[test]
    fn fraction_coefficients_stay() {
        let term = Node::implicit_mul(vec![
            Node::div(Node::Number(1.0), Node::Number(2.0)),
            Node::symbol("x"),
        ]);
        assert!(!search(&term).has_changed());
    }
}
