//! Normalization of chained divisions.

use crate::{
    change_type::ChangeType,
    node::{Node, Op},
    status::Status,
    tree_search,
};

/// `a / (b / c) = a * (c / b)`
fn multiply_by_inverse(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Div, args, .. } = node else {
        return None;
    };
    let Node::Operator { op: Op::Div, args: inner, .. } = args[1].unparenthesized() else {
        return None;
    };

    let inverse = Node::div(inner[1].clone(), inner[0].clone());
    let new_node = Node::mul(vec![args[0].clone(), inverse]);
    Some(Status::node_changed(ChangeType::MultiplyByInverse, node.clone(), new_node))
}

/// `(a / b) / c = a / (b * c)`
fn simplify_division_chain(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Div, args, .. } = node else {
        return None;
    };
    let Node::Operator { op: Op::Div, args: inner, .. } = args[0].unparenthesized() else {
        return None;
    };

    let denominator = Node::mul(vec![
        inner[1].unparenthesized().clone(),
        args[1].unparenthesized().clone(),
    ]);
    let new_node = Node::div(inner[0].clone(), denominator);
    Some(Status::node_changed(ChangeType::SimplifyDivision, node.clone(), new_node))
}

/// Applies the first division rule that matches the node.
pub fn simplify(node: &Node) -> Status {
    multiply_by_inverse(node)
        .or_else(|| simplify_division_chain(node))
        .unwrap_or_else(|| Status::no_change(node.clone()))
}

/// Normalizes the first division chain found, searching from the root.
pub fn search(node: &Node) -> Status {
    tree_search::pre_order(&simplify, node)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::node::tests::parse_node;
    use super::*;

    #[test]
    fn divide_by_fraction() {
        let status = search(&parse_node("2 / (3 / x)"));
        assert_eq!(status.change_type, ChangeType::MultiplyByInverse);
        assert_eq!(status.new_node.to_string(), "2 * x / 3");
    }

    #[test]
    fn division_chain() {
        let status = search(&parse_node("x / 2 / 3"));
        assert_eq!(status.change_type, ChangeType::SimplifyDivision);
        assert_eq!(status.new_node.to_string(), "x / (2 * 3)");
    }

    #[test]
    fn plain_division_is_untouched() {
        assert!(!search(&parse_node("x / 2")).has_changed());
    }
}
