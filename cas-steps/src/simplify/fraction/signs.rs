//! Moves minus signs out of denominators.

use crate::{
    change_type::ChangeType,
    node::{negative::{is_negative, negate}, Node, Op},
    status::Status,
};

/// `2 / -3 = -2/3`
/// `-2 / -3 = 2/3`
pub fn simplify_fraction_signs(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Div, args, .. } = node else {
        return None;
    };
    if !is_negative(&args[1]) {
        return None;
    }

    let change_type = if is_negative(&args[0]) {
        ChangeType::CancelMinuses
    } else {
        ChangeType::SimplifySigns
    };
    let new_node = Node::div(negate(&args[0]), negate(&args[1]));
    Some(Status::node_changed(change_type, node.clone(), new_node))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn negative_denominator() {
        let status = simplify_fraction_signs(&Node::div(Node::Number(2.0), Node::Number(-3.0))).unwrap();
        assert_eq!(status.change_type, ChangeType::SimplifySigns);
        assert_eq!(status.new_node.to_string(), "-2/3");
    }

    #[test]
    fn both_negative() {
        let node = Node::div(Node::unary_minus(Node::symbol("x")), Node::Number(-3.0));
        let status = simplify_fraction_signs(&node).unwrap();
        assert_eq!(status.change_type, ChangeType::CancelMinuses);
        assert_eq!(status.new_node.to_string(), "x / 3");
    }

    #[test]
    fn positive_denominator() {
        assert!(simplify_fraction_signs(&Node::div(Node::Number(-2.0), Node::Number(3.0))).is_none());
    }
}
