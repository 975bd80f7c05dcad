//! Splitting a fraction whose numerator is a sum into a sum of fractions.

use crate::{
    change_type::ChangeType,
    node::{Node, Op},
    status::Status,
    tree_search,
};

/// `(x + 3) / 2 = (x / 2 + 3 / 2)`
fn break_up_fraction(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Div, args, .. } = node else {
        return None;
    };
    let Node::Operator { op: Op::Add, args: terms, .. } = args[0].unparenthesized() else {
        return None;
    };

    let denominator = &args[1];
    let fractions = terms.iter()
        .map(|term| Node::div(term.clone(), denominator.clone()))
        .collect();
    let new_node = Node::parens(Node::add(fractions));
    Some(Status::node_changed(ChangeType::BreakUpFraction, node.clone(), new_node))
}

/// Breaks up the first fraction with a sum numerator, searching deepest first.
pub fn search(node: &Node) -> Status {
    tree_search::post_order(
        &|node| break_up_fraction(node).unwrap_or_else(|| Status::no_change(node.clone())),
        node,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{node::tests::parse_node, simplify::normalize::normalize};
    use super::*;

    #[test]
    fn breaks_up_numerator() {
        let status = search(&normalize(&parse_node("(x + 3) / 2")));
        assert_eq!(status.change_type, ChangeType::BreakUpFraction);
        assert_eq!(status.new_node.to_string(), "(x / 2 + 3/2)");
    }

    #[test]
    fn keeps_denominator_shape() {
        let status = search(&normalize(&parse_node("(x - 1) / (x + 2)")));
        assert_eq!(status.new_node.to_string(), "(x / (x + 2) - 1 / (x + 2))");
    }

    #[test]
    fn plain_fraction() {
        assert!(!search(&normalize(&parse_node("x / 2"))).has_changed());
    }
}
