//! Turns a local rewrite into a search over the whole tree.
//!
//! A rule only needs to look at the node it is given. [`pre_order`] and [`post_order`] walk the
//! tree, apply the rule to every node, and stop at the first change, lifting it into a change on
//! the root with [`Status::child_changed`].

use crate::{node::Node, status::Status};

/// Applies `rule` to the node first, then to each child from left to right. The first change
/// wins.
pub fn pre_order(rule: &impl Fn(&Node) -> Status, node: &Node) -> Status {
    let status = rule(node);
    if status.has_changed() {
        return status;
    }
    search_children(node, |child| pre_order(rule, child))
}

/// Applies `rule` to each child from left to right first, then to the node. The first change
/// wins.
pub fn post_order(rule: &impl Fn(&Node) -> Status, node: &Node) -> Status {
    let status = search_children(node, |child| post_order(rule, child));
    if status.has_changed() {
        return status;
    }
    rule(node)
}

/// Searches the children of the node, returning the first change lifted to the node.
fn search_children(node: &Node, search: impl Fn(&Node) -> Status) -> Status {
    match node {
        Node::Number(_) | Node::Symbol(_) => Status::no_change(node.clone()),
        _ => node.children()
            .into_iter()
            .enumerate()
            .find_map(|(index, child)| {
                search(child)
                    .changed()
                    .map(|status| Status::child_changed(node, status, index))
            })
            .unwrap_or_else(|| Status::no_change(node.clone())),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{change_type::ChangeType, node::tests::parse_node};
    use super::*;

    /// Replaces any product with the symbol `p`.
    fn products_to_p(node: &Node) -> Status {
        if node.op() == Some(crate::node::Op::Mul) {
            Status::node_changed(ChangeType::SimplifyArithmetic, node.clone(), Node::symbol("p"))
        } else {
            Status::no_change(node.clone())
        }
    }

    #[test]
    fn pre_order_prefers_the_outer_node() {
        let node = parse_node("(2 * 3) * 4");
        let status = pre_order(&products_to_p, &node);
        assert_eq!(status.new_node.to_string(), "p");
    }

    #[test]
    fn post_order_prefers_the_inner_node() {
        let node = parse_node("(2 * 3) * 4");
        let status = post_order(&products_to_p, &node);
        assert_eq!(status.new_node.to_string(), "(p) * 4");
        assert_eq!(status.groups.new.get(&1), Some(&vec![vec![0]]));
    }

    #[test]
    fn first_child_wins() {
        let node = parse_node("2 * 3 + 4 * 5");
        let status = post_order(&products_to_p, &node);
        assert_eq!(status.new_node.to_string(), "p + 4 * 5");
    }

    #[test]
    fn leaves_do_not_change() {
        let status = post_order(&products_to_p, &parse_node("x"));
        assert!(!status.has_changed());
    }
}
