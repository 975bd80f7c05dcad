//! Evaluation of the supported functions: `abs` and `nthRoot`.

pub mod abs;
pub mod nth_root;

use crate::{node::Node, status::Status, tree_search};

/// Simplifies the node if it is a function call that can be evaluated.
pub fn simplify(node: &Node) -> Status {
    abs::absolute_value(node)
        .or_else(|| nth_root::nth_root(node))
        .unwrap_or_else(|| Status::no_change(node.clone()))
}

/// Simplifies the first function call that allows it, searching deepest first.
pub fn search(node: &Node) -> Status {
    tree_search::post_order(&simplify, node)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{change_type::ChangeType, node::tests::parse_node};
    use super::*;

    #[test]
    fn innermost_first() {
        let status = search(&parse_node("nthRoot(nthRoot(16), 2)"));
        assert_eq!(status.change_type, ChangeType::NthRootValue);
        assert_eq!(status.new_node.to_string(), "nthRoot(4, 2)");
    }
}
