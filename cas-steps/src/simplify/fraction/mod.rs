//! Fraction rules: adding constant fractions, reducing by the greatest common divisor, fixing
//! signs, and cancelling shared factors.

pub mod add;
pub mod cancel;
pub mod gcd;
pub mod signs;

use crate::{node::Node, status::Status, tree_search};

/// Applies the first fraction rule that matches the node.
pub fn simplify(node: &Node) -> Status {
    add::add_constant_fractions(node)
        .or_else(|| add::add_constant_and_fraction(node))
        .or_else(|| signs::simplify_fraction_signs(node))
        .or_else(|| gcd::divide_by_gcd(node))
        .or_else(|| gcd::simplify_polynomial_fraction(node))
        .or_else(|| cancel::cancel_like_terms(node))
        .unwrap_or_else(|| Status::no_change(node.clone()))
}

/// Applies the first fraction rule found, searching from the root.
pub fn search(node: &Node) -> Status {
    tree_search::pre_order(&simplify, node)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{change_type::ChangeType, node::tests::parse_node, simplify::normalize::normalize};
    use super::*;

    fn step(source: &str) -> (ChangeType, String) {
        let status = search(&normalize(&parse_node(source)));
        (status.change_type, status.new_node.to_string())
    }

    #[test]
    fn first_matching_rule() {
        assert_eq!(step("x + 1/2 + 1/2"), (ChangeType::NoChange, "x + 1/2 + 1/2".to_string()));
        assert_eq!(step("2/4 + x"), (ChangeType::SimplifyFraction, "1/2 + x".to_string()));
        assert_eq!(step("x^2 / x"), (ChangeType::CancelTerms, "x".to_string()));
    }
}
