//! Factoring of quadratics, and the integer factorization helpers the rewrite rules share.
//!
//! ```
//! use cas_steps::{factor, node::Node, simplify::normalize::normalize};
//!
//! let node = normalize(&Node::parse("x^2 + 3x + 2").unwrap());
//! let status = factor::factor_quadratic(&node);
//! assert_eq!(status.new_node.to_string(), "(x + 1) * (x + 2)");
//! ```

pub mod constant;
pub mod quadratic;

pub use constant::{factor_pairs, prime_factors};
pub use quadratic::{factor_quadratic, Quadratic};

use crate::{node::Node, simplify::normalize::normalize, status::Status, tree_search};

/// Factors the first quadratic found, searching from the root.
pub fn search(node: &Node) -> Status {
    tree_search::pre_order(&factor_quadratic, node)
}

/// Returns the steps taken to factor the node: at most one step, since every factorization is
/// complete.
pub fn step_through(node: &Node) -> Vec<Status> {
    search(&normalize(node)).changed().into_iter().collect()
}
