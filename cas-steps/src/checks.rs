//! Rejects expressions that the rewrite families were never designed to see.

use crate::node::{Node, Op};

/// Returns true if the tree contains a node shape that cannot be stepped through.
///
/// Supported nodes are numbers, symbols, the arithmetic operators with their usual arity, unary
/// minus, parentheses, `abs` with a single constant argument, and `nthRoot` with one or two
/// arguments.
pub fn has_unsupported_nodes(node: &Node) -> bool {
    match node {
        Node::Number(value) => !value.is_finite(),
        Node::Symbol(_) => false,
        Node::UnaryMinus(operand) | Node::Parens(operand) => has_unsupported_nodes(operand),
        Node::Operator { op, args, .. } => {
            let arity_ok = match op {
                Op::Add | Op::Mul => args.len() >= 2,
                Op::Sub | Op::Div | Op::Pow => args.len() == 2,
            };
            !arity_ok || args.iter().any(has_unsupported_nodes)
        },
        Node::Function { name, args } => match name.as_str() {
            "abs" => args.len() != 1 || !args[0].resolves_to_constant() || has_unsupported_nodes(&args[0]),
            "nthRoot" => args.is_empty() || args.len() > 2 || args.iter().any(has_unsupported_nodes),
            _ => true,
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::node::tests::parse_node;
    use super::*;

    #[test]
    fn supported() {
        for source in ["2x + 3", "abs(-3) * x", "nthRoot(8, 3)", "nthRoot(x)", "(x + 1)^2 / 4", "-x"] {
            assert!(!has_unsupported_nodes(&parse_node(source)), "{}", source);
        }
    }

    #[test]
    fn unsupported() {
        for source in ["sin(x)", "abs(x)", "abs(1, 2)", "nthRoot()", "nthRoot(1, 2, 3)"] {
            assert!(has_unsupported_nodes(&parse_node(source)), "{}", source);
        }
    }
}
