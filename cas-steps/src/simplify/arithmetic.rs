//! Evaluation of operators whose arguments are all numbers.

use crate::{
    change_type::ChangeType,
    node::{Node, Op},
    primitive::is_integral,
    status::Status,
    tree_search,
};

/// Rounds a non-integral result for display: values below 1 in magnitude keep 4 significant
/// digits, larger values keep 4 digits after the decimal point.
pub fn round_decimal(value: f64) -> f64 {
    let rounded = if value.abs() < 1.0 {
        format!("{:.3e}", value)
    } else {
        format!("{:.4}", value)
    };
    rounded.parse().unwrap_or(value)
}

/// Evaluates the operator if every argument is a number.
///
/// Integer divisions are only evaluated when they divide evenly; other integer fractions are left
/// to the fraction rules. Results that are not finite are not evaluated.
pub fn evaluate(node: &Node) -> Option<Status> {
    let Node::Operator { op, args, .. } = node else {
        return None;
    };
    let values = args.iter()
        .map(|arg| arg.unparenthesized().as_number())
        .collect::<Option<Vec<_>>>()?;

    let value = match (op, values.as_slice()) {
        (Op::Add, values) => values.iter().sum(),
        (Op::Mul, values) => values.iter().product(),
        (Op::Sub, [a, b]) => a - b,
        (Op::Div, [_, b]) if *b == 0.0 => return None,
        (Op::Div, [a, b]) if is_integral(*a) && is_integral(*b) && a % b != 0.0 => return None,
        (Op::Div, [a, b]) => a / b,
        (Op::Pow, [a, b]) => a.powf(*b),
        _ => return None,
    };

    if !value.is_finite() {
        return None;
    }

    let value = if is_integral(value) { value } else { round_decimal(value) };
    Some(Status::node_changed(ChangeType::SimplifyArithmetic, node.clone(), Node::Number(value)))
}

/// Evaluates the node if possible.
pub fn simplify(node: &Node) -> Status {
    evaluate(node).unwrap_or_else(|| Status::no_change(node.clone()))
}

/// Evaluates the first fully-constant operator, searching deepest first.
pub fn search(node: &Node) -> Status {
    tree_search::post_order(&simplify, node)
}
