//! ASCII printing of expression trees.
//!
//! The printed form is also the form that is parsed back in: every string produced here parses
//! to a tree that is mathematically equal to the printed one. Parentheses are added wherever the
//! tree shape would otherwise be lost.

use std::fmt;
use super::{Node, Op};

/// Formats a number without a trailing `.0`, printing negative zero as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// If the node prints with a leading minus sign, returns the node with that sign removed, so a
/// sum can print `a - b` instead of `a + -b`.
fn without_leading_minus(node: &Node) -> Option<Node> {
    match node {
        Node::Number(v) if *v < 0.0 => Some(Node::Number(-v)),
        Node::UnaryMinus(operand) => Some(match &**operand {
            inner @ Node::Operator { op: Op::Add | Op::Sub, .. } => Node::parens(inner.clone()),
            inner => inner.clone(),
        }),
        Node::Operator { op: op @ (Op::Mul | Op::Div), args, implicit } => {
            let first = args.first()?;
            let first = match first {
                Node::Number(_) | Node::Operator { op: Op::Div, .. } => without_leading_minus(first)?,
                _ => return None,
            };
            let mut args = args.clone();
            args[0] = first;
            Some(Node::operator_with(*op, args, *implicit))
        },
        _ => None,
    }
}

/// Returns true if the node is a sum or difference, which needs parentheses inside a product.
fn is_sum(node: &Node) -> bool {
    matches!(node, Node::Operator { op: Op::Add | Op::Sub, .. })
}

/// Writes the node, wrapped in parentheses if `wrap` is true.
fn write_wrapped(f: &mut fmt::Formatter, node: &Node, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({})", node)
    } else {
        write!(f, "{}", node)
    }
}

fn fmt_sum(f: &mut fmt::Formatter, args: &[Node]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i == 0 {
            write_wrapped(f, arg, false)?;
            continue;
        }

        match without_leading_minus(arg) {
            Some(positive) => {
                write!(f, " - ")?;
                write_wrapped(f, &positive, is_sum(&positive))?;
            },
            None => {
                write!(f, " + ")?;
                write_wrapped(f, arg, is_sum(arg))?;
            },
        }
    }
    Ok(())
}

fn fmt_product(f: &mut fmt::Formatter, args: &[Node], implicit: bool) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            // juxtaposed numbers would read as a single number, `2 2` as `22`
            if !implicit || matches!(arg, Node::Number(_)) {
                write!(f, " * ")?;
            } else if !matches!(args[i - 1], Node::Number(_)) || matches!(arg, Node::Function { .. }) {
                write!(f, " ")?;
            }
        }
        write_wrapped(f, arg, is_sum(arg))?;
    }
    Ok(())
}

fn fmt_div(f: &mut fmt::Formatter, numerator: &Node, denominator: &Node) -> fmt::Result {
    if let (Node::Number(n), Node::Number(d)) = (numerator, denominator) {
        // `-1/-2` would not parse back
        if *d >= 0.0 {
            return write!(f, "{}/{}", format_number(*n), format_number(*d));
        }
    }

    write_wrapped(f, numerator, is_sum(numerator))?;
    write!(f, " / ")?;
    let wrap_denominator = matches!(denominator, Node::Operator { op: Op::Add | Op::Sub | Op::Mul | Op::Div, .. })
        || matches!(denominator, Node::Number(v) if *v < 0.0)
        || matches!(denominator, Node::UnaryMinus(_));
    write_wrapped(f, denominator, wrap_denominator)
}

fn fmt_pow(f: &mut fmt::Formatter, base: &Node, exponent: &Node) -> fmt::Result {
    let wrap_base = matches!(base, Node::Operator { .. } | Node::UnaryMinus(_))
        || matches!(base, Node::Number(v) if *v < 0.0);
    write_wrapped(f, base, wrap_base)?;
    write!(f, "^")?;
    let wrap_exponent = matches!(exponent, Node::Operator { .. } | Node::UnaryMinus(_))
        || matches!(exponent, Node::Number(v) if *v < 0.0);
    write_wrapped(f, exponent, wrap_exponent)
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Number(value) => write!(f, "{}", format_number(*value)),
            Node::Symbol(name) => write!(f, "{}", name),
            Node::UnaryMinus(operand) => {
                write!(f, "-")?;
                let wrap = is_sum(operand) || matches!(**operand, Node::Number(v) if v < 0.0);
                write_wrapped(f, operand, wrap)
            },
            Node::Operator { op, args, implicit } => match (op, args.as_slice()) {
                (Op::Add, args) => fmt_sum(f, args),
                (Op::Mul, args) => fmt_product(f, args, *implicit),
                (Op::Sub, [lhs, rhs]) => {
                    write!(f, "{} - ", lhs)?;
                    write_wrapped(f, rhs, is_sum(rhs) || matches!(rhs, Node::UnaryMinus(_)))
                },
                (Op::Div, [numerator, denominator]) => fmt_div(f, numerator, denominator),
                (Op::Pow, [base, exponent]) => fmt_pow(f, base, exponent),
                (op, args) => {
                    // malformed arity, print something readable anyway
                    let parts = args.iter().map(ToString::to_string).collect::<Vec<_>>();
                    write!(f, "{}", parts.join(&format!(" {} ", op.symbol())))
                },
            },
            Node::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            },
            Node::Parens(content) => write!(f, "({})", content),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::node::tests::parse_node;
    use super::*;

    fn print(source: &str) -> String {
        parse_node(source).to_string()
    }

    #[test]
    fn numbers() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(-3.5), "-3.5");
    }

    #[test]
    fn sums_print_subtraction() {
        let node = Node::add(vec![
            Node::symbol("x"),
            Node::number(-3.0),
            Node::unary_minus(Node::symbol("y")),
            Node::implicit_mul(vec![Node::number(-2.0), Node::symbol("z")]),
        ]);
        assert_eq!(node.to_string(), "x - 3 - y - 2z");
    }

    #[test]
    fn implicit_products() {
        assert_eq!(print("2x"), "2x");
        assert_eq!(print("3(x + 1)"), "3(x + 1)");
        assert_eq!(print("x y"), "x y");
        let half_x = Node::implicit_mul(vec![Node::div(Node::number(1.0), Node::number(2.0)), Node::symbol("x")]);
        assert_eq!(half_x.to_string(), "1/2 x");
    }

    #[test]
    fn implicit_product_of_numbers_stays_readable() {
        let node = Node::implicit_mul(vec![Node::number(2.0), Node::number(2.0)]);
        assert_eq!(node.to_string(), "2 * 2");
        assert_eq!(parse_node(&node.to_string()), Node::mul(vec![Node::number(2.0), Node::number(2.0)]));

        let node = Node::implicit_mul(vec![Node::symbol("x"), Node::number(-3.0)]);
        assert_eq!(node.to_string(), "x * -3");
    }

    #[test]
    fn fractions_and_powers() {
        assert_eq!(print("1/2"), "1/2");
        assert_eq!(print("x/2"), "x / 2");
        assert_eq!(print("x^(1/2)"), "x^(1/2)");
        assert_eq!(Node::div(Node::symbol("x"), Node::implicit_mul(vec![Node::number(2.0), Node::symbol("y")])).to_string(), "x / (2y)");
        assert_eq!(Node::pow(Node::number(-2.0), Node::number(2.0)).to_string(), "(-2)^2");
        assert_eq!(Node::pow(Node::symbol("x"), Node::number(-1.0)).to_string(), "x^(-1)");
    }

    #[test]
    fn precedence_parentheses() {
        let node = Node::mul(vec![
            Node::add(vec![Node::symbol("x"), Node::number(1.0)]),
            Node::add(vec![Node::symbol("x"), Node::number(2.0)]),
        ]);
        assert_eq!(node.to_string(), "(x + 1) * (x + 2)");
        assert_eq!(Node::unary_minus(Node::add(vec![Node::symbol("a"), Node::symbol("b")])).to_string(), "-(a + b)");
    }

    #[test]
    fn functions() {
        assert_eq!(print("nthRoot(8, 3)"), "nthRoot(8, 3)");
        assert_eq!(print("abs(-2)"), "abs(-2)");
    }

    #[test]
    fn printed_output_parses_back() {
        for source in ["2x^2 + 3x - 4", "(x + 1)^2", "-(x + 2)", "x / (2y)", "1/2 x + 3"] {
            let node = parse_node(source);
            let reparsed = parse_node(&node.to_string());
            assert_eq!(reparsed.to_string(), node.to_string());
        }
    }
}
