//! Canonicalization that runs before every pass: flattening and removal of redundant
//! parentheses. These rewrites are never reported as steps.

use crate::node::{negative::negate, term::is_polynomial_term, Node, Op};
use super::collect::can_collect_or_combine;

/// Brings the node into the shape the passes expect.
pub fn normalize(node: &Node) -> Node {
    let node = flatten(node);
    let node = remove_unnecessary_parens(&node);
    flatten(&node)
}

/// Flattens nested sums and products into single n-ary operators, and simplifies signs.
///
/// - `(a + b) + c` (without explicit parentheses) becomes `a + b + c`
/// - `a - b` becomes `a + -b`
/// - `-(3)` as a unary minus of a number becomes the number `-3`
/// - `2 * x` becomes the implicit `2x`
///
/// Polynomial terms such as `2x` are kept intact inside explicit products, so `3 * 2x` keeps two
/// factors.
pub fn flatten(node: &Node) -> Node {
    match node {
        Node::Number(_) | Node::Symbol(_) => node.clone(),
        Node::Parens(content) => Node::parens(flatten(content)),
        Node::UnaryMinus(operand) => match flatten(operand) {
            Node::Number(value) => Node::Number(-value),
            operand => Node::unary_minus(operand),
        },
        Node::Function { name, args } => Node::function(name.clone(), args.iter().map(flatten).collect()),
        Node::Operator { op: Op::Sub, args, .. } if args.len() == 2 => {
            let sum = Node::add(vec![flatten(&args[0]), negate(&flatten(&args[1]))]);
            flatten_sum(&sum)
        },
        Node::Operator { op: Op::Add, .. } => flatten_sum(node),
        Node::Operator { op: Op::Mul, args, implicit } => flatten_product(args, *implicit),
        Node::Operator { op, args, implicit } => {
            Node::operator_with(*op, args.iter().map(flatten).collect(), *implicit)
        },
    }
}

fn flatten_sum(node: &Node) -> Node {
    let mut terms = Vec::new();
    for arg in node.args() {
        match flatten(arg) {
            Node::Operator { op: Op::Add, args, .. } => terms.extend(args),
            term => terms.push(term),
        }
    }
    Node::add(terms)
}

fn flatten_product(args: &[Node], implicit: bool) -> Node {
    let mut factors = Vec::new();
    let mut all_implicit = implicit;
    for arg in args {
        match flatten(arg) {
            factor @ Node::Operator { op: Op::Mul, .. } if !implicit && is_polynomial_term(&factor) => {
                factors.push(factor);
            },
            Node::Operator { op: Op::Mul, args, implicit: inner_implicit } => {
                all_implicit &= inner_implicit;
                factors.extend(args);
            },
            factor => factors.push(factor),
        }
    }

    // `2 * x` and `2 * x^2` read as polynomial terms
    let symbol_term = |node: &Node| match node {
        Node::Symbol(_) => true,
        Node::Operator { op: Op::Pow, args, .. } => matches!(args.first(), Some(Node::Symbol(_))),
        _ => false,
    };
    if let [Node::Number(_), term] = factors.as_slice() {
        if symbol_term(term) {
            all_implicit = true;
        }
    }

    Node::operator_with(Op::Mul, factors, all_implicit)
}

/// Where a node sits relative to its parent, which decides whether parentheses around it are
/// needed.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Context {
    Root,
    FunctionArg,
    Sum,
    Product,
    Numerator,
    Denominator,
    Base,
    Exponent,
    Operand,
}

impl Context {
    /// Returns the context of the `index`-th argument of the operator.
    fn of_arg(op: Op, index: usize) -> Self {
        match (op, index) {
            (Op::Add, _) | (Op::Sub, 0) => Context::Sum,
            (Op::Sub, _) => Context::Operand,
            (Op::Mul, _) => Context::Product,
            (Op::Div, 0) => Context::Numerator,
            (Op::Div, _) => Context::Denominator,
            (Op::Pow, 0) => Context::Base,
            (Op::Pow, _) => Context::Exponent,
        }
    }
}

/// Removes parentheses that do not change the meaning of the expression, and collapses nested
/// parentheses.
///
/// Parentheses around a sum inside a sum (or a product inside a product) are kept while their
/// content still has like terms to collect or combine, since the collector emits exactly that
/// shape.
pub fn remove_unnecessary_parens(node: &Node) -> Node {
    strip(node, Context::Root)
}

fn strip(node: &Node, context: Context) -> Node {
    match node {
        Node::Number(_) | Node::Symbol(_) => node.clone(),
        Node::Parens(content) => {
            let content = strip(content.unparenthesized(), Context::Root);
            if keep_parens(&content, context) {
                Node::parens(content)
            } else {
                content
            }
        },
        Node::UnaryMinus(operand) => Node::unary_minus(strip(operand, Context::Operand)),
        Node::Function { name, args } => Node::function(
            name.clone(),
            args.iter().map(|arg| strip(arg, Context::FunctionArg)).collect(),
        ),
        Node::Operator { op, args, implicit } => Node::operator_with(
            *op,
            args.iter()
                .enumerate()
                .map(|(index, arg)| strip(arg, Context::of_arg(*op, index)))
                .collect(),
            *implicit,
        ),
    }
}

fn keep_parens(content: &Node, context: Context) -> bool {
    // the printer adds back the parentheses a negative number needs
    let is_atom = matches!(content, Node::Symbol(_) | Node::Function { .. } | Node::Number(_));
    let is_sum = content.is_op(Op::Add) || content.is_op(Op::Sub);
    let is_signed = matches!(content, Node::UnaryMinus(_));

    match context {
        Context::Root | Context::FunctionArg => false,
        Context::Sum => is_sum && can_collect_or_combine(content),
        Context::Product => {
            is_sum
                || is_signed
                || (content.is_op(Op::Mul) && can_collect_or_combine(content))
        },
        Context::Numerator => is_sum,
        Context::Denominator | Context::Operand => {
            !(is_atom || content.is_op(Op::Pow))
        },
        Context::Base | Context::Exponent => !is_atom,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::node::tests::parse_node;
    use super::*;

    fn norm(source: &str) -> String {
        normalize(&parse_node(source)).to_string()
    }

    #[test]
    fn flattens_sums_and_differences() {
        let node = normalize(&parse_node("x + 2 - 3 + y"));
        assert_eq!(node.args().len(), 4);
        assert_eq!(node.to_string(), "x + 2 - 3 + y");
        assert_eq!(node.args()[2], Node::Number(-3.0));
    }

    #[test]
    fn flattens_products_but_keeps_terms() {
        let node = normalize(&parse_node("2xy"));
        assert_eq!(node.args().len(), 3);

        let node = normalize(&Node::mul(vec![
            Node::Number(3.0),
            Node::implicit_mul(vec![Node::Number(2.0), Node::symbol("x")]),
        ]));
        assert_eq!(node.args().len(), 2);
        assert_eq!(node.to_string(), "3 * 2x");
    }

    #[test]
    fn explicit_coefficient_becomes_implicit() {
        assert_eq!(norm("2 * x"), "2x");
        assert_eq!(norm("2 * x^2"), "2x^2");
        assert_eq!(norm("2 * 3"), "2 * 3");
    }

    #[test]
    fn folds_negative_numbers() {
        assert_eq!(normalize(&parse_node("-3")), Node::Number(-3.0));
    }

    #[test]
    fn negative_numbers_lose_their_parentheses() {
        let node = normalize(&parse_node("(-2)^2"));
        assert_eq!(node.args()[0], Node::Number(-2.0));
        assert_eq!(node.to_string(), "(-2)^2");

        let node = normalize(&parse_node("(-3) * (-2)"));
        assert_eq!(node.args(), &[Node::Number(-3.0), Node::Number(-2.0)]);
        assert_eq!(norm("x * (-2)"), "x * -2");
    }

    #[test]
    fn redundant_parentheses() {
        assert_eq!(norm("((x))"), "x");
        assert_eq!(norm("(x + 1)"), "x + 1");
        assert_eq!(norm("2 + (x * y)"), "2 + x * y");
        assert_eq!(norm("(x + 4) + 12"), "x + 4 + 12");
        assert_eq!(norm("abs((2))"), "abs(2)");
    }

    #[test]
    fn needed_parentheses() {
        assert_eq!(norm("(x + 1)^2"), "(x + 1)^2");
        assert_eq!(norm("2(x + 1)"), "2(x + 1)");
        assert_eq!(norm("(x + 1) / 2"), "(x + 1) / 2");
        assert_eq!(norm("(x + x) + 3"), "(x + x) + 3");
    }
}
