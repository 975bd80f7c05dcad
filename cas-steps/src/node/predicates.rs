//! Shape predicates and numeric evaluation of constant subtrees.

use super::{Node, Op};

impl Node {
    /// Returns true if the node is a number.
    pub fn is_constant(&self) -> bool {
        matches!(self, Node::Number(_))
    }

    /// Returns true if the node is a number, or a unary minus of a number when
    /// `allow_unary_minus` is set.
    pub fn is_constant_with(&self, allow_unary_minus: bool) -> bool {
        match self {
            Node::Number(_) => true,
            Node::UnaryMinus(operand) if allow_unary_minus => operand.is_constant(),
            _ => false,
        }
    }

    /// Returns true if the node is a number with no fractional part.
    pub fn is_integer(&self) -> bool {
        matches!(self, Node::Number(v) if v.fract() == 0.0)
    }

    /// Returns true if the node is a division of two numbers, such as `2/3`.
    pub fn is_constant_fraction(&self) -> bool {
        matches!(self, Node::Operator { op: Op::Div, args, .. } if args.iter().all(Node::is_constant))
    }

    /// Returns true if the node is a division of two integers.
    pub fn is_integer_fraction(&self) -> bool {
        matches!(self, Node::Operator { op: Op::Div, args, .. } if args.iter().all(Node::is_integer))
    }

    /// Returns true if the node is a number or a constant fraction.
    pub fn is_constant_or_constant_fraction(&self) -> bool {
        self.is_constant() || self.is_constant_fraction()
    }

    /// Returns the numerator and denominator of a constant fraction.
    pub fn as_fraction(&self) -> Option<(f64, f64)> {
        match self {
            Node::Operator { op: Op::Div, args, .. } => match args.as_slice() {
                [Node::Number(n), Node::Number(d)] => Some((*n, *d)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Returns true if the node is `nthRoot(...)`.
    pub fn is_nth_root(&self) -> bool {
        self.is_function("nthRoot")
    }

    /// Returns true if the tree contains no symbols, so it evaluates to a single number.
    pub fn resolves_to_constant(&self) -> bool {
        match self {
            Node::Number(_) => true,
            Node::Symbol(_) => false,
            Node::UnaryMinus(operand) | Node::Parens(operand) => operand.resolves_to_constant(),
            Node::Operator { args, .. } | Node::Function { args, .. } => args.iter().all(Node::resolves_to_constant),
        }
    }

    /// Numerically evaluates a tree that contains no symbols.
    ///
    /// Returns [`None`] if the tree contains a symbol, an unknown function, or a malformed
    /// operator.
    pub fn evaluate(&self) -> Option<f64> {
        match self {
            Node::Number(v) => Some(*v),
            Node::Symbol(_) => None,
            Node::UnaryMinus(operand) => operand.evaluate().map(|v| -v),
            Node::Parens(content) => content.evaluate(),
            Node::Operator { op, args, .. } => {
                let values = args.iter().map(Node::evaluate).collect::<Option<Vec<_>>>()?;
                match (op, values.as_slice()) {
                    (Op::Add, values) => Some(values.iter().sum()),
                    (Op::Mul, values) => Some(values.iter().product()),
                    (Op::Sub, [a, b]) => Some(a - b),
                    (Op::Div, [a, b]) => Some(a / b),
                    (Op::Pow, [a, b]) => Some(a.powf(*b)),
                    _ => None,
                }
            },
            Node::Function { name, args } => {
                let values = args.iter().map(Node::evaluate).collect::<Option<Vec<_>>>()?;
                match (name.as_str(), values.as_slice()) {
                    ("abs", [v]) => Some(v.abs()),
                    ("nthRoot", [v]) => Some(v.sqrt()),
                    ("nthRoot", [v, root]) => Some(v.powf(1.0 / root)),
                    _ => None,
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use crate::node::tests::parse_node;
    use super::*;

    #[test]
    fn fractions() {
        assert!(parse_node("2/3").is_integer_fraction());
        assert!(parse_node("2.5/3").is_constant_fraction());
        assert!(!parse_node("2.5/3").is_integer_fraction());
        assert!(!parse_node("x/3").is_constant_fraction());
        assert_eq!(parse_node("2/3").as_fraction(), Some((2.0, 3.0)));
    }

    #[test]
    fn constants() {
        assert!(parse_node("-2").is_constant_with(true));
        assert!(!parse_node("-2").is_constant());
        assert!(parse_node("(2 + 3) * abs(-1)").resolves_to_constant());
        assert!(!parse_node("2 + x").resolves_to_constant());
    }

    #[test]
    fn evaluation() {
        assert_float_absolute_eq!(parse_node("2 + 3 * 4").evaluate().unwrap(), 14.0);
        assert_float_absolute_eq!(parse_node("nthRoot(27, 3)").evaluate().unwrap(), 3.0, 1e-9);
        assert_float_absolute_eq!(parse_node("abs(-2) / 4").evaluate().unwrap(), 0.5);
        assert_float_absolute_eq!(parse_node("2^-2").evaluate().unwrap(), 0.25);
        assert_eq!(parse_node("x + 1").evaluate(), None);
    }
}
