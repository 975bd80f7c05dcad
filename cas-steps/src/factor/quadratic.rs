//! Factoring of quadratics with integer coefficients in a single symbol.

use crate::{
    change_type::ChangeType,
    node::{term::{CoefficientTerm, PolynomialTerm}, Node, Op},
    primitive::{gcd, is_integral, perfect_square_root},
    status::Status,
};
use super::constant::factor_pairs;

/// A quadratic `a x^2 + b x + c` with integer coefficients and `a ≠ 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Quadratic {
    /// The symbol, such as `x`.
    pub symbol: Node,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    /// Reads a sum of at most three terms as a quadratic. Each degree may appear at most once, and
    /// the squared term must be present.
    pub fn parse(node: &Node) -> Option<Self> {
        let Node::Operator { op: Op::Add, args, .. } = node else {
            return None;
        };
        if args.len() > 3 {
            return None;
        }

        let mut symbol: Option<Node> = None;
        let (mut a, mut b, mut c) = (None, None, None);
        for arg in args {
            if let Node::Number(value) = arg {
                if !is_integral(*value) || c.replace(*value).is_some() {
                    return None;
                }
                continue;
            }

            let term = PolynomialTerm::try_from(arg).ok()?;
            match &symbol {
                Some(existing) if existing != term.base() => return None,
                Some(_) => {},
                None => symbol = Some(term.base().clone()),
            }

            let coeff = term.coeff_value().filter(|v| is_integral(*v))?;
            let exponent = term.exponent_node().as_number()?;
            let slot = if exponent == 2.0 {
                &mut a
            } else if exponent == 1.0 {
                &mut b
            } else {
                return None;
            };
            if slot.replace(coeff).is_some() {
                return None;
            }
        }

        Some(Self {
            symbol: symbol?,
            a: a.filter(|a| *a != 0.0)?,
            b: b.unwrap_or(0.0),
            c: c.unwrap_or(0.0),
        })
    }

    fn negated(&self) -> Self {
        self.divided(-1.0)
    }

    fn divided(&self, divisor: f64) -> Self {
        Self { symbol: self.symbol.clone(), a: self.a / divisor, b: self.b / divisor, c: self.c / divisor }
    }

    /// Divides out the greatest common divisor of the coefficients, returning the divisor and the
    /// reduced quadratic. Zero coefficients do not affect the divisor.
    fn reduced(&self) -> Option<(f64, Self)> {
        let divisor = gcd(gcd(self.a, self.b)?, self.c)?;
        Some((divisor, self.divided(divisor)))
    }

    /// `coeff x^exponent`
    fn term(&self, coeff: f64, exponent: Option<f64>) -> Node {
        Node::polynomial_term(
            self.symbol.clone(),
            exponent.map(Node::Number),
            Some(Node::Number(coeff)),
            false,
        )
    }

    /// `(coeff x + constant)`
    fn linear(&self, coeff: f64, constant: f64) -> Node {
        Node::parens(Node::add(vec![self.term(coeff, None), Node::Number(constant)]))
    }

    /// Rebuilds the sum, skipping zero coefficients.
    fn to_node(&self) -> Node {
        let mut terms = vec![self.term(self.a, Some(2.0))];
        if self.b != 0.0 {
            terms.push(self.term(self.b, None));
        }
        if self.c != 0.0 {
            terms.push(Node::Number(self.c));
        }
        Node::add(terms)
    }
}

/// A factorization: the rule, the factored node, and the substeps that led to it.
type Factored = (ChangeType, Node, Vec<Status>);

/// `4x^2 + 6x = 2x (2x + 3)`
fn factor_symbol(quadratic: &Quadratic) -> Option<Factored> {
    if quadratic.c != 0.0 {
        return None;
    }

    let (divisor, reduced) = quadratic.reduced()?;
    let inner = Node::parens(Node::add(vec![
        reduced.term(reduced.a, None),
        Node::Number(reduced.b),
    ]));
    let new_node = Node::implicit_mul(vec![quadratic.term(divisor, None), inner]);
    Some((ChangeType::FactorSymbol, new_node, Vec::new()))
}

/// `4x^2 - 9 = (2x + 3) * (2x - 3)`
/// `2x^2 - 8 = 2 * (x + 2) * (x - 2)`
fn factor_difference_of_squares(quadratic: &Quadratic) -> Option<Factored> {
    if quadratic.b != 0.0 || quadratic.c >= 0.0 {
        return None;
    }

    let (divisor, reduced) = quadratic.reduced()?;
    let a = perfect_square_root(reduced.a)?;
    let c = perfect_square_root(-reduced.c)?;
    let factored = Node::mul(vec![reduced.linear(a, c), reduced.linear(a, -c)]);
    Some((ChangeType::FactorDifferenceOfSquares, with_leading_factor(divisor, &factored), Vec::new()))
}

/// `x^2 + 2x + 1 = (x + 1)^2`
/// `2x^2 + 4x + 2 = 2 * (x + 1)^2`
fn factor_perfect_square(quadratic: &Quadratic) -> Option<Factored> {
    if quadratic.b == 0.0 || quadratic.c <= 0.0 {
        return None;
    }

    let (divisor, reduced) = quadratic.reduced()?;
    let a = perfect_square_root(reduced.a)?;
    let c = perfect_square_root(reduced.c)?;
    let c = if reduced.b == 2.0 * a * c {
        c
    } else if reduced.b == -2.0 * a * c {
        -c
    } else {
        return None;
    };

    let squared = Node::pow(reduced.linear(a, c), Node::Number(2.0));
    Some((ChangeType::FactorPerfectSquare, with_leading_factor(divisor, &squared), Vec::new()))
}

/// `a x^2 + b x + c = (v x + w) * (u x + k)`, by finding `p` and `q` with `p * q = a * c` and
/// `p + q = b`. A common divisor of the coefficients is factored out first.
///
/// With `a = 1` the factors are written down directly. Otherwise the middle term is split into
/// `p x + q x` and each half is factored, which is recorded as substeps.
fn factor_sum_product_rule(quadratic: &Quadratic) -> Option<Factored> {
    if quadratic.c == 0.0 {
        return None;
    }

    let (divisor, quadratic) = quadratic.reduced()?;
    let (p, q) = factor_pairs(quadratic.a * quadratic.c)
        .into_iter()
        .find(|(p, q)| p + q == quadratic.b)?;

    // a x^2 + p x = u x (v x + w), and q x + c = k (v x + w)
    let u = gcd(quadratic.a, p)?;
    let (v, w) = (quadratic.a / u, p / u);
    let k = q / v;

    let new_node = Node::mul(vec![quadratic.linear(v, w), quadratic.linear(u, k)]);
    if quadratic.a == 1.0 {
        let new_node = with_leading_factor(divisor, &new_node);
        return Some((ChangeType::FactorSumProductRule, new_node, Vec::new()));
    }

    let squared = quadratic.term(quadratic.a, Some(2.0));
    let broken_up = Node::add(vec![
        squared.clone(),
        quadratic.term(p, None),
        quadratic.term(q, None),
        Node::Number(quadratic.c),
    ]);
    let collected = Node::add(vec![
        Node::parens(Node::add(vec![squared, quadratic.term(p, None)])),
        Node::parens(Node::add(vec![quadratic.term(q, None), Node::Number(quadratic.c)])),
    ]);
    let common = quadratic.linear(v, w);
    let second_half = if k == 1.0 {
        common.clone()
    } else {
        Node::implicit_mul(vec![Node::Number(k), common.clone()])
    };
    let symbol_factored = Node::add(vec![
        Node::implicit_mul(vec![quadratic.term(u, None), common]),
        second_half,
    ]);

    let old_node = quadratic.to_node();
    let substeps = vec![
        Status::node_changed(ChangeType::BreakUpTerm, old_node, broken_up.clone()),
        Status::node_changed(ChangeType::CollectLikeTerms, broken_up, collected.clone()),
        Status::node_changed(ChangeType::FactorSymbol, collected, symbol_factored.clone()),
        Status::node_changed(ChangeType::FactorSumProductRule, symbol_factored, new_node.clone()),
    ];
    let leading = |node: &Node| with_leading_factor(divisor, node);
    let substeps = substeps.into_iter().map(|substep| substep.map_nodes(&leading)).collect();
    Some((ChangeType::FactorSumProductRule, leading(&new_node), substeps))
}

/// Multiplies a factored node by a constant, written as its leading factor. A product that
/// already leads with a number absorbs the constant into it.
fn with_leading_factor(factor: f64, node: &Node) -> Node {
    if factor == 1.0 {
        return node.clone();
    }

    match node {
        Node::Operator { op: Op::Mul, args, implicit: false } => {
            let mut factors = args.clone();
            match factors.first_mut() {
                Some(Node::Number(value)) => *value *= factor,
                _ => factors.insert(0, Node::Number(factor)),
            }
            Node::mul(factors)
        },
        _ => Node::mul(vec![Node::Number(factor), node.clone()]),
    }
}

/// Factors the node if it is a quadratic. A negative leading coefficient is factored out as `-1`
/// first.
pub fn factor_quadratic(node: &Node) -> Status {
    let Some(quadratic) = Quadratic::parse(node) else {
        return Status::no_change(node.clone());
    };

    let negative = quadratic.a < 0.0;
    let positive = if negative { quadratic.negated() } else { quadratic };
    let factored = factor_symbol(&positive)
        .or_else(|| factor_difference_of_squares(&positive))
        .or_else(|| factor_perfect_square(&positive))
        .or_else(|| factor_sum_product_rule(&positive));

    match factored {
        Some((change_type, new_node, substeps)) if negative => {
            let substeps = substeps.into_iter()
                .map(|substep| substep.map_nodes(&|node: &Node| with_leading_factor(-1.0, node)))
                .collect();
            Status::with_substeps(change_type, node.clone(), with_leading_factor(-1.0, &new_node), substeps)
        },
        Some((change_type, new_node, substeps)) => {
            Status::with_substeps(change_type, node.clone(), new_node, substeps)
        },
        None => Status::no_change(node.clone()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{node::tests::parse_node, simplify::normalize::normalize};
    use super::*;

    fn factor(source: &str) -> Status {
        factor_quadratic(&normalize(&parse_node(source)))
    }

    #[test]
    fn reads_quadratics() {
        let quadratic = Quadratic::parse(&normalize(&parse_node("x^2 - 3x + 2"))).unwrap();
        assert_eq!((quadratic.a, quadratic.b, quadratic.c), (1.0, -3.0, 2.0));
        assert_eq!(quadratic.symbol, Node::symbol("x"));

        for source in ["x + 2", "x^2 + y", "x^3 + x", "x^2 + x^2", "1/2 x^2 + 1", "x^2 + y^2"] {
            assert_eq!(Quadratic::parse(&normalize(&parse_node(source))), None, "{}", source);
        }
    }

    #[test]
    fn symbol() {
        let status = factor("x^2 + 2x");
        assert_eq!(status.change_type, ChangeType::FactorSymbol);
        assert_eq!(status.new_node.to_string(), "x (x + 2)");
    }

    #[test]
    fn difference_of_squares() {
        let status = factor("4x^2 - 9");
        assert_eq!(status.change_type, ChangeType::FactorDifferenceOfSquares);
        assert_eq!(status.new_node.to_string(), "(2x + 3) * (2x - 3)");
    }

    #[test]
    fn perfect_square() {
        assert_eq!(factor("x^2 + 2x + 1").new_node.to_string(), "(x + 1)^2");

        let status = factor("x^2 - 2x + 1");
        assert_eq!(status.change_type, ChangeType::FactorPerfectSquare);
        assert_eq!(status.new_node.to_string(), "(x - 1)^2");
    }

    #[test]
    fn sum_product() {
        let status = factor("x^2 + 3x + 2");
        assert_eq!(status.change_type, ChangeType::FactorSumProductRule);
        assert_eq!(status.new_node.to_string(), "(x + 1) * (x + 2)");
        assert!(status.substeps.is_empty());
    }

    #[test]
    fn sum_product_with_leading_coefficient() {
        let status = factor("2x^2 + 5x + 2");
        assert_eq!(status.new_node.to_string(), "(2x + 1) * (x + 2)");

        let substeps = status.substeps.iter()
            .map(|substep| (substep.change_type, substep.new_node.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(substeps, vec![
            (ChangeType::BreakUpTerm, "2x^2 + x + 4x + 2".to_string()),
            (ChangeType::CollectLikeTerms, "(2x^2 + x) + (4x + 2)".to_string()),
            (ChangeType::FactorSymbol, "x (2x + 1) + 2(2x + 1)".to_string()),
            (ChangeType::FactorSumProductRule, "(2x + 1) * (x + 2)".to_string()),
        ]);
    }

    #[test]
    fn negative_leading_coefficient() {
        let status = factor("-x^2 - 3x - 2");
        assert_eq!(status.change_type, ChangeType::FactorSumProductRule);
        assert_eq!(status.new_node.to_string(), "-1 * (x + 1) * (x + 2)");
    }

    #[test]
    fn common_divisor_is_factored_out() {
        let cases = [
            ("4x^2 + 6x", ChangeType::FactorSymbol, "2x (2x + 3)"),
            ("2x^2 - 8", ChangeType::FactorDifferenceOfSquares, "2 * (x + 2) * (x - 2)"),
            ("3x^2 - 27", ChangeType::FactorDifferenceOfSquares, "3 * (x + 3) * (x - 3)"),
            ("2x^2 + 4x + 2", ChangeType::FactorPerfectSquare, "2 * (x + 1)^2"),
            ("2x^2 + 6x + 4", ChangeType::FactorSumProductRule, "2 * (x + 1) * (x + 2)"),
            ("-2x^2 - 4x - 2", ChangeType::FactorPerfectSquare, "-2 * (x + 1)^2"),
        ];
        for (source, change_type, factored) in cases {
            let status = factor(source);
            assert_eq!((status.change_type, status.new_node.to_string()), (change_type, factored.to_string()), "{}", source);
        }
    }

    #[test]
    fn common_divisor_leads_every_substep() {
        let status = factor("4x^2 + 10x + 4");
        assert_eq!(status.new_node.to_string(), "2 * (2x + 1) * (x + 2)");
        assert_eq!(
            status.substeps.first().map(|substep| substep.new_node.to_string()),
            Some("2 * (2x^2 + x + 4x + 2)".to_string()),
        );
    }

    #[test]
    fn large_coefficients_are_left_alone() {
        assert!(!factor("1000000000000x^2 + x + 1000000").has_changed());
    }

    #[test]
    fn irreducible() {
        assert!(!factor("x^2 + x + 1").has_changed());
        assert!(!factor("x + 1").has_changed());
    }
}
