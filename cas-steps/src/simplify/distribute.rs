//! Distribution over sums, and expansion of powers.

use once_cell::sync::Lazy;
use crate::{
    change_type::ChangeType,
    node::{negative::{is_negative, negate}, Node, Op},
    primitive::to_u32,
    status::Status,
    tree_search,
};

/// Highest power of a binomial that is expanded with binomial coefficients.
const MAX_BINOMIAL_POWER: usize = 10;

/// Highest power of a longer sum that is expanded by repeated multiplication.
const MAX_REPEATED_POWER: usize = 4;

/// Rows of Pascal's triangle, up to [`MAX_BINOMIAL_POWER`].
static PASCAL: Lazy<Vec<Vec<f64>>> = Lazy::new(|| {
    let mut rows: Vec<Vec<f64>> = vec![vec![1.0]];
    for n in 1..=MAX_BINOMIAL_POWER {
        let previous = &rows[n - 1];
        let row = (0..=n)
            .map(|k| match k {
                0 => 1.0,
                k if k == n => 1.0,
                k => previous[k - 1] + previous[k],
            })
            .collect();
        rows.push(row);
    }
    rows
});

/// Returns the terms of the node if it is a sum, looking through parentheses.
fn sum_terms(node: &Node) -> Option<&[Node]> {
    match node.unparenthesized() {
        Node::Operator { op: Op::Add, args, .. } => Some(args),
        _ => None,
    }
}

fn has_parens(node: &Node) -> bool {
    match node {
        Node::Parens(_) => true,
        _ => node.children().into_iter().any(has_parens),
    }
}

/// `-(x + 2) = (-x - 2)`
fn distribute_negative_one(node: &Node) -> Option<Status> {
    let Node::UnaryMinus(operand) = node else {
        return None;
    };
    let terms = sum_terms(operand)?;
    let new_node = Node::parens(Node::add(terms.iter().map(negate).collect()));
    Some(Status::node_changed(ChangeType::DistributeNegativeOne, node.clone(), new_node))
}

/// `(2x)^2 = 2^2 * x^2`
fn distribute_exponent(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Pow, args, .. } = node else {
        return None;
    };
    let (Node::Operator { op: Op::Mul, args: factors, .. }, Node::Number(exponent)) = (args[0].unparenthesized(), &args[1]) else {
        return None;
    };

    let powers = factors.iter()
        .map(|factor| match factor {
            // `(x^2)^3` is written as `x^6` directly
            Node::Operator { op: Op::Pow, args: inner, .. } => match inner[1].as_number() {
                Some(inner_exponent) => Node::pow(inner[0].clone(), Node::Number(inner_exponent * exponent)),
                None => Node::pow(factor.clone(), Node::Number(*exponent)),
            },
            factor => Node::pow(factor.clone(), Node::Number(*exponent)),
        })
        .collect();
    let new_node = Node::mul(powers);
    Some(Status::node_changed(ChangeType::DistributeExponent, node.clone(), new_node))
}

/// Returns `base^exponent`, or [`None`] for an exponent of zero.
fn power_of(base: &Node, exponent: usize) -> Option<Node> {
    match exponent {
        0 => None,
        1 => Some(base.clone()),
        e => Some(Node::pow(base.clone(), Node::Number(e as f64))),
    }
}

/// `(x + 1)^2 = x^2 + 2 * x * 1 + 1^2`
/// `(x + y + 1)^2 = (x + y + 1) * (x + y + 1)`
fn expand_exponent(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Pow, args, .. } = node else {
        return None;
    };
    let terms = sum_terms(&args[0])?;
    let power = to_u32(args[1].as_number()?)? as usize;
    if power < 2 {
        return None;
    }

    let new_node = match terms {
        [a, b] if power <= MAX_BINOMIAL_POWER => {
            // a negative second term flips the sign of every odd coefficient
            let (b, sign) = if is_negative(b) { (negate(b), -1.0_f64) } else { (b.clone(), 1.0) };
            let expanded = PASCAL[power]
                .iter()
                .enumerate()
                .map(|(k, coefficient)| {
                    let coefficient = coefficient * sign.powi(k as i32);
                    let factors = [
                        (coefficient != 1.0).then_some(Node::Number(coefficient)),
                        power_of(a, power - k),
                        power_of(&b, k),
                    ];
                    Node::mul(factors.into_iter().flatten().collect())
                })
                .collect();
            Node::add(expanded)
        },
        _ if power <= MAX_REPEATED_POWER => {
            Node::mul(vec![Node::parens(Node::add(terms.to_vec())); power])
        },
        _ => return None,
    };

    Some(Status::node_changed(ChangeType::ExpandExponent, node.clone(), new_node))
}

/// Multiplies `left` into every term of `right`, or every term of `left` into `right`.
fn distribute_pair(left: &Node, right: &Node) -> Option<Node> {
    let products = if let Some(terms) = sum_terms(left) {
        terms.iter().map(|term| Node::mul(vec![term.clone(), right.clone()])).collect()
    } else {
        sum_terms(right)?
            .iter()
            .map(|term| Node::mul(vec![left.clone(), term.clone()]))
            .collect()
    };
    Some(Node::add(products))
}

/// `2 * (x + 3) = 2 * x + 2 * 3 = 2x + 6`
///
/// The first sum in the product is multiplied with its left neighbor, or its right neighbor if
/// it comes first. Products of plain terms are then simplified, as a substep.
fn distribute(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Mul, args, implicit } = node else {
        return None;
    };
    let position = args.iter().position(|arg| sum_terms(arg).is_some())?;
    let start = position.saturating_sub(1);
    let distributed = distribute_pair(&args[start], args.get(start + 1)?)?;

    let simplified = Node::add(distributed.args()
        .iter()
        .map(|term| match term {
            Node::Operator { op: Op::Mul, .. } if !has_parens(term) => super::simplify(term),
            term => term.clone(),
        })
        .collect());

    let embed = |sum: Node| {
        if args.len() == 2 {
            return sum;
        }
        let mut new_args = args.clone();
        new_args.remove(start + 1);
        new_args[start] = Node::parens(sum);
        Node::operator_with(Op::Mul, new_args, *implicit)
    };

    if simplified == distributed {
        return Some(Status::node_changed(ChangeType::Distribute, node.clone(), embed(distributed)));
    }

    let distributed = embed(distributed);
    let simplified = embed(simplified);
    let substeps = vec![
        Status::node_changed(ChangeType::Distribute, node.clone(), distributed.clone()),
        Status::node_changed(ChangeType::SimplifyTerms, distributed, simplified.clone()),
    ];
    Some(Status::with_substeps(ChangeType::Distribute, node.clone(), simplified, substeps))
}

/// Applies the first distribution rule that matches the node.
pub fn simplify(node: &Node) -> Status {
    distribute_negative_one(node)
        .or_else(|| distribute_exponent(node))
        .or_else(|| expand_exponent(node))
        .or_else(|| distribute(node))
        .unwrap_or_else(|| Status::no_change(node.clone()))
}

/// Distributes at the first opportunity, searching from the root.
pub fn search(node: &Node) -> Status {
    tree_search::pre_order(&simplify, node)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{node::tests::parse_node, simplify::normalize::normalize};
    use super::*;

    fn step(source: &str) -> (ChangeType, String) {
        let status = search(&normalize(&parse_node(source)));
        (status.change_type, status.new_node.to_string())
    }

    #[test]
    fn pascal_rows() {
        assert_eq!(PASCAL[4], vec![1.0, 4.0, 6.0, 4.0, 1.0]);
    }

    #[test]
    fn negative_one() {
        assert_eq!(step("-(x + 2)"), (ChangeType::DistributeNegativeOne, "(-x - 2)".to_string()));
    }

    #[test]
    fn distributes_and_simplifies_terms() {
        let status = search(&normalize(&parse_node("2(x + 3)")));
        assert_eq!(status.change_type, ChangeType::Distribute);
        assert_eq!(status.new_node.to_string(), "2x + 6");

        let substeps = status.substeps
            .iter()
            .map(|substep| (substep.change_type, substep.new_node.to_string()))
            .collect::<Vec<_>>();
        assert_eq!(substeps, vec![
            (ChangeType::Distribute, "2 * x + 2 * 3".to_string()),
            (ChangeType::SimplifyTerms, "2x + 6".to_string()),
        ]);
    }

    #[test]
    fn distributes_sums() {
        assert_eq!(
            step("(x + 1)(x + 2)"),
            (ChangeType::Distribute, "x * (x + 2) + 1 * (x + 2)".to_string()),
        );
    }

    #[test]
    fn binomial_expansion() {
        assert_eq!(step("(x + 1)^2"), (ChangeType::ExpandExponent, "x^2 + 2 * x * 1 + 1^2".to_string()));
        assert_eq!(step("(x - 2)^2"), (ChangeType::ExpandExponent, "x^2 - 2 * x * 2 + 2^2".to_string()));
    }

    #[test]
    fn negative_binomial_alternates_signs() {
        assert_eq!(
            step("(x - 1)^3"),
            (ChangeType::ExpandExponent, "x^3 - 3 * x^2 * 1 + 3 * x * 1^2 - 1 * 1^3".to_string()),
        );
    }

    #[test]
    fn repeated_multiplication() {
        assert_eq!(
            step("(x + y + 1)^2"),
            (ChangeType::ExpandExponent, "(x + y + 1) * (x + y + 1)".to_string()),
        );
    }

    #[test]
    fn power_of_a_product() {
        assert_eq!(step("(2x)^2"), (ChangeType::DistributeExponent, "2^2 * x^2".to_string()));
    }
}
