//! Collection and combination of like terms in sums and products.
//!
//! Collecting groups the terms that can be combined, in parentheses, and moves them next to each
//! other:
//!
//! ```text
//! 2x + 4x^2 + 5x + 3
//! 4x^2 + (2x + 5x) + 3     COLLECT_LIKE_TERMS
//! 4x^2 + 7x + 3            ADD_POLYNOMIAL_TERMS
//! ```
//!
//! In products, coefficients are pulled out to the front and multiplied together:
//!
//! ```text
//! 2x * x^2 * 5
//! (2 * 5) * (x * x^2)      COLLECT_LIKE_TERMS
//! 10 * (x * x^2)           SIMPLIFY_ARITHMETIC
//! 10x^3                    MULTIPLY_POLYNOMIAL_TERMS
//! ```

pub mod add;
pub mod multiply;

use std::cmp::Ordering;
use crate::{
    change_type::ChangeType,
    node::{term::{CoefficientTerm, NthRootTerm, PolynomialTerm}, Node, Op},
    status::{ChangeGroups, Status},
    tree_search,
};

/// The kind of term a bucket holds. Terms in the same bucket can be combined with each other.
#[derive(Debug, Clone, PartialEq)]
enum Bucket {
    /// Powers of a symbol. In sums the exponent must also match; in products it is [`None`].
    Polynomial { symbol: String, exponent: Option<Node> },

    /// Terms with the same nth root as their base, keyed by the printed base in sums, or by the
    /// degree of the root in products.
    NthRoot(String),

    Constant,
    ConstantFraction,
    Other,
}

impl Bucket {
    /// Position of the bucket kind in a collected sum. Products put constants first instead.
    fn rank(&self, op: Op) -> u8 {
        match (self, op) {
            (Bucket::Constant, Op::Mul) => 0,
            (Bucket::Polynomial { .. }, _) => 1,
            (Bucket::NthRoot(_), _) => 2,
            (Bucket::Constant, _) => 3,
            (Bucket::ConstantFraction, _) => 4,
            (Bucket::Other, _) => 5,
        }
    }

    fn order(&self, other: &Self, op: Op) -> Ordering {
        match (self, other) {
            (
                Bucket::Polynomial { symbol: a, exponent: a_exp },
                Bucket::Polynomial { symbol: b, exponent: b_exp },
            ) => {
                let value = |exponent: &Option<Node>| {
                    exponent.as_ref().and_then(Node::evaluate).unwrap_or(f64::NEG_INFINITY)
                };
                a.cmp(b).then_with(|| value(b_exp).total_cmp(&value(a_exp)))
            },
            (Bucket::NthRoot(a), Bucket::NthRoot(b)) => a.cmp(b),
            _ => self.rank(op).cmp(&other.rank(op)),
        }
    }
}

/// Returns the bucket of a term of a sum.
fn sum_bucket(term: &Node) -> Bucket {
    if term.is_constant() {
        Bucket::Constant
    } else if term.is_constant_fraction() {
        Bucket::ConstantFraction
    } else if let Some(term) = PolynomialTerm::new(term, false) {
        Bucket::Polynomial {
            symbol: term.symbol_name().to_string(),
            exponent: Some(term.exponent_node()),
        }
    } else if let Some(term) = NthRootTerm::new(term, false) {
        Bucket::NthRoot(format!("{}^{}", term.base(), term.exponent_node()))
    } else {
        Bucket::Other
    }
}

/// Returns the pieces of a factor of a product. A coefficient is split off into the constants.
fn product_pieces(factor: &Node) -> Vec<(Bucket, Node)> {
    if factor.is_constant_or_constant_fraction() {
        return vec![(Bucket::Constant, factor.clone())];
    }

    let split = |coeff: Option<&Node>, bucket: Bucket, rest: Node| match coeff {
        Some(coeff) => vec![(Bucket::Constant, coeff.clone()), (bucket, rest)],
        None => vec![(bucket, rest)],
    };

    if let Some(term) = PolynomialTerm::new(factor, false) {
        let bucket = Bucket::Polynomial { symbol: term.symbol_name().to_string(), exponent: None };
        let rest = Node::polynomial_term(term.base().clone(), term.exponent().cloned(), None, false);
        return split(term.coeff(), bucket, rest);
    }

    // only bare roots can be multiplied together
    match NthRootTerm::new(factor, false) {
        Some(term) if term.exponent().is_none() => {
            let bucket = Bucket::NthRoot(term.root_node().to_string());
            split(term.coeff(), bucket, term.base().clone())
        },
        _ => vec![(Bucket::Other, factor.clone())],
    }
}

/// A group of like terms, and the indices of the arguments they came from.
#[derive(Debug)]
struct Group {
    bucket: Bucket,
    members: Vec<Node>,
    sources: Vec<usize>,
}

/// Sorts the arguments of a sum or product into groups of like terms, in collected order.
fn group_terms(node: &Node) -> Option<(Op, Vec<Group>)> {
    let op = node.op().filter(|op| matches!(op, Op::Add | Op::Mul))?;
    if node.args().len() < 2 {
        return None;
    }

    let mut groups: Vec<Group> = Vec::new();
    let mut push = |bucket: Bucket, member: Node, source: usize| {
        match groups.iter_mut().find(|group| group.bucket == bucket && bucket != Bucket::Other) {
            Some(group) => {
                group.members.push(member);
                group.sources.push(source);
            },
            None => groups.push(Group { bucket, members: vec![member], sources: vec![source] }),
        }
    };

    for (index, arg) in node.args().iter().enumerate() {
        match op {
            Op::Mul => product_pieces(arg)
                .into_iter()
                .for_each(|(bucket, member)| push(bucket, member, index)),
            _ => push(sum_bucket(arg), arg.clone(), index),
        }
    }

    // a lone constant and a lone fraction are added together, as in `2 + 1/3`
    if op == Op::Add {
        let single = |bucket: Bucket| {
            groups.iter().position(|group| group.bucket == bucket && group.members.len() == 1)
        };
        if let (Some(constant), Some(position)) = (single(Bucket::Constant), single(Bucket::ConstantFraction)) {
            let fraction = groups.remove(position);
            let group = &mut groups[if constant > position { constant - 1 } else { constant }];
            group.members.extend(fraction.members);
            group.sources.extend(fraction.sources);
        }
    }

    groups.sort_by(|a, b| a.bucket.order(&b.bucket, op));
    Some((op, groups))
}

/// Returns true if the sum or product has terms that can be grouped.
fn can_collect(node: &Node) -> bool {
    group_terms(node).is_some_and(|(_, groups)| {
        groups.len() > 1
            && groups.iter().any(|group| group.bucket != Bucket::Other && group.members.len() > 1)
    })
}

/// Returns true if collecting or combining would change the sum or product.
pub fn can_collect_or_combine(node: &Node) -> bool {
    let all_constant = (node.is_op(Op::Add) || node.is_op(Op::Mul))
        && node.args().iter().all(Node::is_constant_or_constant_fraction);
    can_collect(node)
        || add::can_add_like_terms(node)
        || multiply::can_multiply_like_terms(node)
        || all_constant
}

/// Groups like terms together in parentheses.
///
/// Each group of more than one term gets its own change group, covering the terms it came from in
/// the old node and the parenthesized group in the new node.
pub fn collect_like_terms(node: &Node) -> Option<Status> {
    if !can_collect(node) {
        return None;
    }
    let (op, groups) = group_terms(node)?;

    let mut change_groups = ChangeGroups::new();
    let mut next_id = 1;
    let mut args = Vec::with_capacity(groups.len());
    for (index, group) in groups.into_iter().enumerate() {
        if group.members.len() == 1 {
            args.extend(group.members);
            continue;
        }

        for source in group.sources {
            change_groups.mark_old(next_id, vec![source]);
        }
        change_groups.mark_new(next_id, vec![index]);
        next_id += 1;

        args.push(Node::parens(Node::operator(op, group.members)));
    }

    let new_node = Node::operator(op, args);
    Some(Status::with_groups(ChangeType::CollectLikeTerms, node.clone(), new_node, change_groups))
}

/// Combines each parenthesized group of a collected node, one step per group.
fn combine_like_terms(node: &Node) -> Vec<Status> {
    let mut steps = Vec::new();
    let mut current = node.clone();

    for (index, arg) in node.args().iter().enumerate() {
        let Node::Parens(content) = arg else {
            continue;
        };
        let combined = match content.op() {
            Some(Op::Add) => add::add_like_terms(content),
            Some(Op::Mul) => multiply::multiply_like_terms(content),
            _ => None,
        };

        if let Some(status) = combined {
            // the group is replaced, parentheses included
            let status = Status { old_node: Some(arg.clone()), ..status };
            let lifted = Status::child_changed(&current, status, index);
            current = lifted.new_node.clone();
            steps.push(lifted);
        }
    }

    steps
}

/// Collects like terms and then combines each group, as a single step.
pub fn collect_and_combine(node: &Node) -> Option<Status> {
    let collected = collect_like_terms(node)?;
    let combined = combine_like_terms(&collected.new_node);

    let mut new_node = combined.last()
        .map_or_else(|| collected.new_node.clone(), |step| step.new_node.clone());
    if let Node::Operator { op: Op::Mul, implicit, .. } = &mut new_node {
        *implicit = true;
    }

    let mut substeps = vec![collected];
    substeps.extend(combined);
    Some(Status::with_substeps(ChangeType::CollectAndCombineLikeTerms, node.clone(), new_node, substeps))
}

/// Collects and combines like terms, or combines them directly if they are all alike.
pub fn simplify(node: &Node) -> Status {
    match node.op() {
        Some(Op::Add) => collect_and_combine(node).or_else(|| add::add_like_polynomial_terms(node)),
        Some(Op::Mul) => collect_and_combine(node).or_else(|| multiply::multiply_like_polynomial_terms(node)),
        _ => None,
    }
    .unwrap_or_else(|| Status::no_change(node.clone()))
}

/// Collects and combines like terms in the first sum or product that allows it, deepest first.
pub fn search(node: &Node) -> Status {
    tree_search::post_order(&simplify, node)
}
