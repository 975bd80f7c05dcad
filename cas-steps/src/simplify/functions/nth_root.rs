//! Simplification of `nthRoot(radicand, root)`. An omitted root is a square root.
//!
//! ```text
//! nthRoot(72)
//! nthRoot(2 * 2 * 2 * 3 * 3, 2)              FACTOR_INTO_PRIMES
//! nthRoot((2 * 2) * 2 * (3 * 3), 2)          GROUP_TERMS
//! nthRoot(2^2 * 2 * 3^2, 2)                  CONVERT_MULTIPLICATION_TO_EXPONENT
//! nthRoot(2^2, 2) * nthRoot(2, 2) * nthRoot(3^2, 2)    DISTRIBUTE_NTH_ROOT
//! 2 * nthRoot(2, 2) * 3                      EVALUATE_DISTRIBUTED_NTH_ROOT
//! 2 * 3 * nthRoot(2, 2)                      COMBINE_UNDER_ROOT
//! ```
//!
//! Negative radicands are left alone.

use crate::{
    change_type::ChangeType,
    factor::constant::prime_factors,
    node::{Node, Op},
    primitive::{exact_root, to_u32},
    status::Status,
};

/// Splits the node into its radicand and root, if it is an nth root.
fn parts(node: &Node) -> Option<(&Node, Node)> {
    match node {
        Node::Function { name, args } if name == "nthRoot" => match args.as_slice() {
            [radicand] => Some((radicand, Node::Number(2.0))),
            [radicand, root] => Some((radicand, root.clone())),
            _ => None,
        },
        _ => None,
    }
}

/// `nthRoot(x^2, 2) = x`
/// `nthRoot(x^4, 2) = x^2`
/// `nthRoot(x^2, 4) = nthRoot(x, 2)`
fn nth_root_exponent(node: &Node, radicand: &Node, root: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Pow, args, .. } = radicand.unparenthesized() else {
        return None;
    };
    let (base, exponent) = (&args[0], &args[1]);

    if exponent == root {
        return Some(Status::node_changed(ChangeType::CancelExponentAndRoot, node.clone(), base.clone()));
    }

    let (exponent, root) = (to_u32(exponent.as_number()?)?, to_u32(root.as_number()?)?);
    if exponent % root == 0 {
        let new_node = Node::pow(base.clone(), Node::Number(f64::from(exponent / root)));
        Some(Status::node_changed(ChangeType::CancelRoot, node.clone(), new_node))
    } else if root % exponent == 0 {
        let new_node = Node::nth_root(base.clone(), Node::Number(f64::from(root / exponent)));
        Some(Status::node_changed(ChangeType::CancelExponent, node.clone(), new_node))
    } else {
        None
    }
}

/// `nthRoot(36) = 6`, or, for a radicand that is not a perfect power, the product of its prime
/// factors is simplified instead.
fn nth_root_constant(node: &Node, value: f64, root: u32) -> Option<Status> {
    if value < 0.0 {
        return None;
    }
    if let Some(result) = exact_root(value, root) {
        return Some(Status::node_changed(ChangeType::NthRootValue, node.clone(), Node::Number(result)));
    }

    let primes = prime_factors(value);
    if primes.len() < 2 {
        return None;
    }
    let factored = Node::nth_root(
        Node::mul(primes.into_iter().map(Node::Number).collect()),
        Node::Number(f64::from(root)),
    );
    let multiplied = nth_root_multiplication(&factored, root)?;

    let mut substeps = vec![Status::node_changed(ChangeType::FactorIntoPrimes, node.clone(), factored)];
    substeps.extend(multiplied.substeps);
    Some(Status::with_substeps(ChangeType::NthRootValue, node.clone(), multiplied.new_node, substeps))
}

/// Groups equal factors into runs of length `root`: `2 * 2 * 2` with root 2 becomes
/// `(2 * 2) * 2`. Returns the grouped factors, and whether any full run was found.
fn group_factors(factors: &[Node], root: u32) -> (Vec<Node>, bool) {
    let mut distinct: Vec<(&Node, usize)> = Vec::new();
    for factor in factors {
        match distinct.iter_mut().find(|(seen, _)| *seen == factor) {
            Some((_, count)) => *count += 1,
            None => distinct.push((factor, 1)),
        }
    }

    let root = root as usize;
    let mut grouped = Vec::new();
    let mut any_run = false;
    for (factor, count) in distinct {
        for _ in 0..count / root {
            grouped.push(Node::parens(Node::mul(vec![factor.clone(); root])));
            any_run = true;
        }
        grouped.extend(std::iter::repeat(factor.clone()).take(count % root));
    }
    (grouped, any_run)
}

/// Simplifies the root of a product by pulling out every factor whose root can be taken.
///
/// Returns [`None`] if no factor comes out of the root, so that a root like `nthRoot(6)` is not
/// rewritten back and forth.
fn nth_root_multiplication(node: &Node, root: u32) -> Option<Status> {
    let (radicand, root_node) = parts(node)?;
    let Node::Operator { op: Op::Mul, args: factors, .. } = radicand.unparenthesized() else {
        return None;
    };
    if factors.iter().any(|factor| matches!(factor, Node::Number(v) if *v < 0.0)) {
        return None;
    }

    let mut substeps = Vec::new();
    let mut current = node.clone();
    let with_radicand = |radicand: Node| Node::nth_root(radicand, root_node.clone());

    // factor into primes
    let primes = factors.iter()
        .flat_map(|factor| match factor {
            Node::Number(value) if prime_factors(*value).len() > 1 => {
                prime_factors(*value).into_iter().map(Node::Number).collect()
            },
            factor => vec![factor.clone()],
        })
        .collect::<Vec<_>>();
    if primes.len() != factors.len() {
        let next = with_radicand(Node::mul(primes.clone()));
        substeps.push(Status::node_changed(ChangeType::FactorIntoPrimes, current, next.clone()));
        current = next;
    }

    // group into runs, and write each run as a power
    let mut radicand_factors = primes;
    let (grouped, any_run) = group_factors(&radicand_factors, root);
    if any_run {
        let next = with_radicand(Node::mul(grouped.clone()));
        substeps.push(Status::node_changed(ChangeType::GroupTerms, current, next.clone()));
        current = next;

        radicand_factors = grouped.into_iter()
            .map(|factor| match factor {
                Node::Parens(run) => Node::pow(run.args()[0].clone(), root_node.clone()),
                factor => factor,
            })
            .collect();
        let next = with_radicand(Node::mul(radicand_factors.clone()));
        substeps.push(Status::node_changed(ChangeType::ConvertMultiplicationToExponent, current, next.clone()));
        current = next;

        if let [single] = radicand_factors.as_slice() {
            let cancelled = nth_root_exponent(&current, single, &root_node)?;
            let new_node = cancelled.new_node.clone();
            substeps.push(cancelled);
            return Some(Status::with_substeps(ChangeType::NthRootValue, node.clone(), new_node, substeps));
        }
    }

    // distribute the root over the factors, and take each root that can be taken
    let distributed = radicand_factors.iter()
        .map(|factor| with_radicand(factor.clone()))
        .collect::<Vec<_>>();
    let evaluated = distributed.iter()
        .map(|root_of_factor| evaluate_root(root_of_factor, root))
        .collect::<Vec<_>>();
    if evaluated.iter().all(Option::is_none) {
        return None;
    }

    let next = Node::mul(distributed.clone());
    substeps.push(Status::node_changed(ChangeType::DistributeNthRoot, current, next.clone()));
    current = next;

    let values = distributed.into_iter()
        .zip(evaluated)
        .map(|(root_of_factor, evaluated)| evaluated.unwrap_or(root_of_factor))
        .collect::<Vec<_>>();
    let next = Node::mul(values.clone());
    substeps.push(Status::node_changed(ChangeType::EvaluateDistributedNthRoot, current, next.clone()));
    current = next;

    // factors still under a root go last, under a single root
    let (roots, mut outside): (Vec<_>, Vec<_>) = values.into_iter().partition(Node::is_nth_root);
    match roots.len() {
        0 => {},
        1 => outside.extend(roots),
        _ => {
            let radicands = roots.iter().map(|remaining| remaining.args()[0].clone()).collect();
            outside.push(with_radicand(Node::mul(radicands)));
        },
    }
    let combined = Node::mul(outside);
    if combined != current {
        substeps.push(Status::node_changed(ChangeType::CombineUnderRoot, current, combined.clone()));
        current = combined;
    }

    Some(Status::with_substeps(ChangeType::NthRootValue, node.clone(), current, substeps))
}

/// Takes the root of a single distributed factor, if it comes out of the root.
fn evaluate_root(node: &Node, root: u32) -> Option<Node> {
    let (radicand, root_node) = parts(node)?;
    match radicand {
        Node::Number(value) => exact_root(*value, root).map(Node::Number),
        _ => nth_root_exponent(node, radicand, &root_node).map(|status| status.new_node),
    }
}

/// Simplifies an nth root, depending on the shape of its radicand.
pub fn nth_root(node: &Node) -> Option<Status> {
    let (radicand, root_node) = parts(node)?;
    if let Some(status) = nth_root_exponent(node, radicand, &root_node) {
        return Some(status);
    }

    let root = to_u32(root_node.as_number()?)?;
    match radicand.unparenthesized() {
        Node::Number(value) => nth_root_constant(node, *value, root),
        Node::Operator { op: Op::Mul, .. } => nth_root_multiplication(node, root),
        _ => None,
    }
}
