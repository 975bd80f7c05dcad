//! Addition of constant fractions, and of a constant and a fraction.

use crate::{
    change_type::ChangeType,
    node::{Node, Op},
    primitive::{is_integral, lcm},
    simplify::arithmetic::{self, round_decimal},
    status::Status,
};
use super::gcd::divide_by_gcd;

/// Returns the numerator and denominator of every argument, if all of them are integer fractions
/// with positive denominators.
fn positive_integer_fractions(args: &[Node]) -> Option<Vec<(f64, f64)>> {
    args.iter()
        .map(|arg| {
            let (numerator, denominator) = arg.as_fraction()?;
            (is_integral(numerator) && is_integral(denominator) && denominator > 0.0)
                .then_some((numerator, denominator))
        })
        .collect()
}

/// `1/2 + 1/3 = 3/6 + 2/6 = 5/6`
///
/// Every argument of the sum must be an integer fraction with a positive denominator.
pub fn add_constant_fractions(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Add, args, .. } = node else {
        return None;
    };
    let fractions = positive_integer_fractions(args)?;

    let mut substeps = Vec::new();
    let mut current = node.clone();
    let common = fractions.iter().try_fold(1.0, |acc, &(_, denominator)| lcm(acc, denominator))?;
    let mut numerators = fractions.iter().map(|&(numerator, _)| Node::Number(numerator)).collect::<Vec<_>>();

    if fractions.iter().any(|&(_, denominator)| denominator != common) {
        let multipliers = fractions.iter().map(|&(_, denominator)| common / denominator).collect::<Vec<_>>();

        // (n * m) / (d * m)
        let expanded = Node::add(
            fractions.iter()
                .zip(&multipliers)
                .map(|(&(numerator, denominator), &multiplier)| {
                    if multiplier == 1.0 {
                        Node::div(Node::Number(numerator), Node::Number(denominator))
                    } else {
                        Node::div(
                            Node::parens(Node::mul(vec![Node::Number(numerator), Node::Number(multiplier)])),
                            Node::parens(Node::mul(vec![Node::Number(denominator), Node::Number(multiplier)])),
                        )
                    }
                })
                .collect(),
        );
        substeps.push(Status::node_changed(ChangeType::CommonDenominator, current, expanded.clone()));
        current = expanded;

        // (n * m) / d'
        let denominators_done = Node::add(
            fractions.iter()
                .zip(&multipliers)
                .map(|(&(numerator, _), &multiplier)| {
                    let numerator = if multiplier == 1.0 {
                        Node::Number(numerator)
                    } else {
                        Node::parens(Node::mul(vec![Node::Number(numerator), Node::Number(multiplier)]))
                    };
                    Node::div(numerator, Node::Number(common))
                })
                .collect(),
        );
        substeps.push(Status::node_changed(ChangeType::MultiplyDenominators, current, denominators_done.clone()));
        current = denominators_done;

        numerators = fractions.iter()
            .zip(&multipliers)
            .map(|(&(numerator, _), &multiplier)| Node::Number(numerator * multiplier))
            .collect();
        let numerators_done = Node::add(
            numerators.iter().map(|numerator| Node::div(numerator.clone(), Node::Number(common))).collect(),
        );
        substeps.push(Status::node_changed(ChangeType::MultiplyNumerators, current, numerators_done.clone()));
        current = numerators_done;
    }

    // (n1 + n2) / d
    let sum = Node::add(numerators);
    let combined = Node::div(Node::parens(sum.clone()), Node::Number(common));
    substeps.push(Status::node_changed(ChangeType::AddNumerators, current, combined.clone()));
    current = combined;

    let total = sum.evaluate()?;
    let evaluated = Node::div(Node::Number(total), Node::Number(common));
    substeps.push(Status::node_changed(ChangeType::SimplifyArithmetic, current, evaluated.clone()));
    current = evaluated;

    if total == 0.0 {
        substeps.push(Status::node_changed(ChangeType::ReduceZeroNumerator, current, Node::Number(0.0)));
        current = Node::Number(0.0);
    } else if let Some(reduced) = divide_by_gcd(&current) {
        current = reduced.new_node.clone();
        substeps.push(reduced);
    }

    Some(Status::with_substeps(ChangeType::AddFractions, node.clone(), current, substeps))
}

/// `2 + 1/3 = 6/3 + 1/3 = 7/3`
/// `0.5 + 1/4 = 0.5 + 0.25 = 0.75`
///
/// An integer is converted to a fraction over the same denominator and the fractions are added.
/// A decimal turns the fraction into a rounded decimal instead.
pub fn add_constant_and_fraction(node: &Node) -> Option<Status> {
    let Node::Operator { op: Op::Add, args, .. } = node else {
        return None;
    };
    let [first, second] = args.as_slice() else {
        return None;
    };

    let (constant_index, constant, fraction_index, (numerator, denominator)) =
        match (first.as_number(), second.as_fraction(), first.as_fraction(), second.as_number()) {
            (Some(constant), Some(fraction), _, _) => (0, constant, 1, fraction),
            (_, _, Some(fraction), Some(constant)) => (1, constant, 0, fraction),
            _ => return None,
        };
    if denominator == 0.0 {
        return None;
    }

    let mut substeps = Vec::new();
    let new_node = if is_integral(constant) && is_integral(numerator) && is_integral(denominator) && denominator > 0.0 {
        let mut converted = args.clone();
        converted[constant_index] = Node::div(Node::Number(constant * denominator), Node::Number(denominator));
        let converted = Node::add(converted);
        substeps.push(Status::node_changed(ChangeType::ConvertIntegerToFraction, node.clone(), converted.clone()));

        let added = add_constant_fractions(&converted)?;
        let new_node = added.new_node.clone();
        substeps.push(added);
        new_node
    } else {
        let mut divided = args.clone();
        divided[fraction_index] = Node::Number(round_decimal(numerator / denominator));
        let divided = Node::add(divided);
        substeps.push(Status::node_changed(ChangeType::DivideFractionForAddition, node.clone(), divided.clone()));

        let evaluated = arithmetic::evaluate(&divided)?;
        let new_node = evaluated.new_node.clone();
        substeps.push(evaluated);
        new_node
    };

    Some(Status::with_substeps(ChangeType::SimplifyArithmetic, node.clone(), new_node, substeps))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::node::tests::parse_node;
    use super::*;

    fn change_types(status: &Status) -> Vec<ChangeType> {
        status.substeps.iter().map(|substep| substep.change_type).collect()
    }

    #[test]
    fn same_denominator() {
        let status = add_constant_fractions(&parse_node("1/5 + 2/5")).unwrap();
        assert_eq!(status.change_type, ChangeType::AddFractions);
        assert_eq!(status.new_node.to_string(), "3/5");
        assert_eq!(change_types(&status), vec![ChangeType::AddNumerators, ChangeType::SimplifyArithmetic]);
    }

    #[test]
    fn different_denominators() {
        let status = add_constant_fractions(&parse_node("1/2 + 1/3")).unwrap();
        assert_eq!(status.new_node.to_string(), "5/6");
        assert_eq!(change_types(&status), vec![
            ChangeType::CommonDenominator,
            ChangeType::MultiplyDenominators,
            ChangeType::MultiplyNumerators,
            ChangeType::AddNumerators,
            ChangeType::SimplifyArithmetic,
        ]);
        assert_eq!(status.substeps[0].new_node.to_string(), "(1 * 3) / (2 * 3) + (1 * 2) / (3 * 2)");
        assert_eq!(status.substeps[3].new_node.to_string(), "(3 + 2) / 6");
    }

    #[test]
    fn reduces_the_sum() {
        let status = add_constant_fractions(&parse_node("1/4 + 1/4")).unwrap();
        assert_eq!(status.new_node.to_string(), "1/2");
        assert_eq!(status.substeps.last().map(|s| s.change_type), Some(ChangeType::SimplifyFraction));
    }

    #[test]
    fn zero_sum() {
        let node = Node::add(vec![
            Node::div(Node::Number(1.0), Node::Number(3.0)),
            Node::div(Node::Number(-1.0), Node::Number(3.0)),
        ]);
        let status = add_constant_fractions(&node).unwrap();
        assert_eq!(status.new_node, Node::Number(0.0));
        assert_eq!(status.substeps.last().map(|s| s.change_type), Some(ChangeType::ReduceZeroNumerator));
    }

    #[test]
    fn integer_and_fraction() {
        let status = add_constant_and_fraction(&parse_node("2 + 1/3")).unwrap();
        assert_eq!(status.change_type, ChangeType::SimplifyArithmetic);
        assert_eq!(status.new_node.to_string(), "7/3");
        assert_eq!(status.substeps[0].change_type, ChangeType::ConvertIntegerToFraction);
        assert_eq!(status.substeps[0].new_node.to_string(), "6/3 + 1/3");
        assert_eq!(status.substeps[1].change_type, ChangeType::AddFractions);
    }

    #[test]
    fn decimal_and_fraction() {
        let status = add_constant_and_fraction(&parse_node("0.5 + 1/4")).unwrap();
        assert_eq!(status.new_node.to_string(), "0.75");
        assert_eq!(status.substeps[0].change_type, ChangeType::DivideFractionForAddition);
        assert_eq!(status.substeps[0].new_node.to_string(), "0.5 + 0.25");
    }
}
