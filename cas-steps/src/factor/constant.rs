//! Integer factorization helpers.

use rug::Integer;
use crate::primitive::int_from_f64;

/// The largest magnitude that is factored. Trial division up to the square root of this bound
/// stays cheap; larger values are treated as having no known factors.
pub const MAX_FACTOR_MAGNITUDE: f64 = 1e10;

/// Converts the value to a positive integer within [`MAX_FACTOR_MAGNITUDE`].
fn factorable(value: f64) -> Option<Integer> {
    if value.abs() > MAX_FACTOR_MAGNITUDE {
        return None;
    }
    int_from_f64(value.abs()).filter(|n| *n != 0)
}

/// Returns the prime factors of an integral value in ascending order, with repetition.
///
/// Values below 2, values that are not integral, and values above [`MAX_FACTOR_MAGNITUDE`] have no
/// prime factors.
pub fn prime_factors(value: f64) -> Vec<f64> {
    if value < 2.0 {
        return Vec::new();
    }
    let Some(mut n) = factorable(value) else {
        return Vec::new();
    };

    let mut factors = Vec::new();
    let mut divisor = Integer::from(2);
    while Integer::from(&divisor * &divisor) <= n {
        while n.is_divisible(&divisor) {
            n /= &divisor;
            factors.push(divisor.to_f64());
        }
        divisor += 1;
    }
    if n > 1 {
        factors.push(n.to_f64());
    }
    factors
}

/// Returns every pair of integers whose product is the value, including negative pairs, ordered
/// by the first element. Values above [`MAX_FACTOR_MAGNITUDE`] have no pairs.
///
/// `factor_pairs(6)` is `[(-6, -1), (-3, -2), (-2, -3), (-1, -6), (1, 6), (2, 3), (3, 2), (6, 1)]`.
pub fn factor_pairs(value: f64) -> Vec<(f64, f64)> {
    let Some(n) = factorable(value) else {
        return Vec::new();
    };

    // divisors up to the square root, each with its cofactor
    let mut positive = Vec::new();
    let mut divisor = Integer::from(1);
    while Integer::from(&divisor * &divisor) <= n {
        if n.is_divisible(&divisor) {
            let quotient = Integer::from(&n / &divisor);
            positive.push((divisor.to_f64(), quotient.to_f64()));
            if quotient != divisor {
                positive.push((quotient.to_f64(), divisor.to_f64()));
            }
        }
        divisor += 1;
    }

    let sign = value.signum();
    let mut pairs = positive.iter()
        .map(|&(a, b)| (-a, -b * sign))
        .chain(positive.iter().map(|&(a, b)| (a, b * sign)))
        .collect::<Vec<_>>();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    pairs
}
