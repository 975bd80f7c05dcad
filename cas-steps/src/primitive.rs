//! Exact integer helpers backed by [`rug::Integer`].
//!
//! Node values are `f64`, but anything that must be exact (greatest common divisors, perfect
//! roots, factorizations) goes through arbitrary-precision integers.

use rug::{ops::Pow, Integer};

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Returns true if the value is finite and has no fractional part.
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Converts an integral `f64` to an [`Integer`].
pub fn int_from_f64(value: f64) -> Option<Integer> {
    if is_integral(value) {
        Integer::from_f64(value)
    } else {
        None
    }
}

/// Returns the greatest common divisor of two integral values, which is always non-negative.
pub fn gcd(a: f64, b: f64) -> Option<f64> {
    Some(int_from_f64(a)?.gcd(&int_from_f64(b)?).to_f64())
}

/// Returns the least common multiple of two integral values.
pub fn lcm(a: f64, b: f64) -> Option<f64> {
    Some(int_from_f64(a)?.lcm(&int_from_f64(b)?).to_f64())
}

/// Returns the exact integer `root`-th root of the value, if it has one.
///
/// The floating-point root is only a guess: it is rounded and then raised back to the power with
/// exact integers, and accepted only if that reproduces the value.
pub fn exact_root(value: f64, root: u32) -> Option<f64> {
    let target = int_from_f64(value)?;
    if root == 0 || target < 0 {
        return None;
    }

    let guess = value.powf(1.0 / f64::from(root)).round();
    let candidate = int_from_f64(guess)?;
    if candidate.clone().pow(root) == target {
        Some(guess)
    } else {
        None
    }
}

/// Returns the square root of the value if it is a perfect square.
pub fn perfect_square_root(value: f64) -> Option<f64> {
    exact_root(value, 2)
}

/// Converts an integral, positive `f64` to a `u32`, such as a root or exponent.
pub fn to_u32(value: f64) -> Option<u32> {
    int_from_f64(value)?.to_u32().filter(|&n| n > 0)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn gcd_and_lcm() {
        assert_eq!(gcd(12.0, 27.0), Some(3.0));
        assert_eq!(gcd(-4.0, 6.0), Some(2.0));
        assert_eq!(gcd(1.5, 3.0), None);
        assert_eq!(lcm(4.0, 6.0), Some(12.0));
    }

    #[test]
    fn exact_roots_are_verified() {
        assert_eq!(exact_root(36.0, 2), Some(6.0));
        assert_eq!(exact_root(27.0, 3), Some(3.0));
        assert_eq!(exact_root(72.0, 2), None);
        assert_eq!(exact_root(-8.0, 3), None);
        assert_eq!(exact_root(2.5, 2), None);
    }

    #[test]
    fn u32_conversion() {
        assert_eq!(to_u32(3.0), Some(3));
        assert_eq!(to_u32(0.0), None);
        assert_eq!(to_u32(-2.0), None);
    }
}
