//! Functions to construct [`Integer`]s and [`Rational`]s from various types.

use rug::{Integer, Rational};

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given numerator and denominator. **Panics if the denominator
/// is zero.**
pub fn rational<N, D>(numerator: N, denominator: D) -> Rational
where
    Integer: From<N> + From<D>,
{
    Rational::from((Integer::from(numerator), Integer::from(denominator)))
}

/// Returns the greatest common divisor of two rationals, defined as `gcd(a, c) / lcm(b, d)` for
/// `a/b` and `c/d`. The result is always non-negative, and zero only if both inputs are zero.
pub fn rational_gcd(lhs: &Rational, rhs: &Rational) -> Rational {
    let numer = Integer::from(lhs.numer().gcd_ref(rhs.numer()));
    let denom = Integer::from(lhs.denom().lcm_ref(rhs.denom()));
    Rational::from((numer, denom))
}

/// Returns the exact square root of a non-negative integer, if it is a perfect square.
pub fn exact_sqrt(n: &Integer) -> Option<Integer> {
    if n.cmp0().is_lt() || !n.is_perfect_square() {
        return None;
    }
    Some(Integer::from(n.sqrt_ref()))
}
