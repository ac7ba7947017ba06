//! Exact evaluators for the built-in functions.
//!
//! Each evaluator takes the exact values of the arguments and returns the exact result, or
//! [`None`] if the result cannot be expressed as a [`Value`]. `None` means "not applicable"; it
//! is never an error.

use alg_value::{primitive::rational, Value, E, PI};
use rug::Rational;

/// Returns `n/d * pi`.
fn pi_times(n: i32, d: i32) -> Value {
    Value::symbol(PI).scale(&rational(n, d))
}

/// Returns the angle as a whole number of twelfths of `pi`, reduced to one full turn
/// (`0..24`). Angles that are not a multiple of `pi/12` return [`None`].
fn twelfths_of_pi(angle: &Value) -> Option<u32> {
    let twelfths = angle.as_multiple_of(PI)? * Rational::from(12);
    if *twelfths.denom() != 1 {
        return None;
    }
    Some(twelfths.numer().mod_u(24))
}

/// Returns the only argument of a unary function.
fn single(args: &[Value]) -> Option<&Value> {
    match args {
        [arg] => Some(arg),
        _ => None,
    }
}

/// The sine of an angle that is a multiple of `pi/12`, if it is rational.
fn sin_table(twelfths: u32) -> Option<Value> {
    let (n, d) = match twelfths {
        0 | 12 => (0, 1),
        2 | 10 => (1, 2),
        6 => (1, 1),
        14 | 22 => (-1, 2),
        18 => (-1, 1),
        _ => return None,
    };
    Some(Value::from(rational(n, d)))
}

/// `sin(k*pi/6)` and `sin(k*pi/4)`, where the result is rational.
pub fn sin(args: &[Value]) -> Option<Value> {
    sin_table(twelfths_of_pi(single(args)?)?)
}

/// `cos(k*pi/6)` and `cos(k*pi/4)`, where the result is rational.
pub fn cos(args: &[Value]) -> Option<Value> {
    sin_table((twelfths_of_pi(single(args)?)? + 6) % 24)
}

/// `tan(k*pi/4)`, where the result is defined.
pub fn tan(args: &[Value]) -> Option<Value> {
    match twelfths_of_pi(single(args)?)? % 12 {
        0 => Some(Value::zero()),
        3 => Some(Value::one()),
        9 => Some(Value::from(-1)),
        _ => None,
    }
}

/// `cot(k*pi/4)`, where the result is defined.
pub fn cot(args: &[Value]) -> Option<Value> {
    match twelfths_of_pi(single(args)?)? % 12 {
        6 => Some(Value::zero()),
        3 => Some(Value::one()),
        9 => Some(Value::from(-1)),
        _ => None,
    }
}

/// `arcsin(x)` for `x` in `0, ±1/2, ±1`.
pub fn arcsin(args: &[Value]) -> Option<Value> {
    let x = single(args)?.as_rational()?;
    let (n, d) = match (x.numer().to_i32()?, x.denom().to_i32()?) {
        (0, _) => (0, 1),
        (1, 2) => (1, 6),
        (-1, 2) => (-1, 6),
        (1, 1) => (1, 2),
        (-1, 1) => (-1, 2),
        _ => return None,
    };
    Some(pi_times(n, d))
}

/// `arccos(x)` for `x` in `0, ±1/2, ±1`.
pub fn arccos(args: &[Value]) -> Option<Value> {
    let x = single(args)?.as_rational()?;
    let (n, d) = match (x.numer().to_i32()?, x.denom().to_i32()?) {
        (1, 1) => (0, 1),
        (1, 2) => (1, 3),
        (0, _) => (1, 2),
        (-1, 2) => (2, 3),
        (-1, 1) => (1, 1),
        _ => return None,
    };
    Some(pi_times(n, d))
}

/// `arctan(x)` for `x` in `0, ±1`. The inverse tangent of `±1/2` is not a rational multiple of
/// `pi`.
pub fn arctan(args: &[Value]) -> Option<Value> {
    let x = single(args)?.as_rational()?;
    let (n, d) = match (x.numer().to_i32()?, x.denom().to_i32()?) {
        (0, _) => (0, 1),
        (1, 1) => (1, 4),
        (-1, 1) => (-1, 4),
        _ => return None,
    };
    Some(pi_times(n, d))
}

/// `exp(k) = e^k` for integer `k`, including `exp(0) = 1` and `exp(1) = e`.
pub fn exp(args: &[Value]) -> Option<Value> {
    let k = single(args)?.as_i32()?;
    Value::symbol(E).pow(k)
}

/// `ln(1) = 0` and `ln(e^k) = k`.
pub fn ln(args: &[Value]) -> Option<Value> {
    let x = single(args)?;
    if x.is_one() {
        return Some(Value::zero());
    }
    let mut factors = x.as_monomial()?.factors();
    match (factors.next(), factors.next()) {
        (Some((name, power)), None) if name == E => Some(Value::from(power)),
        _ => None,
    }
}

/// The absolute value of a constant.
pub fn abs(args: &[Value]) -> Option<Value> {
    single(args)?.abs()
}

/// `negate(x) = -x`, for any value.
pub fn negate(args: &[Value]) -> Option<Value> {
    Some(-single(args)?.clone())
}

/// `reciprocal(x) = 1/x`, for non-zero single terms.
pub fn reciprocal(args: &[Value]) -> Option<Value> {
    single(args)?.checked_recip()
}

/// The square root of a non-negative rational whose numerator and denominator are perfect
/// squares.
pub fn sqr(args: &[Value]) -> Option<Value> {
    single(args)?.sqrt()
}

/// `exp(base, n)` for an integer constant `n`.
pub fn pow(args: &[Value]) -> Option<Value> {
    match args {
        [base, exponent] => base.pow(exponent.as_i32()?),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn angle(n: i32, d: i32) -> Vec<Value> {
        vec![pi_times(n, d)]
    }

    #[test]
    fn special_angles() {
        assert_eq!(sin(&angle(1, 6)), Some(Value::from(rational(1, 2))));
        assert_eq!(sin(&angle(-1, 2)), Some(Value::from(-1)));
        assert_eq!(sin(&angle(1, 4)), None);
        assert_eq!(cos(&angle(2, 3)), Some(Value::from(rational(-1, 2))));
        assert_eq!(cos(&angle(0, 1)), Some(Value::one()));
        assert_eq!(tan(&angle(5, 4)), Some(Value::one()));
        assert_eq!(tan(&angle(1, 2)), None);
        assert_eq!(cot(&angle(1, 2)), Some(Value::zero()));
        assert_eq!(cot(&angle(0, 1)), None);
        assert_eq!(sin(&[Value::symbol("x")]), None);
    }

    #[test]
    fn inverse_trig() {
        assert_eq!(arcsin(&[Value::from(rational(1, 2))]), Some(pi_times(1, 6)));
        assert_eq!(arccos(&[Value::from(-1)]), Some(Value::symbol(PI)));
        assert_eq!(arccos(&[Value::zero()]), Some(pi_times(1, 2)));
        assert_eq!(arctan(&[Value::from(-1)]), Some(pi_times(-1, 4)));
        assert_eq!(arctan(&[Value::from(rational(1, 2))]), None);
    }

    #[test]
    fn exponentials() {
        assert_eq!(exp(&[Value::zero()]), Some(Value::one()));
        assert_eq!(exp(&[Value::one()]), Some(Value::symbol(E)));
        assert_eq!(ln(&[Value::one()]), Some(Value::zero()));
        assert_eq!(ln(&[Value::symbol(E).pow(3).unwrap()]), Some(Value::from(3)));
        assert_eq!(ln(&[Value::from(2)]), None);
        assert_eq!(pow(&[Value::from(3), Value::from(-2)]), Some(Value::from(rational(1, 9))));
        assert_eq!(pow(&[Value::from(3), Value::symbol("x")]), None);
    }

    #[test]
    fn algebraic() {
        assert_eq!(abs(&[Value::from(-4)]), Some(Value::from(4)));
        assert_eq!(abs(&[Value::symbol("x")]), None);
        assert_eq!(negate(&[Value::symbol("x")]), Some(-Value::symbol("x")));
        assert_eq!(reciprocal(&[Value::zero()]), None);
        assert_eq!(sqr(&[Value::from(rational(4, 9))]), Some(Value::from(rational(2, 3))));
        assert_eq!(sqr(&[Value::from(2)]), None);
    }
}
