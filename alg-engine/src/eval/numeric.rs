//! Numeric types that expressions can be evaluated into.

use super::consts::{complex, E, I, PI};
use crate::registry::{Builtin, FunctionDef};
use alg_value::{self as value, Value};
use rug::{ops::Pow, Complex, Rational};

/// A number type that expressions can be evaluated into.
///
/// Every operation that can be undefined returns [`None`] in that case, which evaluation reports
/// as a domain error.
pub trait Numeric: Sized + Clone {
    /// Converts an exact rational into this type.
    fn from_rational(rational: &Rational) -> Self;

    /// Returns the value of a named constant (`pi`, `e`, or `i`), if this type can represent it.
    fn constant(name: &str) -> Option<Self>;

    /// Returns `self + rhs`.
    fn add(&self, rhs: &Self) -> Self;

    /// Returns `self * rhs`, or [`None`] if the product cannot be represented.
    fn mul(&self, rhs: &Self) -> Option<Self>;

    /// Returns `-self`.
    fn neg(&self) -> Self;

    /// Returns `1 / self`, or [`None`] if `self` is zero or has no exact reciprocal.
    fn recip(&self) -> Option<Self>;

    /// Returns `self` raised to an integer power.
    fn powi(&self, exp: i32) -> Option<Self>;

    /// Applies a built-in function to the arguments.
    fn apply(builtin: Builtin, args: &[Self]) -> Option<Self>;

    /// Applies the exact evaluator of a registered function to the arguments.
    ///
    /// Returns [`None`] if this type cannot use the function's exact evaluator, or if the
    /// function has none. Otherwise, returns the evaluator's result, which is [`None`] if the
    /// function is undefined for the arguments.
    fn apply_fast_path(_def: &FunctionDef, _args: &[Self]) -> Option<Option<Self>> {
        None
    }
}

/// Returns the only argument of a unary function.
fn single<N>(args: &[N]) -> Option<&N> {
    match args {
        [arg] => Some(arg),
        _ => None,
    }
}

/// Returns the value if it is finite.
fn finite(n: f64) -> Option<f64> {
    n.is_finite().then_some(n)
}

/// Real-valued evaluation. Operations whose result is not real, such as `ln(-1)`, are undefined.
impl Numeric for f64 {
    fn from_rational(rational: &Rational) -> Self {
        rational.to_f64()
    }

    fn constant(name: &str) -> Option<Self> {
        match name {
            value::PI => Some(std::f64::consts::PI),
            value::E => Some(std::f64::consts::E),
            _ => None,
        }
    }

    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    fn mul(&self, rhs: &Self) -> Option<Self> {
        Some(self * rhs)
    }

    fn neg(&self) -> Self {
        -self
    }

    fn recip(&self) -> Option<Self> {
        (*self != 0.0).then(|| 1.0 / self)
    }

    fn powi(&self, exp: i32) -> Option<Self> {
        if *self == 0.0 && exp < 0 {
            return None;
        }
        finite(f64::powi(*self, exp))
    }

    fn apply(builtin: Builtin, args: &[Self]) -> Option<Self> {
        if builtin == Builtin::Pow {
            let [base, exponent] = args else { return None };
            let result = f64::powf(*base, *exponent);
            return (!result.is_nan()).then_some(result).and_then(finite);
        }

        let x = *single(args)?;
        let result = match builtin {
            Builtin::Abs => x.abs(),
            Builtin::Arccos if (-1.0..=1.0).contains(&x) => x.acos(),
            Builtin::Arcsin if (-1.0..=1.0).contains(&x) => x.asin(),
            Builtin::Arccos | Builtin::Arcsin => return None,
            Builtin::Arctan => x.atan(),
            Builtin::Cos => x.cos(),
            Builtin::Cot => Numeric::recip(&x.tan())?,
            Builtin::Negate => -x,
            Builtin::Reciprocal => Numeric::recip(&x)?,
            Builtin::Sin => x.sin(),
            Builtin::Sqr if x >= 0.0 => x.sqrt(),
            Builtin::Sqr => return None,
            Builtin::Tan => x.tan(),
            Builtin::Exp => x.exp(),
            Builtin::Ln if x > 0.0 => x.ln(),
            Builtin::Ln => return None,
            Builtin::Pow => return None,
        };
        finite(result)
    }
}

/// Returns the number if both of its parts are finite.
fn finite_complex(n: Complex) -> Option<Complex> {
    (n.real().is_finite() && n.imag().is_finite()).then_some(n)
}

/// Complex-valued evaluation with [`PRECISION`](super::consts::PRECISION) bits of precision.
impl Numeric for Complex {
    fn from_rational(rational: &Rational) -> Self {
        complex(rational)
    }

    fn constant(name: &str) -> Option<Self> {
        match name {
            value::PI => Some(complex(&*PI)),
            value::E => Some(complex(&*E)),
            value::I => Some(I.clone()),
            _ => None,
        }
    }

    fn add(&self, rhs: &Self) -> Self {
        complex(self + rhs)
    }

    fn mul(&self, rhs: &Self) -> Option<Self> {
        Some(complex(self * rhs))
    }

    fn neg(&self) -> Self {
        complex(-self)
    }

    fn recip(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        finite_complex(complex(self.recip_ref()))
    }

    fn powi(&self, exp: i32) -> Option<Self> {
        if self.is_zero() && exp < 0 {
            return None;
        }
        finite_complex(complex(self.pow(exp)))
    }

    fn apply(builtin: Builtin, args: &[Self]) -> Option<Self> {
        if builtin == Builtin::Pow {
            let [base, exponent] = args else { return None };
            if base.is_zero() {
                // 0^z is only defined for z with a positive real part
                return (exponent.real().is_sign_positive() && !exponent.real().is_zero())
                    .then(|| complex(0));
            }
            return finite_complex(complex(base.pow(exponent)));
        }

        let x = single(args)?.clone();
        let result = match builtin {
            Builtin::Abs => x.abs(),
            Builtin::Arccos => x.acos(),
            Builtin::Arcsin => x.asin(),
            Builtin::Arctan => x.atan(),
            Builtin::Cos => x.cos(),
            Builtin::Cot => Numeric::recip(&x.tan())?,
            Builtin::Negate => -x,
            Builtin::Reciprocal => Numeric::recip(&x)?,
            Builtin::Sin => x.sin(),
            Builtin::Sqr => x.sqrt(),
            Builtin::Tan => x.tan(),
            Builtin::Exp => x.exp(),
            Builtin::Ln if x.is_zero() => return None,
            Builtin::Ln => x.ln(),
            Builtin::Pow => return None,
        };
        finite_complex(result)
    }
}

/// Exact evaluation. Functions are only defined where their exact evaluator applies, such as
/// `sin(pi/6) = 1/2`; the named constants stay symbolic.
impl Numeric for Value {
    fn from_rational(rational: &Rational) -> Self {
        Value::from(rational.clone())
    }

    fn constant(name: &str) -> Option<Self> {
        value::is_constant(name).then(|| Value::symbol(name))
    }

    fn add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    fn mul(&self, rhs: &Self) -> Option<Self> {
        self.checked_mul(rhs)
    }

    fn neg(&self) -> Self {
        -self
    }

    fn recip(&self) -> Option<Self> {
        self.checked_recip()
    }

    fn powi(&self, exp: i32) -> Option<Self> {
        self.pow(exp)
    }

    fn apply(builtin: Builtin, args: &[Self]) -> Option<Self> {
        builtin.exact()(args)
    }

    fn apply_fast_path(def: &FunctionDef, args: &[Self]) -> Option<Option<Self>> {
        def.fast_path.as_ref().map(|fast_path| fast_path(args))
    }
}
