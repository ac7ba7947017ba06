//! Arbitrary-precision constants used when evaluating with [`Complex`] numbers.

use once_cell::sync::Lazy;
use rug::{Complex, Float};

/// The number of bits of precision used by [`Float`]s and [`Complex`] numbers.
pub const PRECISION: u32 = 1 << 9;

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: rug::Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Creates a [`Complex`] with the given value.
pub fn complex<T>(n: T) -> Complex
where
    Complex: rug::Assign<T>,
{
    Complex::with_val(PRECISION, n)
}

/// The imaginary unit.
pub static I: Lazy<Complex> = Lazy::new(|| complex((0, 1)));

/// Euler's number.
pub static E: Lazy<Float> = Lazy::new(|| float(1).exp());

/// The ratio of a circle's circumference to its diameter.
pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());
