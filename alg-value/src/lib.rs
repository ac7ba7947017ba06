//! Exact values for the algebra engine.
//!
//! A [`Value`] is a finite sum of [`Monomial`]s with arbitrary-precision rational coefficients,
//! backed by [`rug`]. Values are closed under addition and subtraction. Multiplication, division,
//! and powers are checked: they return [`None`] when a power of a symbol overflows, when the result
//! would be too large to be useful, or when the result is not exact.
//!
//! The named constants [`PI`], [`E`], and [`I`] are ordinary symbols, except that products of
//! [`I`] are reduced using `i^2 = -1`.
//!
//! ```
//! use alg_value::Value;
//!
//! let a = "a".parse::<Value>().unwrap();
//! let b = "b".parse::<Value>().unwrap();
//! let product = (&a + &b).checked_mul(&(&a - &b)).unwrap();
//! assert_eq!(product.to_string(), "a^2 - b^2");
//! ```

pub mod literal;
pub mod monomial;
pub mod primitive;
pub mod value;

pub use literal::{is_symbol_name, LiteralError};
pub use monomial::{Monomial, IMAGINARY};
pub use value::Value;

/// The symbol name of the ratio of a circle's circumference to its diameter.
pub const PI: &str = "pi";

/// The symbol name of Euler's number.
pub const E: &str = "e";

/// The symbol name of the imaginary unit.
pub const I: &str = IMAGINARY;

/// The named constants, in the order they are listed to users.
pub const CONSTANTS: [&str; 3] = [PI, E, I];

/// Returns true if the given symbol is one of the named constants.
pub fn is_constant(name: &str) -> bool {
    CONSTANTS.contains(&name)
}
