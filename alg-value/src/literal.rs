//! Parsing of single literals: integers, exact decimals, and symbol names.

use crate::Value;
use rug::{Integer, Rational};
use std::{error::Error, fmt, str::FromStr};

/// An error produced when parsing a literal fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralError {
    /// The byte offset into the literal at which the error was found.
    pub offset: usize,

    /// A description of the problem.
    pub message: String,
}

impl LiteralError {
    fn new(offset: usize, message: impl Into<String>) -> Self {
        Self { offset, message: message.into() }
    }
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at offset {})", self.message, self.offset)
    }
}

impl Error for LiteralError {}

/// Parses a decimal number made of ASCII digits and at most one decimal point into an exact
/// rational, so that `2.5` becomes `5/2`.
fn parse_decimal(s: &str) -> Result<Rational, LiteralError> {
    let mut digits = String::with_capacity(s.len());
    let mut fraction_digits = None::<u32>;

    for (offset, c) in s.char_indices() {
        match c {
            '0'..='9' => {
                digits.push(c);
                if let Some(count) = fraction_digits.as_mut() {
                    *count += 1;
                }
            },
            '.' if fraction_digits.is_none() => fraction_digits = Some(0),
            '.' => return Err(LiteralError::new(offset, "a number can only have one decimal point")),
            _ => return Err(LiteralError::new(offset, format!("unexpected character `{}` in number", c))),
        }
    }

    if fraction_digits == Some(0) {
        return Err(LiteralError::new(s.len(), "expected digits after the decimal point"));
    }

    let numer = digits.parse::<Integer>()
        .map_err(|err| LiteralError::new(0, err.to_string()))?;
    let denom = Integer::from(Integer::u_pow_u(10, fraction_digits.unwrap_or(0)));
    Ok(Rational::from((numer, denom)))
}

/// Returns true if the string is a valid symbol name: an ASCII letter followed by any number of
/// ASCII letters and digits.
pub fn is_symbol_name(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().map_or(false, |c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Parses a single literal. The accepted forms are:
///
/// - integers, such as `42`,
/// - decimals, such as `2.5`, which are converted exactly (`5/2`),
/// - symbol names, such as `x`, `theta2`, or the constants `pi`, `e`, and `i`.
///
/// Signs, operators, and whitespace are not part of a literal.
impl FromStr for Value {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(first) = s.chars().next() else {
            return Err(LiteralError::new(0, "expected a literal"));
        };

        if first.is_ascii_digit() {
            parse_decimal(s).map(Value::from)
        } else if is_symbol_name(s) {
            Ok(Value::symbol(s))
        } else {
            let offset = s.char_indices()
                .find(|&(idx, c)| !(c.is_ascii_alphanumeric() && (idx > 0 || c.is_ascii_alphabetic())))
                .map_or(0, |(idx, _)| idx);
            Err(LiteralError::new(offset, format!("`{}` is not a valid literal", s)))
        }
    }
}
