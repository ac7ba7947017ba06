use alg_attrs::ErrorKind;
use alg_error::ErrorKind;

/// Attempted to build a fraction whose denominator is zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this denominator is zero"],
    help = "the denominator of a fraction must be non-zero",
)]
pub struct DivisionByZero;
