//! Rendering of [`Node`]s in the textual notation accepted by the parser.
//!
//! The rendering of a canonical tree parses back into the same tree.

use super::{Node, POWER};
use crate::registry;
use alg_value::Value;
use std::fmt::{self, Display, Formatter};

/// Returns true if the value needs parentheses when it is written next to other factors, i.e.
/// it has more than one term.
fn value_needs_parens(value: &Value) -> bool {
    value.len() > 1
}

/// Writes a value that is used as a multiplicative coefficient, followed by the `*` that
/// separates it from the factors. Nothing is written for a unit coefficient.
fn fmt_coefficient(f: &mut Formatter<'_>, coefficient: &Value) -> fmt::Result {
    if coefficient.is_one() {
        Ok(())
    } else if coefficient.as_rational().map_or(false, |r| r == -1) {
        write!(f, "-")
    } else if value_needs_parens(coefficient) {
        write!(f, "({})*", coefficient)
    } else {
        write!(f, "{}*", coefficient)
    }
}

/// Writes a product with the given factors and coefficient.
fn fmt_product(f: &mut Formatter<'_>, factors: &[Node], coefficient: &Value) -> fmt::Result {
    fmt_coefficient(f, coefficient)?;
    for (idx, factor) in factors.iter().enumerate() {
        if idx > 0 {
            write!(f, "*")?;
        }
        match factor {
            Node::Sum { .. } | Node::Fraction(..) => write!(f, "({})", factor)?,
            Node::Leaf(value) if value_needs_parens(value) || value.is_negative_term() => {
                write!(f, "({})", value)?
            },
            _ => write!(f, "{}", factor)?,
        }
    }
    Ok(())
}

/// Writes the term of a sum that follows at least one other term, including the operator that
/// joins it to the previous terms.
fn fmt_trailing_term(f: &mut Formatter<'_>, term: &Node) -> fmt::Result {
    match term {
        Node::Product { factors, coefficient } if coefficient.is_negative_term() => {
            write!(f, " - ")?;
            fmt_product(f, factors, &-coefficient)
        },
        _ => write!(f, " + {}", term),
    }
}

/// Writes the offset of a sum that follows at least one term.
fn fmt_offset(f: &mut Formatter<'_>, offset: &Value) -> fmt::Result {
    let rendered = offset.to_string();
    match rendered.strip_prefix('-') {
        Some(rest) => write!(f, " - {}", rest),
        None => write!(f, " + {}", rendered),
    }
}

/// Returns true if the numerator of a fraction needs parentheses.
fn numerator_needs_parens(numerator: &Node) -> bool {
    match numerator {
        Node::Sum { .. } | Node::Fraction(..) => true,
        Node::Leaf(value) => value_needs_parens(value),
        _ => false,
    }
}

/// Returns true if the denominator of a fraction needs parentheses. Only function calls, single
/// symbols, and positive integers can be written without them.
fn denominator_needs_parens(denominator: &Node) -> bool {
    if denominator.is_call() || denominator.is_plain_symbol() {
        return false;
    }
    let positive_integer = denominator.as_leaf()
        .and_then(Value::as_rational)
        .map_or(false, |r| *r.denom() == 1 && r.cmp0().is_gt());
    !positive_integer
}

/// Writes a function call. Functions that are not registered are written with the `_` marker,
/// so that the parser reads them back as calls.
fn fmt_call(f: &mut Formatter<'_>, name: &str, args: &[Node]) -> fmt::Result {
    if registry::global().contains_name(name) {
        write!(f, "{}(", name)?;
    } else {
        write!(f, "{}_(", name)?;
    }
    for (idx, arg) in args.iter().enumerate() {
        if idx > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", arg)?;
    }
    write!(f, ")")
}

/// Renders the node in the notation accepted by the parser.
///
/// - Sums are written with their terms first and the offset last: `sin(x) + 2`.
/// - Products are written with their coefficient first: `3*x*sin(y)`, `(a + b)*cos(y)`.
/// - Fractions are written as `numerator/denominator`, with parentheses where needed.
/// - Powers keep their function form, `exp(sin(x), 2)`.
impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(value) => write!(f, "{}", value),
            Node::Sum { terms, offset } => {
                let mut terms = terms.iter();
                if let Some(first) = terms.next() {
                    write!(f, "{}", first)?;
                }
                for term in terms {
                    fmt_trailing_term(f, term)?;
                }
                if !offset.is_zero() {
                    fmt_offset(f, offset)?;
                }
                Ok(())
            },
            Node::Product { factors, coefficient } => fmt_product(f, factors, coefficient),
            Node::Fraction(num, den) => {
                if numerator_needs_parens(num) {
                    write!(f, "({})", num)?;
                } else {
                    write!(f, "{}", num)?;
                }
                write!(f, "/")?;
                if denominator_needs_parens(den) {
                    write!(f, "({})", den)
                } else {
                    write!(f, "{}", den)
                }
            },
            Node::Unary { name, arg } => fmt_call(f, name, std::slice::from_ref(&**arg)),
            Node::Binary { name, args } => fmt_call(f, name, &args[..]),
            Node::NAry { name, args } => fmt_call(f, name, args),
        }
    }
}
