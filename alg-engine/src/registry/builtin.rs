//! The built-in functions known to every registry.

use super::{fast_path, FunctionDef};
use alg_value::Value;
use std::fmt;

/// Identifies a built-in function, so that numeric evaluators can implement it without looking
/// at the function's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Builtin {
    /// `abs(x)`, the absolute value.
    Abs,

    /// `arccos(x)`, the inverse cosine.
    Arccos,

    /// `arcsin(x)`, the inverse sine.
    Arcsin,

    /// `arctan(x)`, the inverse tangent.
    Arctan,

    /// `cos(x)`
    Cos,

    /// `cot(x)`, the reciprocal of the tangent.
    Cot,

    /// `negate(x)`, equal to `-x`.
    Negate,

    /// `reciprocal(x)`, equal to `1/x`.
    Reciprocal,

    /// `sin(x)`
    Sin,

    /// `sqr(x)`, the principal square root.
    Sqr,

    /// `tan(x)`
    Tan,

    /// `exp(x)`, Euler's number raised to a power.
    Exp,

    /// `exp(base, exponent)`, a general power.
    Pow,

    /// `ln(x)`, the natural logarithm.
    Ln,
}

impl Builtin {
    /// Every built-in function.
    pub const ALL: [Builtin; 14] = [
        Builtin::Abs,
        Builtin::Arccos,
        Builtin::Arcsin,
        Builtin::Arctan,
        Builtin::Cos,
        Builtin::Cot,
        Builtin::Negate,
        Builtin::Reciprocal,
        Builtin::Sin,
        Builtin::Sqr,
        Builtin::Tan,
        Builtin::Exp,
        Builtin::Pow,
        Builtin::Ln,
    ];

    /// Returns the name the function is called by.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Abs => "abs",
            Builtin::Arccos => "arccos",
            Builtin::Arcsin => "arcsin",
            Builtin::Arctan => "arctan",
            Builtin::Cos => "cos",
            Builtin::Cot => "cot",
            Builtin::Negate => "negate",
            Builtin::Reciprocal => "reciprocal",
            Builtin::Sin => "sin",
            Builtin::Sqr => "sqr",
            Builtin::Tan => "tan",
            Builtin::Exp | Builtin::Pow => "exp",
            Builtin::Ln => "ln",
        }
    }

    /// Returns the number of arguments the function takes.
    pub fn arity(self) -> usize {
        match self {
            Builtin::Pow => 2,
            _ => 1,
        }
    }

    /// Returns a short description of the function, for listings.
    pub fn description(self) -> &'static str {
        match self {
            Builtin::Abs => "absolute value",
            Builtin::Arccos => "inverse cosine, in radians",
            Builtin::Arcsin => "inverse sine, in radians",
            Builtin::Arctan => "inverse tangent, in radians",
            Builtin::Cos => "cosine of an angle in radians",
            Builtin::Cot => "cotangent of an angle in radians",
            Builtin::Negate => "additive inverse",
            Builtin::Reciprocal => "multiplicative inverse",
            Builtin::Sin => "sine of an angle in radians",
            Builtin::Sqr => "principal square root",
            Builtin::Tan => "tangent of an angle in radians",
            Builtin::Exp => "e raised to the given power",
            Builtin::Pow => "base raised to the given exponent",
            Builtin::Ln => "natural logarithm",
        }
    }

    /// Returns the exact evaluator of the function.
    pub fn exact(self) -> fn(&[Value]) -> Option<Value> {
        match self {
            Builtin::Abs => fast_path::abs,
            Builtin::Arccos => fast_path::arccos,
            Builtin::Arcsin => fast_path::arcsin,
            Builtin::Arctan => fast_path::arctan,
            Builtin::Cos => fast_path::cos,
            Builtin::Cot => fast_path::cot,
            Builtin::Negate => fast_path::negate,
            Builtin::Reciprocal => fast_path::reciprocal,
            Builtin::Sin => fast_path::sin,
            Builtin::Sqr => fast_path::sqr,
            Builtin::Tan => fast_path::tan,
            Builtin::Exp => fast_path::exp,
            Builtin::Pow => fast_path::pow,
            Builtin::Ln => fast_path::ln,
        }
    }

    /// Returns the registry entry for the function, with [`Builtin::exact`] as its fast path.
    pub fn definition(self) -> FunctionDef {
        FunctionDef::new(self.name(), self.arity())
            .description(self.description())
            .builtin(self)
            .fast_path(self.exact())
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
