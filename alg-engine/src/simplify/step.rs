use std::fmt;

/// A simplification rule that was applied to an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `a * (b/c) = (a*b)/c`
    CombineFractions,

    /// `a/b + c/d = (a*d + c*b)/(b*d)`
    MergeFractions,

    /// `(a*b)/(a*c) = b/c`
    CancelFactors,

    /// `(2*x)/(4*y) = x/(2*y)`, `x/2 = 1/2*x`
    ReduceFraction,

    /// `negate(2) = -2`
    LowerNegate,

    /// `reciprocal(x) = 1/x`
    LowerReciprocal,

    /// A call was replaced by its exact value, such as `sin(pi/6) = 1/2`.
    FastPath {
        /// The name of the function.
        function: String,
    },

    /// `tan(x)*cot(x) = 1`
    TanCot,

    /// `reciprocal(x)*x = 1`
    ReciprocalPair,

    /// `negate(negate(x)) = x`
    DoubleNegate,

    /// `reciprocal(reciprocal(x)) = x`
    DoubleReciprocal,

    /// `exp(ln(x)) = x`
    ExpLn,

    /// `ln(exp(x)) = x`
    LnExp,

    /// `sin(x)^2 + cos(x)^2 = 1`
    Pythagorean,
}

impl Step {
    /// Returns a short description of the step.
    pub fn description(&self) -> String {
        match self {
            Step::CombineFractions => "multiply fractions into a single fraction".to_string(),
            Step::MergeFractions => "add fractions over a common denominator".to_string(),
            Step::CancelFactors => "cancel common factors of a fraction".to_string(),
            Step::ReduceFraction => "reduce the coefficients of a fraction".to_string(),
            Step::LowerNegate => "negate a value".to_string(),
            Step::LowerReciprocal => "write a reciprocal as a fraction".to_string(),
            Step::FastPath { function } => format!("evaluate `{}` exactly", function),
            Step::TanCot => "tan(x)*cot(x) = 1".to_string(),
            Step::ReciprocalPair => "reciprocal(x)*x = 1".to_string(),
            Step::DoubleNegate => "negate(negate(x)) = x".to_string(),
            Step::DoubleReciprocal => "reciprocal(reciprocal(x)) = x".to_string(),
            Step::ExpLn => "exp(ln(x)) = x".to_string(),
            Step::LnExp => "ln(exp(x)) = x".to_string(),
            Step::Pythagorean => "sin(x)^2 + cos(x)^2 = 1".to_string(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}
