//! Numeric evaluation of expression trees.
//!
//! A [`Node`] can be evaluated into any type implementing [`Numeric`]: `f64` for fast real
//! arithmetic, [`rug::Complex`] for arbitrary-precision complex arithmetic, or [`Value`] for
//! exact results. The values of symbols are supplied by a [`Scope`].

pub mod consts;
pub mod error;
mod numeric;
mod scope;

pub use numeric::Numeric;
pub use scope::Scope;

use alg_error::Error;
use alg_value::Value;
use crate::{node::Node, registry::{self, FunctionRegistry}};
use error::{DomainError, UnboundSymbol, UndefinedFunction};
use log::trace;

/// Evaluates the tree, looking up functions in the global registry.
pub fn evaluate<N: Numeric>(node: &Node, scope: &impl Scope<N>) -> Result<N, Error> {
    evaluate_in(node, scope, registry::global())
}

/// Evaluates the tree, looking up functions in the given registry.
pub fn evaluate_in<N: Numeric>(
    node: &Node,
    scope: &impl Scope<N>,
    registry: &FunctionRegistry,
) -> Result<N, Error> {
    Evaluator { scope, registry }.eval(node)
}

struct Evaluator<'a, S> {
    scope: &'a S,
    registry: &'a FunctionRegistry,
}

impl<S> Evaluator<'_, S> {
    fn eval<N: Numeric>(&self, node: &Node) -> Result<N, Error>
    where
        S: Scope<N>,
    {
        match node {
            Node::Leaf(value) => self.eval_value(value),
            Node::Sum { terms, offset } => terms.iter().try_fold(self.eval_value(offset)?, |acc, term| {
                Ok(acc.add(&self.eval(term)?))
            }),
            Node::Product { factors, coefficient } => {
                factors.iter().try_fold(self.eval_value(coefficient)?, |acc, factor| {
                    multiply(&acc, &self.eval(factor)?)
                })
            },
            Node::Fraction(numerator, denominator) => {
                let numerator = self.eval(numerator)?;
                let denominator = self.eval(denominator)?
                    .recip()
                    .ok_or_else(|| domain_error("division"))?;
                multiply(&numerator, &denominator)
            },
            Node::Unary { name, .. } | Node::Binary { name, .. } | Node::NAry { name, .. } => {
                let args = node.args()
                    .unwrap_or_default()
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<N>, _>>()?;
                self.call(name, &args)
            },
        }
    }

    /// Evaluates a multinomial term by term.
    fn eval_value<N: Numeric>(&self, value: &Value) -> Result<N, Error>
    where
        S: Scope<N>,
    {
        let mut sum = N::from_rational(&0.into());
        for (monomial, coefficient) in value.terms() {
            let mut term = N::from_rational(coefficient);
            for (symbol, power) in monomial.factors() {
                let base = self.scope.get(symbol)
                    .or_else(|| N::constant(symbol))
                    .ok_or_else(|| Error::detached(UnboundSymbol { name: symbol.to_string() }))?;
                let factor = base.powi(power)
                    .ok_or_else(|| domain_error("exp"))?;
                term = multiply(&term, &factor)?;
            }
            sum = sum.add(&term);
        }
        Ok(sum)
    }

    /// Calls the function with its built-in evaluator, or with its exact evaluator if it has no
    /// built-in and the numeric type can use it.
    fn call<N: Numeric>(&self, name: &str, args: &[N]) -> Result<N, Error> {
        let def = self.registry.lookup(name, args.len());
        if let Some(builtin) = def.and_then(|def| def.builtin) {
            trace!("evaluating {}({} args)", builtin, args.len());
            return N::apply(builtin, args).ok_or_else(|| domain_error(name));
        }
        if let Some(result) = def.and_then(|def| N::apply_fast_path(def, args)) {
            trace!("evaluating {}({} args) with its exact evaluator", name, args.len());
            return result.ok_or_else(|| domain_error(name));
        }

        Err(Error::detached(UndefinedFunction {
            name: name.to_string(),
            suggestions: self.registry.suggestions(name)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }))
    }
}

fn multiply<N: Numeric>(lhs: &N, rhs: &N) -> Result<N, Error> {
    lhs.mul(rhs).ok_or_else(|| domain_error("multiplication"))
}

fn domain_error(operation: &str) -> Error {
    Error::detached(DomainError { operation: operation.to_string() })
}

#[cfg(test)]
mod tests {
    use alg_value::primitive::rational;
    use assert_float_eq::assert_float_absolute_eq;
    use crate::{node::{make_unary, Node}, parser::parse, registry::FunctionDef};
    use pretty_assertions::assert_eq;
    use rug::Complex;
    use std::collections::HashMap;
    use super::*;

    #[test]
    fn polynomial() {
        let node = parse("(a + b)*(a - b)").unwrap();
        let result: f64 = evaluate(&node, &[("a", 5.0), ("b", 3.0)]).unwrap();
        assert_float_absolute_eq!(result, 16.0);
    }

    #[test]
    fn constants() {
        let node = parse("2*pi").unwrap();
        let result: f64 = evaluate(&node, &HashMap::<String, f64>::new()).unwrap();
        assert_float_absolute_eq!(result, std::f64::consts::TAU);
    }

    #[test]
    fn scope_shadows_constants() {
        let node = parse("e + 1").unwrap();
        let result: f64 = evaluate(&node, &[("e", 2.0)]).unwrap();
        assert_float_absolute_eq!(result, 3.0);
    }

    #[test]
    fn functions() {
        let node = parse("sin(x)^2 + cos(x)^2").unwrap();
        let result: f64 = evaluate(&node, &[("x", 0.7)]).unwrap();
        assert_float_absolute_eq!(result, 1.0);

        let node = parse("sqr(x)").unwrap();
        let result: f64 = evaluate(&node, &[("x", 9.0)]).unwrap();
        assert_float_absolute_eq!(result, 3.0);
    }

    #[test]
    fn fractions() {
        let node = parse("1/(x - 2)").unwrap();
        let result: f64 = evaluate(&node, &[("x", 4.0)]).unwrap();
        assert_float_absolute_eq!(result, 0.5);

        let err = evaluate::<f64>(&node, &[("x", 2.0)]).unwrap_err();
        assert!(err.is::<DomainError>());
    }

    #[test]
    fn unbound_symbol() {
        let node = parse("x + 1").unwrap();
        let err = evaluate::<f64>(&node, &HashMap::<&str, f64>::new()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<UnboundSymbol>(),
            Some(&UnboundSymbol { name: "x".to_string() }),
        );
    }

    #[test]
    fn real_logarithm_of_negative() {
        let node = parse("ln(x)").unwrap();
        let err = evaluate::<f64>(&node, &[("x", -1.0)]).unwrap_err();
        assert!(err.is::<DomainError>());
    }

    #[test]
    fn complex_logarithm_of_negative() {
        let node = parse("ln(x)").unwrap();
        let result: Complex = evaluate(&node, &[("x", consts::complex(-1))]).unwrap();
        assert_float_absolute_eq!(result.imag().to_f64(), std::f64::consts::PI);
    }

    #[test]
    fn imaginary_unit() {
        let node = parse("(1 + i)*(1 - i)").unwrap();
        let result: Complex = evaluate(&node, &HashMap::<String, Complex>::new()).unwrap();
        assert_float_absolute_eq!(result.real().to_f64(), 2.0);
        assert_float_absolute_eq!(result.imag().to_f64(), 0.0);
    }

    #[test]
    fn exact() {
        let node = parse("(a + b)*(a - b)").unwrap();
        let result: Value = evaluate(&node, &[("a", Value::from(5)), ("b", Value::from(3))]).unwrap();
        assert_eq!(result, Value::from(16));

        let node = make_unary("sin", Node::symbol("x"));
        let half_pi = Value::symbol("pi").scale(&rational(1, 2));
        let result: Value = evaluate(&node, &[("x", half_pi)]).unwrap();
        assert_eq!(result, Value::one());

        let err = evaluate::<Value>(&node, &[("x", Value::one())]).unwrap_err();
        assert!(err.is::<DomainError>());
    }

    #[test]
    fn undefined_function() {
        let node = parse("sinn_(x)").unwrap();
        let err = evaluate::<f64>(&node, &[("x", 1.0)]).unwrap_err();
        let undefined = err.downcast_ref::<UndefinedFunction>().unwrap();
        assert_eq!(undefined.suggestions, vec!["sin".to_string()]);
    }

    #[test]
    fn registered_without_evaluator() {
        let mut registry = FunctionRegistry::with_builtins();
        registry.register(FunctionDef::new("f", 1));
        let node = make_unary("f", Node::symbol("x"));
        let err = evaluate_in::<f64>(&node, &[("x", 1.0)], &registry).unwrap_err();
        assert!(err.is::<UndefinedFunction>());
    }

    #[test]
    fn registered_with_exact_evaluator() {
        let mut registry = FunctionRegistry::with_builtins();
        registry.register(FunctionDef::new("half", 1).fast_path(|args| {
            args[0].as_rational()
                .filter(|n| *n.denom() == 1)
                .map(|n| Value::from(n / rug::Rational::from(2)))
        }));
        let node = make_unary("half", Node::symbol("x"));

        let result = evaluate_in::<Value>(&node, &[("x", Value::from(4))], &registry).unwrap();
        assert_eq!(result, Value::from(2));

        let err = evaluate_in::<Value>(&node, &[("x", Value::from(rational(1, 3)))], &registry).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError { operation: "half".to_string() }),
        );

        // the exact evaluator only applies to exact values
        let err = evaluate_in::<f64>(&node, &[("x", 4.0)], &registry).unwrap_err();
        assert!(err.is::<UndefinedFunction>());
    }

    #[test]
    fn oversized_exact_product() {
        let node = parse("x*y").unwrap();
        let big = Value::symbol("t").pow(i32::MAX).unwrap();
        let err = evaluate::<Value>(&node, &[("x", big.clone()), ("y", big)]).unwrap_err();
        assert!(err.is::<DomainError>());
    }
}
