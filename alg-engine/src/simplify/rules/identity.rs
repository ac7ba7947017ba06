//! Rules that fold known identities of the built-in functions.

use alg_value::Value;
use crate::node::{make_product, make_sum, Node};
use crate::simplify::{rules::{do_call, do_product, do_sum}, step::Step, step_collector::StepCollector};
use std::iter::once;

/// Returns the argument of a call to the given unary function.
fn unary_arg<'a>(node: &'a Node, name: &str) -> Option<&'a Node> {
    node.as_call(name, 1).map(|args| &args[0])
}

/// If the only argument is a call to `inner`, returns the argument of that call.
fn unwrap_nested(args: &[Node], inner: &str) -> Option<Node> {
    unary_arg(&args[0], inner).cloned()
}

/// Removes two factors of a product if their bases form a pair according to `is_pair`, and they
/// are raised to the same power.
fn remove_pair(
    factors: &[Node],
    coefficient: &Value,
    is_pair: impl Fn(&Node, &Node) -> bool,
) -> Option<Node> {
    let powers = factors.iter().map(Node::split_power).collect::<Vec<_>>();
    for (i, (lhs, lhs_exp)) in powers.iter().enumerate() {
        for (j, (rhs, rhs_exp)) in powers.iter().enumerate() {
            if i == j || lhs_exp != rhs_exp || !is_pair(lhs, rhs) {
                continue;
            }

            let rest = factors.iter()
                .enumerate()
                .filter(|&(k, _)| k != i && k != j)
                .map(|(_, factor)| factor.clone());
            return Some(make_product(rest.chain(once(Node::Leaf(coefficient.clone())))));
        }
    }
    None
}

/// `tan(x)*cot(x) = 1`
pub fn tan_cot(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    let opt = do_product(node, |factors, coefficient| {
        remove_pair(factors, coefficient, |lhs, rhs| {
            match (unary_arg(lhs, "tan"), unary_arg(rhs, "cot")) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        })
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::TanCot);
    Some(opt)
}

/// `reciprocal(x)*x = 1`
pub fn reciprocal_pair(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    let opt = do_product(node, |factors, coefficient| {
        remove_pair(factors, coefficient, |lhs, rhs| unary_arg(lhs, "reciprocal") == Some(rhs))
    })?;

    step_collector.push(Step::ReciprocalPair);
    Some(opt)
}

/// `negate(negate(x)) = x`
pub fn double_negate(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    let opt = do_call(node, "negate", 1, |args| unwrap_nested(args, "negate"))?;
    step_collector.push(Step::DoubleNegate);
    Some(opt)
}

/// `reciprocal(reciprocal(x)) = x`
pub fn double_reciprocal(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    let opt = do_call(node, "reciprocal", 1, |args| unwrap_nested(args, "reciprocal"))?;
    step_collector.push(Step::DoubleReciprocal);
    Some(opt)
}

/// `exp(ln(x)) = x`
pub fn exp_ln(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    let opt = do_call(node, "exp", 1, |args| unwrap_nested(args, "ln"))?;
    step_collector.push(Step::ExpLn);
    Some(opt)
}

/// `ln(exp(x)) = x`
pub fn ln_exp(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    let opt = do_call(node, "ln", 1, |args| unwrap_nested(args, "exp"))?;
    step_collector.push(Step::LnExp);
    Some(opt)
}

/// If the node is `f(x)^2`, returns `x`.
fn squared_arg<'a>(node: &'a Node, name: &str) -> Option<&'a Node> {
    let (base, exponent) = node.as_power()?;
    if exponent.as_leaf().and_then(Value::as_i32) != Some(2) {
        return None;
    }
    unary_arg(base, name)
}

/// `c*sin(x)^2 + c*cos(x)^2 = c`
pub fn pythagorean(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    let opt = do_sum(node, |terms, offset| {
        let split = terms.iter().map(Node::split_coefficient).collect::<Vec<_>>();
        for (i, (coeff, term)) in split.iter().enumerate() {
            let Some(arg) = squared_arg(term, "sin") else {
                continue;
            };
            let partner = split.iter().position(|(other_coeff, other)| {
                other_coeff == coeff && squared_arg(other, "cos") == Some(arg)
            });
            let Some(j) = partner else {
                continue;
            };

            let rest = terms.iter()
                .enumerate()
                .filter(|&(k, _)| k != i && k != j)
                .map(|(_, term)| term.clone());
            return Some(make_sum(rest.chain(once(Node::Leaf(offset + coeff)))));
        }
        None
    })?;

    step_collector.push(Step::Pythagorean);
    Some(opt)
}

/// Applies all identity rules.
pub fn all(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    tan_cot(node, step_collector)
        .or_else(|| reciprocal_pair(node, step_collector))
        .or_else(|| double_negate(node, step_collector))
        .or_else(|| double_reciprocal(node, step_collector))
        .or_else(|| exp_ln(node, step_collector))
        .or_else(|| ln_exp(node, step_collector))
        .or_else(|| pythagorean(node, step_collector))
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn tan_times_cot() {
        let node = parse("2*x*tan(y)*cot(y)*sin(y)").unwrap();
        let mut steps = Vec::new();
        assert_eq!(tan_cot(&node, &mut steps), Some(parse("2*x*sin(y)").unwrap()));
        assert_eq!(steps, vec![Step::TanCot]);

        let node = parse("tan(y)*cot(z)").unwrap();
        assert_eq!(tan_cot(&node, &mut ()), None);
    }

    #[test]
    fn powers_must_match() {
        let node = parse("tan(y)^2*cot(y)").unwrap();
        assert_eq!(tan_cot(&node, &mut ()), None);
        let node = parse("tan(y)^2*cot(y)^2").unwrap();
        assert_eq!(tan_cot(&node, &mut ()), Some(Node::one()));
    }

    #[test]
    fn nested_inverses() {
        let node = parse("ln(exp(sin(x)))").unwrap();
        assert_eq!(ln_exp(&node, &mut ()), Some(parse("sin(x)").unwrap()));
        assert_eq!(exp_ln(&node, &mut ()), None);
    }

    #[test]
    fn pythagorean_needs_equal_coefficients() {
        let node = parse("2*sin(x)^2 + cos(x)^2").unwrap();
        assert_eq!(pythagorean(&node, &mut ()), None);

        let node = parse("a*sin(x)^2 + a*cos(x)^2 + 1").unwrap();
        assert_eq!(pythagorean(&node, &mut ()), Some(parse("a + 1").unwrap()));
    }
}
