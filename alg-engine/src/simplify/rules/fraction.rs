//! Rules for fractions: combining, merging, cancelling, and reducing them.

use alg_value::{primitive::rational_gcd, Value};
use crate::node::{build::divide, make_power, make_product, make_sum, Node};
use crate::simplify::{rules::{do_call, do_fraction, do_product, do_sum}, step::Step, step_collector::StepCollector};
use std::iter::once;

/// Splits one side of a fraction into its value coefficient and its factors, each written as a
/// `(base, exponent)` pair.
fn split_factors(node: &Node) -> (Value, Vec<(Node, Node)>) {
    match node {
        Node::Leaf(value) => (value.clone(), Vec::new()),
        Node::Product { factors, coefficient } => {
            (coefficient.clone(), factors.iter().map(Node::split_power).collect())
        },
        other => (Value::one(), vec![other.split_power()]),
    }
}

/// The inverse of [`split_factors`].
fn join_factors(coefficient: Value, factors: Vec<(Node, Node)>) -> Node {
    make_product(
        once(Node::Leaf(coefficient))
            .chain(factors.into_iter().map(|(base, exponent)| make_power(base, exponent))),
    )
}

/// Returns `lhs - rhs` if the difference of the two exponents is known.
fn exponent_difference(lhs: &Node, rhs: &Node) -> Option<Value> {
    if lhs == rhs {
        return Some(Value::zero());
    }
    Some(lhs.as_leaf()? - rhs.as_leaf()?)
}

/// `negate(2) = -2`
pub fn lower_negate(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    let opt = do_call(node, "negate", 1, |args| {
        args[0].as_leaf().map(|value| Node::Leaf(-value))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::LowerNegate);
    Some(opt)
}

/// `reciprocal(a + b) = 1/(a + b)`
pub fn lower_reciprocal(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    let opt = do_call(node, "reciprocal", 1, |args| {
        let value = args[0].as_leaf().filter(|value| !value.is_zero())?;
        Some(divide(Node::one(), Node::Leaf(value.clone())))
    })?;

    step_collector.push(Step::LowerReciprocal);
    Some(opt)
}

/// `a * (b/c) = (a*b)/c`
/// `(a/b) * (c/d) = (a*c)/(b*d)`
pub fn product_of_fractions(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    let opt = do_product(node, |factors, coefficient| {
        if !factors.iter().any(|factor| matches!(factor, Node::Fraction(..))) {
            return None;
        }

        let mut numerators = vec![Node::Leaf(coefficient.clone())];
        let mut denominators = Vec::new();
        for factor in factors {
            match factor {
                Node::Fraction(numerator, denominator) => {
                    numerators.push((**numerator).clone());
                    denominators.push((**denominator).clone());
                },
                other => numerators.push(other.clone()),
            }
        }

        Some(divide(make_product(numerators), make_product(denominators)))
    })?;

    step_collector.push(Step::CombineFractions);
    Some(opt)
}

/// `a/b + c/d = (a*d + c*b)/(b*d)`
/// `a/b + c/b = (a + c)/b`
/// `a/b + c = (a + c*b)/b`
pub fn merge_fractions(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    let opt = do_sum(node, |terms, offset| {
        if !terms.iter().any(|term| matches!(term, Node::Fraction(..))) {
            return None;
        }

        let mut numerator = Node::Leaf(offset.clone());
        let mut denominator = Node::one();
        for term in terms {
            let (num, den) = match term {
                Node::Fraction(num, den) => ((**num).clone(), (**den).clone()),
                other => (other.clone(), Node::one()),
            };

            if den == denominator {
                numerator = make_sum([numerator, num]);
            } else {
                numerator = make_sum([
                    make_product([numerator, den.clone()]),
                    make_product([num, denominator.clone()]),
                ]);
                denominator = make_product([denominator, den]);
            }
        }

        Some(divide(numerator, denominator))
    })?;

    step_collector.push(Step::MergeFractions);
    Some(opt)
}

/// Cancels factors with equal bases from the numerator and denominator.
///
/// `(a*b)/(a*c) = b/c`
/// `a^3/a = a^2`
/// `(a + b)/(a + b) = 1`
pub fn cancel_factors(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    let opt = do_fraction(node, |numerator, denominator| {
        let (num_coeff, mut num_factors) = split_factors(numerator);
        let (den_coeff, mut den_factors) = split_factors(denominator);
        let mut cancelled = false;

        let mut idx = 0;
        while idx < num_factors.len() {
            let (base, exponent) = &num_factors[idx];
            let matching = den_factors.iter()
                .position(|(den_base, _)| den_base == base)
                .and_then(|pos| {
                    exponent_difference(exponent, &den_factors[pos].1).map(|diff| (pos, diff))
                });
            let Some((pos, diff)) = matching else {
                idx += 1;
                continue;
            };

            cancelled = true;
            den_factors.remove(pos);
            if diff.is_zero() {
                num_factors.remove(idx);
            } else if diff.is_negative_term() {
                let (base, _) = num_factors.remove(idx);
                den_factors.push((base, Node::Leaf(-diff)));
            } else {
                num_factors[idx].1 = Node::Leaf(diff);
                idx += 1;
            }
        }

        cancelled.then(|| divide(join_factors(num_coeff, num_factors), join_factors(den_coeff, den_factors)))
    })?;

    step_collector.push(Step::CancelFactors);
    Some(opt)
}

/// Reduces the value coefficients of the numerator and denominator. A negative denominator
/// coefficient moves its sign to the numerator.
///
/// `sin(x)/2 = 1/2*sin(x)`
/// `(2*x*sin(y))/(4*x) = 1/2*sin(y)`
/// `(2*x + 2)/(4*sin(y)) = (x + 1)/(2*sin(y))`
/// `sin(x)/(-2*cos(x)) = (-sin(x))/(2*cos(x))`
pub fn reduce_coefficients(node: &Node, step_collector: &mut dyn StepCollector) -> Option<Node> {
    let opt = do_fraction(node, |numerator, denominator| {
        let (num_coeff, num_factors) = split_factors(numerator);
        let (den_coeff, den_factors) = split_factors(denominator);
        if den_coeff.is_one() || den_coeff.is_zero() {
            return None;
        }

        // a denominator that is only a value can be divided out entirely
        let quotient = den_factors.is_empty()
            .then(|| num_coeff.checked_div(&den_coeff))
            .flatten();
        let (num_coeff, den_coeff) = match quotient {
            Some(quotient) => (quotient, Value::one()),
            None => {
                let common = Value::from_term(
                    rational_gcd(&num_coeff.content(), &den_coeff.content()),
                    num_coeff.monomial_content().gcd(&den_coeff.monomial_content()),
                );
                let common = if den_coeff.is_negative_term() { -common } else { common };
                if common.is_one() {
                    return None;
                }
                (num_coeff.checked_div(&common)?, den_coeff.checked_div(&common)?)
            },
        };

        Some(divide(join_factors(num_coeff, num_factors), join_factors(den_coeff, den_factors)))
    })?;

    step_collector.push(Step::ReduceFraction);
    Some(opt)
}

/// Applies all fraction rules. Sums of fractions are only merged if `merge` is true.
pub fn all(node: &Node, merge: bool, step_collector: &mut dyn StepCollector) -> Option<Node> {
    lower_negate(node, step_collector)
        .or_else(|| lower_reciprocal(node, step_collector))
        .or_else(|| product_of_fractions(node, step_collector))
        .or_else(|| if merge { merge_fractions(node, step_collector) } else { None })
        .or_else(|| cancel_factors(node, step_collector))
        .or_else(|| reduce_coefficients(node, step_collector))
}
