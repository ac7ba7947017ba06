//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the node to simplify as an argument, and
//! returns `Some(node)` with the rewritten node if the rule applies, or `None` if the rule does
//! not apply. A rule that applies always changes the node.

pub mod fraction;
pub mod identity;

use alg_value::Value;
use crate::node::Node;
use super::{options::SimplifyOptions, step::Step, step_collector::StepCollector};

/// If the node is a call to the given function with the given number of arguments, calls the
/// given transformation function with the arguments.
pub(crate) fn do_call(
    node: &Node,
    name: &str,
    arity: usize,
    f: impl Fn(&[Node]) -> Option<Node>,
) -> Option<Node> {
    node.as_call(name, arity).and_then(f)
}

/// If the node is a sum, calls the given transformation function with the terms and the offset.
pub(crate) fn do_sum(node: &Node, f: impl Fn(&[Node], &Value) -> Option<Node>) -> Option<Node> {
    if let Node::Sum { terms, offset } = node {
        f(terms, offset)
    } else {
        None
    }
}

/// If the node is a product, calls the given transformation function with the factors and the
/// coefficient.
pub(crate) fn do_product(node: &Node, f: impl Fn(&[Node], &Value) -> Option<Node>) -> Option<Node> {
    if let Node::Product { factors, coefficient } = node {
        f(factors, coefficient)
    } else {
        None
    }
}

/// If the node is a fraction, calls the given transformation function with the numerator and
/// denominator.
pub(crate) fn do_fraction(node: &Node, f: impl Fn(&Node, &Node) -> Option<Node>) -> Option<Node> {
    if let Node::Fraction(numerator, denominator) = node {
        f(numerator, denominator)
    } else {
        None
    }
}

/// Applies the first rule that matches.
pub fn all(
    node: &Node,
    options: &SimplifyOptions,
    step_collector: &mut dyn StepCollector,
) -> Option<Node> {
    fraction::all(node, options.merge_fractions, step_collector)
        .or_else(|| if options.fold_identities {
            identity::all(node, step_collector)
        } else {
            None
        })
}
