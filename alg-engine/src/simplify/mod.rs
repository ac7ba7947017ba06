//! Simplification of expression trees.
//!
//! Simplification rewrites a tree into an equivalent tree that is (usually) smaller. It is done
//! in passes; each pass walks the tree bottom-up, and for every node:
//!
//! 1. simplifies the children,
//! 2. rebuilds the node from its simplified children with the canonical combinators (see
//! [`node`](crate::node)), which folds constants and merges like terms,
//! 3. replaces function calls on values with their exact results, if the function has a fast
//! path (see [`FunctionRegistry::try_fast_path`]),
//! 4. applies the first rule in [`rules`] that matches.
//!
//! Passes are repeated until a pass leaves the tree unchanged, or until
//! [`SimplifyOptions::max_passes`] is reached, in which case the last tree is returned.
//! Simplification never fails; fractions with a zero denominator are left as they are.
//!
//! ```
//! use alg_engine::{parser::parse, simplify::simplify};
//!
//! let node = parse("sin(x)/cos(x) * cos(x)/sin(x)").unwrap();
//! assert_eq!(simplify(&node).to_string(), "1");
//! ```

mod options;
pub mod rules;
pub mod step;
pub mod step_collector;

pub use options::{SimplifyOptions, SimplifyOptionsBuilder};
pub use step::Step;
pub use step_collector::StepCollector;

use step_collector::Traced;
use crate::node::{
    build::{divide, make_binary_in, make_nary_in},
    make_power,
    make_product,
    make_sum,
    make_unary,
    Node,
    POWER,
};
use crate::registry::{self, FunctionRegistry};
use log::debug;
use std::iter::once;

/// Simplifies the tree with the default options and the global registry.
pub fn simplify(node: &Node) -> Node {
    Simplifier::default().simplify(node)
}

/// Simplifies the tree with the given options and the global registry.
pub fn simplify_with(node: &Node, options: &SimplifyOptions) -> Node {
    Simplifier::new(*options).simplify(node)
}

/// Simplifies trees using a set of [`SimplifyOptions`] and a [`FunctionRegistry`].
#[derive(Debug, Clone)]
pub struct Simplifier<'r> {
    options: SimplifyOptions,
    registry: &'r FunctionRegistry,
}

impl Default for Simplifier<'static> {
    fn default() -> Self {
        Self::new(SimplifyOptions::default())
    }
}

impl Simplifier<'static> {
    /// Creates a simplifier that uses the global registry.
    pub fn new(options: SimplifyOptions) -> Self {
        Self::with_registry(options, registry::global())
    }
}

impl<'r> Simplifier<'r> {
    /// Creates a simplifier that uses the given registry.
    pub fn with_registry(options: SimplifyOptions, registry: &'r FunctionRegistry) -> Self {
        Self { options, registry }
    }

    /// Returns the options of this simplifier.
    pub fn options(&self) -> &SimplifyOptions {
        &self.options
    }

    /// Simplifies the tree.
    pub fn simplify(&self, node: &Node) -> Node {
        self.simplify_collect(node, &mut ())
    }

    /// Simplifies the tree, returning the steps that were applied, in order.
    pub fn simplify_with_steps(&self, node: &Node) -> (Node, Vec<Step>) {
        let mut steps = Vec::new();
        let simplified = self.simplify_collect(node, &mut steps);
        (simplified, steps)
    }

    /// Simplifies the tree, reporting the applied steps to the given collector.
    pub fn simplify_collect(&self, node: &Node, step_collector: &mut dyn StepCollector) -> Node {
        let mut step_collector = Traced(step_collector);
        let mut current = node.clone();

        for pass in 1..=self.options.max_passes {
            let next = self.pass(&current, &mut step_collector);
            debug!(
                "simplify pass {}: complexity {} -> {}",
                pass,
                current.complexity(),
                next.complexity(),
            );
            if next == current {
                return next;
            }
            current = next;
        }

        debug!("simplification stopped after {} passes", self.options.max_passes);
        current
    }

    /// Runs one bottom-up pass over the tree.
    fn pass(&self, node: &Node, step_collector: &mut dyn StepCollector) -> Node {
        let rebuilt = match node {
            Node::Leaf(_) => return node.clone(),
            Node::Sum { terms, offset } => make_sum(
                terms.iter()
                    .map(|term| self.pass(term, step_collector))
                    .collect::<Vec<_>>()
                    .into_iter()
                    .chain(once(Node::Leaf(offset.clone()))),
            ),
            Node::Product { factors, coefficient } => make_product(
                factors.iter()
                    .map(|factor| self.pass(factor, step_collector))
                    .collect::<Vec<_>>()
                    .into_iter()
                    .chain(once(Node::Leaf(coefficient.clone()))),
            ),
            Node::Fraction(numerator, denominator) => {
                let numerator = self.pass(numerator, step_collector);
                let denominator = self.pass(denominator, step_collector);
                divide(numerator, denominator)
            },
            Node::Unary { name, arg } => make_unary(name.clone(), self.pass(arg, step_collector)),
            Node::Binary { name, args } => {
                let [lhs, rhs] = &**args;
                let args = [self.pass(lhs, step_collector), self.pass(rhs, step_collector)];
                if name == POWER {
                    let [base, exponent] = args;
                    make_power(base, exponent)
                } else {
                    make_binary_in(self.registry, name.clone(), args)
                }
            },
            Node::NAry { name, args } => make_nary_in(
                self.registry,
                name.clone(),
                args.iter().map(|arg| self.pass(arg, step_collector)).collect(),
            ),
        };

        let collapsed = self.fast_path(rebuilt, step_collector);
        rules::all(&collapsed, &self.options, step_collector).unwrap_or(collapsed)
    }

    /// Replaces a call on values with its exact result, if the function has a fast path.
    fn fast_path(&self, node: Node, step_collector: &mut dyn StepCollector) -> Node {
        if !self.options.fast_paths {
            return node;
        }
        let (Some(name), Some(args)) = (node.function_name(), node.args()) else {
            return node;
        };
        match self.registry.try_fast_path(name, args) {
            Some(value) => {
                step_collector.push(Step::FastPath { function: name.to_string() });
                Node::Leaf(value)
            },
            None => node,
        }
    }
}

#[cfg(test)]
mod tests {
    use alg_value::Value;
    use crate::{parser::parse, registry::FunctionDef};
    use pretty_assertions::assert_eq;
    use super::*;

    fn simplified(s: &str) -> String {
        simplify(&parse(s).unwrap()).to_string()
    }

    #[test]
    fn constants() {
        assert_eq!(simplify(&parse("2+3").unwrap()), Node::leaf(5));
        assert_eq!(simplify(&parse("2*3").unwrap()), Node::leaf(6));
    }

    #[test]
    fn cancel_quotient() {
        assert_eq!(simplified("sin(x)/cos(x) * cos(x)/sin(x)"), "1");
        assert_eq!(simplified("(x + 1)/(x + 1)"), "1");
        assert_eq!(simplified("sin(x)^3/sin(x)"), "exp(sin(x), 2)");
        assert_eq!(simplified("sin(x)/sin(x)^3"), "1/exp(sin(x), 2)");
    }

    #[test]
    fn fractions_are_not_merged_by_default() {
        assert_eq!(simplified("a/(a+b) + b/(a+b)"), "a/(a + b) + b/(a + b)");
    }

    #[test]
    fn merge_fractions() {
        let options = SimplifyOptionsBuilder::new().merge_fractions(true).build();
        let node = parse("a/(a+b) + b/(a+b)").unwrap();
        assert_eq!(simplify_with(&node, &options), Node::one());

        let node = parse("1/sin(x) + 1/cos(x)").unwrap();
        assert_eq!(
            simplify_with(&node, &options).to_string(),
            "(cos(x) + sin(x))/(cos(x)*sin(x))",
        );
    }

    #[test]
    fn fast_paths() {
        assert_eq!(simplified("sin(pi/6)"), "1/2");
        assert_eq!(simplified("ln(1)"), "0");
        assert_eq!(simplified("2*cos(pi) + x"), "x - 2");
    }

    #[test]
    fn fast_paths_disabled() {
        let options = SimplifyOptionsBuilder::new().fast_paths(false).build();
        let node = parse("sin(pi/6)").unwrap();
        assert_eq!(simplify_with(&node, &options).to_string(), "sin(1/6*pi)");
    }

    #[test]
    fn identities() {
        assert_eq!(simplified("exp(ln(x))"), "x");
        assert_eq!(simplified("ln(exp(x + 1))"), "x + 1");
        assert_eq!(simplified("sin(x)^2 + cos(x)^2"), "1");
        assert_eq!(simplified("3*sin(y)^2 + 3*cos(y)^2 + z"), "z + 3");
        assert_eq!(simplified("tan(x)*cot(x)"), "1");
        assert_eq!(simplified("negate(negate(sin(x)))"), "sin(x)");
        assert_eq!(simplified("reciprocal(reciprocal(sin(x)))"), "sin(x)");
        assert_eq!(simplified("reciprocal(sin(x))*sin(x)"), "1");
    }

    #[test]
    fn identities_disabled() {
        let options = SimplifyOptionsBuilder::new().fold_identities(false).build();
        let node = parse("exp(ln(x))").unwrap();
        assert_eq!(simplify_with(&node, &options).to_string(), "exp(ln(x))");
    }

    #[test]
    fn lowering() {
        let options = SimplifyOptionsBuilder::new().fast_paths(false).build();
        let node = parse("negate(3) + reciprocal(a + b)").unwrap();
        assert_eq!(simplify_with(&node, &options).to_string(), "1/(a + b) - 3");
    }

    #[test]
    fn zero_denominator_is_kept() {
        let node = Node::Fraction(Box::new(Node::symbol("x")), Box::new(parse("a - a").unwrap()));
        assert_eq!(simplify(&node).to_string(), "x/0");
    }

    #[test]
    fn idempotent() {
        for s in ["sin(x)/cos(x) * cos(x)/sin(x)", "a/(a+b) + b/(a+b)", "2*x*sin(y)/(4*x)"] {
            let once = simplify(&parse(s).unwrap());
            assert_eq!(simplify(&once), once);
        }
    }

    #[test]
    fn reduce_coefficients() {
        assert_eq!(simplified("2*x*sin(y)/(4*x)"), "1/2*sin(y)");
        assert_eq!(simplified("(2*x + 2)/(4*sin(y))"), "(x + 1)/(2*sin(y))");
        assert_eq!(simplified("sin(x)/(-cos(x))"), simplified("-sin(x)/cos(x)"));
        assert_eq!(simplified("sin(x)/(-2*cos(x))"), simplified("-sin(x)/(2*cos(x))"));
    }

    #[test]
    fn steps() {
        let node = parse("sin(pi/6) + exp(ln(x))").unwrap();
        let (simplified, steps) = Simplifier::default().simplify_with_steps(&node);
        assert_eq!(simplified.to_string(), "x + 1/2");
        assert_eq!(steps, vec![Step::ExpLn, Step::FastPath { function: "sin".to_string() }]);
    }

    #[test]
    fn pass_cap() {
        let node = parse("sin(pi/6) + exp(ln(x))").unwrap();
        let options = SimplifyOptionsBuilder::new().max_passes(0).build();
        assert_eq!(simplify_with(&node, &options), node);

        let options = SimplifyOptionsBuilder::new().max_passes(1).build();
        assert_eq!(simplify_with(&node, &options).to_string(), "x + 1/2");
    }

    #[test]
    fn local_registry() {
        let mut registry = FunctionRegistry::with_builtins();
        registry.register(
            FunctionDef::new("double", 1).fast_path(|args: &[Value]| match args {
                [x] => Some(x + x),
                _ => None,
            }),
        );
        let simplifier = Simplifier::with_registry(SimplifyOptions::default(), &registry);
        let node = crate::parser::Parser::with_registry("double(21)", &registry).parse_full().unwrap();
        assert_eq!(simplifier.simplify(&node), Node::leaf(42));
    }
}
