//! Combinators that build canonical [`Node`]s.
//!
//! None of these functions mutate their arguments; each returns a new node in canonical form.

use super::{error::DivisionByZero, Node, POWER};
use crate::registry::{self, FunctionRegistry};
use alg_error::Error;
use alg_value::Value;
use std::collections::BTreeMap;

/// Builds the sum of the given terms.
///
/// Nested sums are flattened, leaves are folded into the offset, and like terms are merged by
/// adding their coefficients, so `2*x*sin(y) + 3*sin(y)` becomes `(2*x + 3)*sin(y)`. A sum that
/// is left with a single term and no offset becomes that term, and a sum with no terms becomes a
/// leaf.
pub fn make_sum(terms: impl IntoIterator<Item = Node>) -> Node {
    let mut offset = Value::zero();
    let mut like_terms = BTreeMap::<Node, Value>::new();
    let mut stack = terms.into_iter().collect::<Vec<_>>();

    while let Some(term) = stack.pop() {
        match term {
            Node::Leaf(value) => offset += &value,
            Node::Sum { terms, offset: inner } => {
                offset += &inner;
                stack.extend(terms);
            },
            other => {
                let (coeff, rest) = other.split_coefficient();
                *like_terms.entry(rest).or_default() += &coeff;
            },
        }
    }

    let mut terms = like_terms.into_iter()
        .filter(|(_, coeff)| !coeff.is_zero())
        .map(|(rest, coeff)| {
            if coeff.is_one() {
                rest
            } else {
                make_product([rest, Node::Leaf(coeff)])
            }
        })
        .collect::<Vec<_>>();
    terms.sort();

    match terms.len() {
        0 => Node::Leaf(offset),
        1 if offset.is_zero() => terms.remove(0),
        _ => Node::Sum { terms, offset },
    }
}

/// Builds the product of the given factors.
///
/// Nested products are flattened, leaves are folded into the coefficient, and equal bases are
/// merged by adding their exponents, so `x*sin(y)*sin(y)` becomes `x*exp(sin(y), 2)`. A zero
/// coefficient collapses the product to zero. A product that is left with a single factor and a
/// unit coefficient becomes that factor, and a product with no factors becomes a leaf.
///
/// A leaf that cannot be folded into the coefficient, because a power of a symbol would overflow
/// or the result would be too large, is kept as a factor of its own; equal leaves of that kind are
/// merged into `exp(leaf, n)`.
pub fn make_product(factors: impl IntoIterator<Item = Node>) -> Node {
    let mut coefficient = Value::one();
    let mut bases = BTreeMap::<Node, Vec<Node>>::new();
    let mut stack = factors.into_iter().collect::<Vec<_>>();

    while let Some(factor) = stack.pop() {
        match factor {
            Node::Leaf(value) => match coefficient.checked_mul(&value) {
                Some(product) => coefficient = product,
                None => bases.entry(Node::Leaf(value)).or_default().push(Node::one()),
            },
            Node::Product { factors, coefficient: inner } => {
                stack.push(Node::Leaf(inner));
                stack.extend(factors);
            },
            other => {
                let (base, exponent) = other.split_power();
                bases.entry(base).or_default().push(exponent);
            },
        }
    }

    if coefficient.is_zero() {
        return Node::zero();
    }

    let mut factors = Vec::with_capacity(bases.len());
    for (base, mut exponents) in bases {
        let exponent = match exponents.len() {
            1 => exponents.remove(0),
            _ => make_sum(exponents),
        };
        match make_power(base, exponent) {
            Node::Leaf(value) => match coefficient.checked_mul(&value) {
                Some(product) => coefficient = product,
                None => factors.push(Node::Leaf(value)),
            },
            factor => factors.push(factor),
        }
    }
    factors.sort();

    if coefficient.is_zero() {
        return Node::zero();
    }

    match factors.len() {
        0 => Node::Leaf(coefficient),
        1 if coefficient.is_one() => factors.remove(0),
        _ => Node::Product { factors, coefficient },
    }
}

/// Returns the negation of the given node, `-1 * node`.
pub fn negate(node: Node) -> Node {
    make_product([node, Node::leaf(-1)])
}

/// Builds the fraction `numerator / denominator`.
///
/// Returns a [`DivisionByZero`] error if the denominator is the zero leaf. Otherwise:
///
/// - a zero numerator gives zero, and a unit denominator gives the numerator,
/// - two leaves are divided exactly if [`Value::checked_div`] allows it,
/// - nested fractions are flattened: `(a/b)/c = a/(b*c)` and `a/(b/c) = (a*c)/b`.
pub fn make_fraction(numerator: Node, denominator: Node) -> Result<Node, Error> {
    if denominator.is_zero() {
        return Err(Error::detached(DivisionByZero));
    }
    Ok(divide(numerator, denominator))
}

/// Builds the fraction `numerator / denominator` without checking the denominator.
///
/// A zero denominator produces a raw [`Node::Fraction`], which is how the simplifier keeps
/// expressions like `x/(a - a)` intact instead of failing.
pub(crate) fn divide(numerator: Node, denominator: Node) -> Node {
    if denominator.is_zero() {
        return Node::Fraction(Box::new(numerator), Box::new(denominator));
    }
    if numerator.is_zero() {
        return Node::zero();
    }
    if denominator.is_one() {
        return numerator;
    }

    match (numerator, denominator) {
        (Node::Leaf(num), Node::Leaf(den)) => match num.checked_div(&den) {
            Some(quotient) => Node::Leaf(quotient),
            None => Node::Fraction(Box::new(Node::Leaf(num)), Box::new(Node::Leaf(den))),
        },
        (Node::Fraction(a, b), Node::Fraction(c, d)) => {
            divide(make_product([*a, *d]), make_product([*b, *c]))
        },
        (Node::Fraction(a, b), den) => divide(*a, make_product([*b, den])),
        (num, Node::Fraction(c, d)) => divide(make_product([num, *d]), *c),
        (num, den) => Node::Fraction(Box::new(num), Box::new(den)),
    }
}

/// Builds the power `base^exponent`.
///
/// A leaf base with an integer leaf exponent is folded with [`Value::pow`] where possible. A unit
/// exponent gives the base, and a zero exponent on a non-zero base gives one. Everything else is
/// represented as the binary function `exp(base, exponent)`.
pub fn make_power(base: Node, exponent: Node) -> Node {
    if exponent.is_one() {
        return base;
    }
    if exponent.is_zero() && !base.is_zero() {
        return Node::one();
    }
    if let (Node::Leaf(value), Some(n)) = (&base, exponent.as_leaf().and_then(Value::as_i32)) {
        if let Some(power) = value.pow(n) {
            return Node::Leaf(power);
        }
    }
    Node::Binary {
        name: POWER.to_string(),
        args: Box::new([base, exponent]),
    }
}

/// Builds a call to a function with one argument.
pub fn make_unary(name: impl Into<String>, arg: Node) -> Node {
    Node::Unary {
        name: name.into(),
        arg: Box::new(arg),
    }
}

/// Builds a call to a function with two arguments. The arguments are sorted canonically if the
/// global registry marks the function as order-insensitive.
pub fn make_binary(name: impl Into<String>, args: [Node; 2]) -> Node {
    make_binary_in(registry::global(), name, args)
}

/// Builds a call to a function with two arguments, sorting them canonically if the given
/// registry marks the function as order-insensitive. Calls to the binary `exp` are built with
/// [`make_power`].
pub fn make_binary_in(
    registry: &FunctionRegistry,
    name: impl Into<String>,
    mut args: [Node; 2],
) -> Node {
    let name = name.into();
    if name == POWER {
        let [base, exponent] = args;
        return make_power(base, exponent);
    }
    if registry.is_order_insensitive(&name, 2) {
        args.sort();
    }
    Node::Binary { name, args: Box::new(args) }
}

/// Builds a call to a function with any number of arguments. One or two arguments produce a
/// [`Node::Unary`] or [`Node::Binary`]; any other count produces a [`Node::NAry`]. The arguments
/// are sorted canonically if the global registry marks the function as order-insensitive.
pub fn make_nary(name: impl Into<String>, args: Vec<Node>) -> Node {
    make_nary_in(registry::global(), name, args)
}

/// Builds a call to a function with any number of arguments, sorting them canonically if the
/// given registry marks the function as order-insensitive.
pub fn make_nary_in(registry: &FunctionRegistry, name: impl Into<String>, mut args: Vec<Node>) -> Node {
    let name = name.into();
    match <[Node; 2]>::try_from(args) {
        Ok(pair) => make_binary_in(registry, name, pair),
        Err(returned) => {
            args = returned;
            if args.len() == 1 {
                let arg = args.remove(0);
                return make_unary(name, arg);
            }
            if registry.is_order_insensitive(&name, args.len()) {
                args.sort();
            }
            Node::NAry { name, args }
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::FunctionDef;
    use alg_value::primitive::rational;
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Node {
        Node::symbol(name)
    }

    fn sin(arg: Node) -> Node {
        make_unary("sin", arg)
    }

    #[test]
    fn sum_folds_leaves() {
        assert_eq!(make_sum([Node::leaf(2), Node::leaf(3)]), Node::leaf(5));
        assert_eq!(make_sum([sym("x"), Node::leaf(-1)]), Node::leaf(Value::symbol("x") - Value::one()));
        assert_eq!(make_sum([sin(sym("x")), Node::zero()]), sin(sym("x")));
    }

    #[test]
    fn sum_flattens_and_sorts() {
        let a = make_sum([sin(sym("x")), make_sum([make_unary("cos", sym("x")), Node::leaf(1)])]);
        let b = make_sum([Node::leaf(1), make_unary("cos", sym("x")), sin(sym("x"))]);
        assert_eq!(a, b);
        match a {
            Node::Sum { terms, offset } => {
                assert_eq!(terms.len(), 2);
                assert_eq!(offset, Value::one());
            },
            other => panic!("expected a sum, got {:?}", other),
        }
    }

    #[test]
    fn sum_merges_like_terms() {
        // 2*x*sin(y) + 3*sin(y) = (2*x + 3)*sin(y)
        let lhs = make_product([Node::leaf(2), sym("x"), sin(sym("y"))]);
        let rhs = make_product([Node::leaf(3), sin(sym("y"))]);
        let sum = make_sum([lhs, rhs]);
        let coefficient = Value::symbol("x").scale(&rational(2, 1)) + Value::from(3);
        assert_eq!(sum, Node::Product { factors: vec![sin(sym("y"))], coefficient });

        // sin(y) - sin(y) = 0
        assert_eq!(make_sum([sin(sym("y")), negate(sin(sym("y")))]), Node::zero());
    }

    #[test]
    fn product_folds_and_collapses() {
        assert_eq!(make_product([Node::leaf(2), Node::leaf(3)]), Node::leaf(6));
        assert_eq!(make_product([sin(sym("x")), Node::zero()]), Node::zero());
        assert_eq!(make_product([sin(sym("x")), Node::one()]), sin(sym("x")));
    }

    #[test]
    fn product_merges_bases() {
        let product = make_product([sin(sym("x")), sym("y"), sin(sym("x"))]);
        assert_eq!(product, Node::Product {
            factors: vec![make_power(sin(sym("x")), Node::leaf(2))],
            coefficient: Value::symbol("y"),
        });

        // sin(x)^2 * sin(x)^-2 = 1
        let product = make_product([
            make_power(sin(sym("x")), Node::leaf(2)),
            make_power(sin(sym("x")), Node::leaf(-2)),
        ]);
        assert_eq!(product, Node::one());
    }

    #[test]
    fn fractions() {
        assert!(make_fraction(sym("x"), Node::zero()).unwrap_err().is::<DivisionByZero>());
        assert_eq!(make_fraction(Node::zero(), sym("x")).unwrap(), Node::zero());
        assert_eq!(make_fraction(sin(sym("x")), Node::one()).unwrap(), sin(sym("x")));
        assert_eq!(make_fraction(Node::leaf(3), Node::leaf(6)).unwrap(), Node::leaf(rational(1, 2)));
    }

    #[test]
    fn nested_fractions_flatten() {
        let a = sin(sym("a"));
        let b = sin(sym("b"));
        let c = sin(sym("c"));

        // (a/b)/c = a/(b*c)
        let inner = make_fraction(a.clone(), b.clone()).unwrap();
        assert_eq!(
            make_fraction(inner, c.clone()).unwrap(),
            Node::Fraction(Box::new(a.clone()), Box::new(make_product([b.clone(), c.clone()]))),
        );

        // a/(b/c) = (a*c)/b
        let inner = make_fraction(b.clone(), c.clone()).unwrap();
        assert_eq!(
            make_fraction(a.clone(), inner).unwrap(),
            Node::Fraction(Box::new(make_product([a, c])), Box::new(b)),
        );
    }

    #[test]
    fn powers() {
        assert_eq!(make_power(Node::leaf(2), Node::leaf(10)), Node::leaf(1024));
        assert_eq!(make_power(sym("x"), Node::leaf(-1)), Node::leaf(Value::symbol("x").checked_recip().unwrap()));
        assert_eq!(make_power(sin(sym("x")), Node::one()), sin(sym("x")));
        assert_eq!(make_power(sin(sym("x")), Node::leaf(2)).as_power().map(|(_, e)| e.clone()), Some(Node::leaf(2)));
        assert_eq!(make_power(sym("x"), sym("y")).function_name(), Some(POWER));
        assert_eq!(make_binary(POWER, [Node::leaf(2), Node::leaf(3)]), Node::leaf(8));
        assert_eq!(make_binary(POWER, [sin(sym("x")), Node::one()]), sin(sym("x")));
    }

    #[test]
    fn oversized_powers_stay_symbolic() {
        let power = make_power(Node::leaf(2), Node::leaf(i32::MAX));
        assert_eq!(power.as_power(), Some((&Node::leaf(2), &Node::leaf(i32::MAX))));

        let again = make_power(power.clone(), Node::leaf(i32::MAX));
        assert_eq!(again.function_name(), Some(POWER));
    }

    #[test]
    fn overflowing_leaves_stay_symbolic() {
        let big = make_power(sym("x"), Node::leaf(2_000_000_000));
        assert!(big.as_leaf().is_some());

        let product = make_product([big.clone(), big.clone()]);
        assert_eq!(product.function_name(), None);
        let Node::Product { factors, coefficient } = &product else {
            panic!("expected a product, got {:?}", product);
        };
        assert_eq!(factors, &vec![big.clone()]);
        assert_eq!(Some(coefficient), big.as_leaf());

        // three equal leaves: the two that cannot fold merge into a power
        let product = make_product([big.clone(), big.clone(), big.clone()]);
        let Node::Product { factors, .. } = &product else {
            panic!("expected a product, got {:?}", product);
        };
        assert_eq!(factors, &vec![make_power(big, Node::leaf(2))]);
    }

    #[test]
    fn order_insensitive_arguments() {
        let mut registry = FunctionRegistry::with_builtins();
        registry.register(FunctionDef::new("max", 2).order_insensitive());
        registry.register(FunctionDef::new("pair", 2));

        let ab = make_binary_in(&registry, "max", [sym("a"), sym("b")]);
        let ba = make_binary_in(&registry, "max", [sym("b"), sym("a")]);
        assert_eq!(ab, ba);

        let ab = make_binary_in(&registry, "pair", [sym("a"), sym("b")]);
        let ba = make_binary_in(&registry, "pair", [sym("b"), sym("a")]);
        assert_ne!(ab, ba);
    }

    #[test]
    fn nary_arity() {
        assert!(matches!(make_nary("f", vec![sym("x")]), Node::Unary { .. }));
        assert!(matches!(make_nary("f", vec![sym("x"), sym("y")]), Node::Binary { .. }));
        assert!(matches!(make_nary("f", vec![sym("x"), sym("y"), sym("z")]), Node::NAry { .. }));
    }
}
