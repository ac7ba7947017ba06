use alg_engine::{
    node::{make_binary_in, make_fraction, make_nary_in, make_power, make_product, make_sum, make_unary, negate, Node},
    FunctionDef,
    FunctionRegistry,
};
use once_cell::sync::Lazy;
use proptest::prelude::*;

/// The built-in functions, plus order-insensitive `max` and `mean` that the global registry does
/// not know about.
pub static REGISTRY: Lazy<FunctionRegistry> = Lazy::new(|| {
    let mut registry = FunctionRegistry::with_builtins();
    registry.register(FunctionDef::new("max", 2).order_insensitive());
    registry.register(FunctionDef::new("mean", 3).order_insensitive());
    registry
});

/// Canonical trees over a few symbols and small integers, built with the node combinators.
///
/// Besides the built-in functions, the trees contain calls to `f` and `g`, which are not
/// registered anywhere, and to `max` and `mean` from [`REGISTRY`].
pub fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        (-10i32..10).prop_map(Node::leaf),
        prop::sample::select(vec!["a", "b", "x"]).prop_map(Node::symbol),
        Just(Node::symbol("pi")),
    ];

    leaf.prop_recursive(
        4, // levels deep
        48, // max size
        4, // items per collection
        |inner| prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| make_sum([l, r])),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| make_sum([l, negate(r)])),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| make_product([l, r])),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| make_fraction(l.clone(), r).unwrap_or(l)),
            (inner.clone(), -2i32..4).prop_map(|(base, exp)| make_power(base, Node::leaf(exp))),
            inner.clone().prop_map(|arg| make_unary("sin", arg)),
            inner.clone().prop_map(|arg| make_unary("cos", arg)),
            inner.clone().prop_map(|arg| make_unary("ln", arg)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| make_binary_in(&REGISTRY, "f", [l, r])),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| make_binary_in(&REGISTRY, "max", [l, r])),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(a, b, c)| make_nary_in(&REGISTRY, "g", vec![a, b, c])),
            (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(a, b, c)| make_nary_in(&REGISTRY, "mean", vec![a, b, c])),
        ]
    )
}
