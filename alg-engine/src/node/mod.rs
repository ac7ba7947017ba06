//! The expression tree.
//!
//! A [`Node`] is an immutable tree of sums, products, fractions, and function calls over exact
//! [`Value`]s. Nodes are only ever built through the combinators in this module ([`make_sum`],
//! [`make_product`], [`make_fraction`], etc.), which keep every tree in **canonical form**:
//!
//! - sums and products never directly contain [`Node::Leaf`]s; they are folded into the
//! [`Node::Sum`]'s offset or the [`Node::Product`]'s coefficient,
//! - sums never directly contain sums, and products never directly contain products,
//! - sums and products have at least one child,
//! - the children of sums and products are sorted with the canonical comparator (see
//! [`compare`](crate::compare)), and no two children compare equal. Like terms in a sum are
//! merged by adding their coefficients, and equal bases in a product are merged by adding their
//! exponents.
//!
//! Powers are represented as the binary function `exp(base, exponent)`.
//!
//! Canonical form makes structural equality meaningful: `a + b` and `b + a` build the exact same
//! tree, so they compare and hash identically.

pub mod build;
pub mod error;
mod fmt;
pub mod iter;

pub use build::{
    make_binary,
    make_binary_in,
    make_fraction,
    make_nary,
    make_nary_in,
    make_power,
    make_product,
    make_sum,
    make_unary,
    negate,
};

use alg_value::{Monomial, Value};
use iter::{Children, NodeIter};
use std::collections::BTreeSet;

/// The name of the function used to represent powers, `exp(base, exponent)`.
pub const POWER: &str = "exp";

/// A node in an expression tree.
///
/// See the [module-level documentation](self) for the invariants upheld by canonical trees.
#[derive(Debug, Clone)]
pub enum Node {
    /// An exact value, such as `2`, `pi`, or `a^2 + b`.
    Leaf(Value),

    /// The sum of the terms and the offset.
    Sum {
        terms: Vec<Node>,
        offset: Value,
    },

    /// The product of the factors and the coefficient.
    Product {
        factors: Vec<Node>,
        coefficient: Value,
    },

    /// A fraction: the numerator divided by the denominator. The denominator is never the zero
    /// [`Node::Leaf`].
    Fraction(Box<Node>, Box<Node>),

    /// A call to a function with one argument, such as `sin(x)`.
    Unary {
        name: String,
        arg: Box<Node>,
    },

    /// A call to a function with two arguments, such as `exp(x, 2)`.
    Binary {
        name: String,
        args: Box<[Node; 2]>,
    },

    /// A call to a function with three or more arguments.
    NAry {
        name: String,
        args: Vec<Node>,
    },
}

impl Node {
    /// Creates a leaf node with the given value.
    pub fn leaf(value: impl Into<Value>) -> Self {
        Self::Leaf(value.into())
    }

    /// Creates a leaf node holding the given symbol.
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Leaf(Value::symbol(name))
    }

    /// Returns the zero leaf.
    pub fn zero() -> Self {
        Self::Leaf(Value::zero())
    }

    /// Returns the unit leaf.
    pub fn one() -> Self {
        Self::Leaf(Value::one())
    }

    /// Returns the value of this node if it is a [`Node::Leaf`].
    pub fn as_leaf(&self) -> Option<&Value> {
        match self {
            Self::Leaf(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true if this node is the zero leaf.
    pub fn is_zero(&self) -> bool {
        self.as_leaf().map_or(false, Value::is_zero)
    }

    /// Returns true if this node is the unit leaf.
    pub fn is_one(&self) -> bool {
        self.as_leaf().map_or(false, Value::is_one)
    }

    /// Returns the name of the function if this node is a function call.
    pub fn function_name(&self) -> Option<&str> {
        match self {
            Self::Unary { name, .. } | Self::Binary { name, .. } | Self::NAry { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the arguments if this node is a function call.
    pub fn args(&self) -> Option<&[Node]> {
        match self {
            Self::Unary { arg, .. } => Some(std::slice::from_ref(&**arg)),
            Self::Binary { args, .. } => Some(&args[..]),
            Self::NAry { args, .. } => Some(args),
            _ => None,
        }
    }

    /// If this node is a call to the given function with the given number of arguments, returns
    /// the arguments.
    pub fn as_call(&self, name: &str, arity: usize) -> Option<&[Node]> {
        self.function_name()
            .filter(|&n| n == name)
            .and(self.args())
            .filter(|args| args.len() == arity)
    }

    /// If this node is a power `exp(base, exponent)`, returns the base and exponent.
    pub fn as_power(&self) -> Option<(&Node, &Node)> {
        match self {
            Self::Binary { name, args } if name == POWER => Some((&args[0], &args[1])),
            _ => None,
        }
    }

    /// Returns true if this node is a function call.
    pub fn is_call(&self) -> bool {
        self.function_name().is_some()
    }

    /// Returns an iterator over the direct children of this node, from left to right.
    ///
    /// The values attached to leaves, sums, and products are not children.
    pub fn children(&self) -> Children<'_> {
        Children::new(self)
    }

    /// Returns an iterator that traverses the tree in left-to-right post-order (i.e.
    /// depth-first), starting with the leftmost leaf and ending with this node.
    pub fn post_order_iter(&self) -> NodeIter<'_> {
        NodeIter::new(self)
    }

    /// Returns the value attached directly to this node: the value of a leaf, the offset of a
    /// sum, or the coefficient of a product.
    pub fn attached_value(&self) -> Option<&Value> {
        match self {
            Self::Leaf(value) => Some(value),
            Self::Sum { offset, .. } => Some(offset),
            Self::Product { coefficient, .. } => Some(coefficient),
            _ => None,
        }
    }

    /// Returns the set of symbols referenced anywhere in the tree.
    pub fn symbols(&self) -> BTreeSet<String> {
        self.post_order_iter()
            .filter_map(Node::attached_value)
            .flat_map(Value::symbols)
            .map(str::to_string)
            .collect()
    }

    /// Returns the number of nodes in the tree. This is used as a rough measure of how complex
    /// an expression is.
    pub fn complexity(&self) -> usize {
        self.post_order_iter().count()
    }

    /// Splits this node into a coefficient and the rest of the term, so that like terms of a
    /// sum can be found. The coefficient of a [`Node::Product`] is its value coefficient; every
    /// other node has a coefficient of one.
    ///
    /// - `3*sin(x)` -> `(3, sin(x))`
    /// - `x*sin(x)*cos(x)` -> `(x, sin(x)*cos(x))`
    /// - `sin(x)` -> `(1, sin(x))`
    pub(crate) fn split_coefficient(&self) -> (Value, Node) {
        match self {
            Self::Product { factors, coefficient } => {
                let rest = if factors.len() == 1 {
                    factors[0].clone()
                } else {
                    Self::Product { factors: factors.clone(), coefficient: Value::one() }
                };
                (coefficient.clone(), rest)
            },
            _ => (Value::one(), self.clone()),
        }
    }

    /// Splits this node into a base and an exponent, so that equal bases in a product can be
    /// found. Nodes that are not powers have an exponent of one.
    pub(crate) fn split_power(&self) -> (Node, Node) {
        match self.as_power() {
            Some((base, exponent)) => (base.clone(), exponent.clone()),
            None => (self.clone(), Node::one()),
        }
    }

    /// Returns true if this node is a leaf holding a single symbol, such as `x`.
    pub(crate) fn is_plain_symbol(&self) -> bool {
        self.as_leaf()
            .and_then(Value::as_monomial)
            .map_or(false, |monomial| {
                let mut factors = monomial.factors();
                matches!((factors.next(), factors.next()), (Some((_, 1)), None))
            })
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Self::Leaf(value)
    }
}

impl From<Monomial> for Node {
    fn from(monomial: Monomial) -> Self {
        Self::Leaf(Value::from_term(1.into(), monomial))
    }
}
