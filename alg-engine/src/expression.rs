//! A user-facing handle to an expression tree.

use alg_error::Error;
use alg_value::Value;
use crate::{
    eval::{self, Numeric, Scope},
    node::{make_fraction, make_product, make_sum, negate, Node},
    parser,
    simplify::Simplifier,
};
use once_cell::sync::OnceCell;
use std::{collections::BTreeSet, fmt, ops::{Add, Div, Mul, Neg, Sub}, str::FromStr};

/// An immutable expression.
///
/// [`Expression`] wraps a canonical [`Node`] and remembers its rendering, so that printing an
/// expression more than once only formats it once. Two expressions are equal if their trees
/// compare equal, which means `a + b` and `b + a` are the same expression.
///
/// ```
/// use alg_engine::Expression;
///
/// let expr: Expression = "sin(x)/cos(x) * cos(x)/sin(x)".parse().unwrap();
/// assert_eq!(expr.simplify().to_text(), "1");
/// ```
#[derive(Debug, Clone)]
pub struct Expression {
    node: Node,
    rendered: OnceCell<String>,
}

impl Expression {
    /// Creates an expression from a tree.
    pub fn from_node(node: Node) -> Self {
        Self { node, rendered: OnceCell::new() }
    }

    /// Creates an expression holding a single value.
    pub fn from_value(value: impl Into<Value>) -> Self {
        Self::from_node(Node::leaf(value))
    }

    /// Creates an expression holding a single symbol.
    pub fn from_symbol(name: impl Into<String>) -> Self {
        Self::from_node(Node::symbol(name))
    }

    /// Returns the underlying tree.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Consumes the expression, returning the underlying tree.
    pub fn into_node(self) -> Node {
        self.node
    }

    /// Returns the canonical rendering of the expression.
    pub fn to_text(&self) -> &str {
        self.rendered.get_or_init(|| self.node.to_string())
    }

    /// Returns the simplified expression, using the default options and the global registry.
    pub fn simplify(&self) -> Self {
        self.simplify_with(&Simplifier::default())
    }

    /// Returns the expression simplified by the given simplifier.
    pub fn simplify_with(&self, simplifier: &Simplifier) -> Self {
        Self::from_node(simplifier.simplify(&self.node))
    }

    /// Evaluates the expression, taking the values of symbols from the scope.
    ///
    /// ```
    /// use alg_engine::Expression;
    ///
    /// let expr: Expression = "(a + b)*(a - b)".parse().unwrap();
    /// let value: f64 = expr.evaluate(&[("a", 5.0), ("b", 3.0)]).unwrap();
    /// assert_eq!(value, 16.0);
    /// ```
    pub fn evaluate<N: Numeric>(&self, scope: &impl Scope<N>) -> Result<N, Error> {
        eval::evaluate(&self.node, scope)
    }

    /// Returns the symbols used in the expression, including constants such as `pi`.
    pub fn symbols(&self) -> BTreeSet<String> {
        self.node.symbols()
    }

    /// Divides this expression by another, returning an error if the divisor is zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, Error> {
        make_fraction(self.node.clone(), rhs.node.clone()).map(Self::from_node)
    }
}

impl From<Node> for Expression {
    fn from(node: Node) -> Self {
        Self::from_node(node)
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl FromStr for Expression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s).map(Self::from_node)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_text())
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for Expression {}

impl Add for Expression {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::from_node(make_sum([self.node, rhs.node]))
    }
}

impl Sub for Expression {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_node(make_sum([self.node, negate(rhs.node)]))
    }
}

impl Mul for Expression {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::from_node(make_product([self.node, rhs.node]))
    }
}

/// Division can fail, so the output is a [`Result`]. See [`Expression::checked_div`].
impl Div for Expression {
    type Output = Result<Self, Error>;

    fn div(self, rhs: Self) -> Self::Output {
        make_fraction(self.node, rhs.node).map(Self::from_node)
    }
}

impl Neg for Expression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_node(negate(self.node))
    }
}

#[cfg(test)]
mod tests {
    use crate::node::error::DivisionByZero;
    use crate::simplify::{SimplifyOptionsBuilder, Simplifier};
    use pretty_assertions::assert_eq;
    use super::*;

    fn expr(s: &str) -> Expression {
        s.parse().unwrap()
    }

    #[test]
    fn rendering_is_memoized() {
        let e = expr("b + a");
        assert_eq!(e.to_text(), "a + b");
        assert_eq!(e.to_text().as_ptr(), e.to_text().as_ptr());
        assert_eq!(e.to_string(), "a + b");
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(expr("a*b + c"), expr("c + b*a"));
        assert_ne!(expr("a - b"), expr("b - a"));
    }

    #[test]
    fn operators() {
        let x = Expression::from_symbol("x");
        let one = Expression::from_value(1);
        assert_eq!((x.clone() + one.clone()).to_text(), "x + 1");
        assert_eq!((x.clone() - x.clone()).to_text(), "0");
        assert_eq!((x.clone() * x.clone()).to_text(), "x^2");
        assert_eq!((-x.clone()).to_text(), "-x");
        assert_eq!((one.clone() / x.clone()).unwrap().to_text(), "1/x");
    }

    #[test]
    fn divide_by_zero() {
        let x = Expression::from_symbol("x");
        let err = x.checked_div(&Expression::from_value(0)).unwrap_err();
        assert!(err.is::<DivisionByZero>());
    }

    #[test]
    fn simplify() {
        assert_eq!(expr("2+3").simplify().into_node(), Node::leaf(5));
        assert_eq!(expr("sin(pi/6)").simplify().to_text(), "1/2");
        assert_eq!(expr("exp(ln(x))").simplify().to_text(), "x");
    }

    #[test]
    fn simplify_merging_fractions() {
        let simplifier = Simplifier::new(SimplifyOptionsBuilder::new().merge_fractions(true).build());
        let e = expr("a/(a+b) + b/(a+b)");
        assert_eq!(e.simplify_with(&simplifier).to_text(), "1");
        assert_ne!(e.simplify().to_text(), "1");
    }

    #[test]
    fn symbols() {
        let names = expr("x*sin(y) + pi").symbols();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), ["pi", "x", "y"]);
    }

    #[test]
    fn evaluate() {
        let e = expr("x^2 + 1");
        let value: f64 = e.evaluate(&[("x", 3.0)]).unwrap();
        assert_eq!(value, 10.0);
    }
}
