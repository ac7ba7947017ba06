//! A symbolic algebra engine.
//!
//! Expressions are parsed from a small algebraic notation into immutable, canonically ordered
//! trees ([`Node`]), which can then be simplified with a configurable set of rewrite rules, and
//! evaluated into floating-point, complex, or exact numbers.
//!
//! ```
//! use alg_engine::Expression;
//!
//! let expr: Expression = "b*a + a*b + 2*3".parse().unwrap();
//! assert_eq!(expr.to_text(), "2*a*b + 6");
//!
//! let expr: Expression = "sin(x)^2 + cos(x)^2 + ln(1)".parse().unwrap();
//! assert_eq!(expr.simplify().to_text(), "1");
//! ```
//!
//! Functions are described by a [`FunctionRegistry`]. Unless another registry is
//! [installed](registry::install) before first use, the global registry contains the built-in
//! functions listed in [`Builtin`].

pub mod compare;
pub mod eval;
pub mod expression;
pub mod node;
pub mod parser;
pub mod registry;
pub mod simplify;

pub use eval::{evaluate, Numeric, Scope};
pub use expression::Expression;
pub use node::Node;
pub use registry::{Builtin, FunctionDef, FunctionRegistry};
pub use simplify::{Simplifier, SimplifyOptions, SimplifyOptionsBuilder};
