//! The function registry: the table of functions known to the engine.
//!
//! Each entry is keyed by the function's name and arity, so `exp(x)` and `exp(base, exponent)`
//! are separate entries. An entry records whether the function's arguments can be reordered,
//! which [`Builtin`] it corresponds to (if any), and an optional **fast path**: an exact
//! evaluator over [`Value`]s used by the simplifier to collapse calls with constant arguments,
//! such as `sin(pi/6) = 1/2`.
//!
//! A process-wide registry containing the built-in functions is available through [`global`]. It
//! is initialized on first use, and is read-only afterwards. Clients that need extra functions
//! everywhere can [`install`] an extended registry before the first use; clients that need them
//! locally can pass their own [`FunctionRegistry`] to
//! [`Parser::with_registry`](crate::parser::Parser::with_registry) and
//! [`Simplifier::with_registry`](crate::simplify::Simplifier::with_registry).

pub mod builtin;
pub mod error;
pub mod fast_path;

pub use builtin::Builtin;

use crate::node::Node;
use alg_error::Error;
use alg_value::Value;
use error::RegistryInitialized;
use levenshtein::levenshtein;
use once_cell::sync::OnceCell;
use std::{collections::BTreeMap, fmt, sync::Arc};

/// An exact evaluator for a function. Returns [`None`] if it does not apply to the given
/// arguments.
pub type FastPath = Arc<dyn Fn(&[Value]) -> Option<Value> + Send + Sync>;

/// An entry in a [`FunctionRegistry`].
#[derive(Clone)]
pub struct FunctionDef {
    /// The name of the function.
    pub name: String,

    /// The number of arguments the function takes.
    pub arity: usize,

    /// Whether the order of the arguments matters. If not, the arguments of calls to the
    /// function are sorted canonically.
    pub order_sensitive: bool,

    /// A short description of the function.
    pub description: String,

    /// The built-in function this entry corresponds to, if any. Numeric evaluation of calls to
    /// functions without one fails.
    pub builtin: Option<Builtin>,

    /// The exact evaluator for the function, if any.
    pub fast_path: Option<FastPath>,
}

impl FunctionDef {
    /// Creates an order-sensitive entry with no description, no built-in, and no fast path.
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
            order_sensitive: true,
            description: String::new(),
            builtin: None,
            fast_path: None,
        }
    }

    /// Marks the function's arguments as freely reorderable.
    pub fn order_insensitive(mut self) -> Self {
        self.order_sensitive = false;
        self
    }

    /// Sets the description of the function.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the built-in function this entry corresponds to.
    pub fn builtin(mut self, builtin: Builtin) -> Self {
        self.builtin = Some(builtin);
        self
    }

    /// Sets the exact evaluator of the function.
    pub fn fast_path<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> Option<Value> + Send + Sync + 'static,
    {
        self.fast_path = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .field("order_sensitive", &self.order_sensitive)
            .field("description", &self.description)
            .field("builtin", &self.builtin)
            .field("fast_path", &self.fast_path.is_some())
            .finish()
    }
}

/// A table of functions, keyed by name and arity.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    entries: BTreeMap<(String, usize), FunctionDef>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry containing all of the [`Builtin`] functions.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for builtin in Builtin::ALL {
            registry.register(builtin.definition());
        }
        registry
    }

    /// Adds an entry to the registry, replacing and returning any existing entry with the same
    /// name and arity.
    pub fn register(&mut self, def: FunctionDef) -> Option<FunctionDef> {
        self.entries.insert((def.name.clone(), def.arity), def)
    }

    /// Returns the entry with the given name and arity.
    pub fn lookup(&self, name: &str, arity: usize) -> Option<&FunctionDef> {
        self.entries.get(&(name.to_string(), arity))
    }

    /// Returns true if there is an entry with the given name, of any arity.
    pub fn contains_name(&self, name: &str) -> bool {
        self.arities(name).next().is_some()
    }

    /// Returns the arities of the entries with the given name, in increasing order.
    pub fn arities<'a>(&'a self, name: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.entries.keys()
            .filter(move |(n, _)| n == name)
            .map(|(_, arity)| *arity)
    }

    /// Returns true if the function with the given name and arity is registered as
    /// order-insensitive. Unknown functions are order-sensitive.
    pub fn is_order_insensitive(&self, name: &str, arity: usize) -> bool {
        self.lookup(name, arity).map_or(false, |def| !def.order_sensitive)
    }

    /// Attempts to evaluate a call exactly using the function's fast path.
    ///
    /// Returns [`None`] unless every argument is a [`Node::Leaf`], the function has a fast path,
    /// and the fast path produces a result.
    pub fn try_fast_path(&self, name: &str, args: &[Node]) -> Option<Value> {
        let values = args.iter()
            .map(|arg| arg.as_leaf().cloned())
            .collect::<Option<Vec<_>>>()?;
        let fast_path = self.lookup(name, args.len())?.fast_path.as_ref()?;
        fast_path(&values)
    }

    /// Returns the names of registered functions that are similar to the given name, for use in
    /// "did you mean" suggestions. Each name is listed once.
    pub fn suggestions(&self, name: &str) -> Vec<&str> {
        let mut names = self.entries.keys()
            .map(|(n, _)| n.as_str())
            .filter(|n| levenshtein(n, name) < 2)
            .collect::<Vec<_>>();
        names.dedup();
        names
    }

    /// Returns an iterator over all entries, ordered by name and then arity.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionDef> {
        self.entries.values()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The process-wide registry.
static GLOBAL: OnceCell<FunctionRegistry> = OnceCell::new();

/// Returns the process-wide registry, initializing it with the built-in functions on first use.
pub fn global() -> &'static FunctionRegistry {
    GLOBAL.get_or_init(|| {
        let registry = FunctionRegistry::with_builtins();
        log::trace!("initialized global function registry with {} entries", registry.len());
        registry
    })
}

/// Installs the given registry as the process-wide registry.
///
/// This must happen before the first call to [`global`], including the implicit calls made by
/// parsing, building, rendering, and simplifying. Returns a [`RegistryInitialized`] error if the
/// process-wide registry is already initialized.
pub fn install(registry: FunctionRegistry) -> Result<(), Error> {
    let len = registry.len();
    GLOBAL.set(registry)
        .map_err(|_| Error::detached(RegistryInitialized))?;
    log::trace!("installed global function registry with {} entries", len);
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::node::make_unary;
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn lookup_by_name_and_arity() {
        let registry = FunctionRegistry::with_builtins();
        assert_eq!(registry.lookup("exp", 1).and_then(|def| def.builtin), Some(Builtin::Exp));
        assert_eq!(registry.lookup("exp", 2).and_then(|def| def.builtin), Some(Builtin::Pow));
        assert!(registry.lookup("sin", 2).is_none());
        assert!(registry.contains_name("ln"));
        assert!(!registry.contains_name("f"));
        assert_eq!(registry.arities("exp").collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn register_replaces() {
        let mut registry = FunctionRegistry::new();
        assert!(registry.register(FunctionDef::new("f", 1)).is_none());
        let old = registry.register(FunctionDef::new("f", 1).description("replacement"));
        assert!(old.is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("f", 1).map(|def| def.description.as_str()), Some("replacement"));
    }

    #[test]
    fn fast_path_needs_leaves() {
        let registry = FunctionRegistry::with_builtins();
        let half_pi = Value::symbol("pi").scale(&alg_value::primitive::rational(1, 2));
        assert_eq!(registry.try_fast_path("sin", &[Node::Leaf(half_pi)]), Some(Value::one()));
        assert_eq!(registry.try_fast_path("sin", &[make_unary("cos", Node::symbol("x"))]), None);
        assert_eq!(registry.try_fast_path("f", &[Node::one()]), None);
    }

    #[test]
    fn custom_fast_path() {
        let mut registry = FunctionRegistry::new();
        registry.register(FunctionDef::new("double", 1).fast_path(|args: &[Value]| {
            Some(&args[0] + &args[0])
        }));
        assert_eq!(registry.try_fast_path("double", &[Node::leaf(4)]), Some(Value::from(8)));
    }

    #[test]
    fn similar_names() {
        let registry = FunctionRegistry::with_builtins();
        assert_eq!(registry.suggestions("sinn"), vec!["sin"]);
        assert_eq!(registry.suggestions("exq"), vec!["exp"]);
        assert!(registry.suggestions("zzzzzz").is_empty());
    }

    #[test]
    fn global_has_builtins() {
        assert!(global().contains_name("sin"));
        assert!(install(FunctionRegistry::new()).unwrap_err().is::<RegistryInitialized>());
    }
}
