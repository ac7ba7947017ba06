use ariadne::Fmt;
use alg_attrs::ErrorKind;
use alg_error::{ErrorKind, EXPR};

/// A symbol has no value in the scope, and is not a constant of the numeric type.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined", name),
    help = format!("give it a value, as in: {} = {}", name.fg(EXPR), "<number>".fg(EXPR)),
)]
pub struct UnboundSymbol {
    /// The name of the symbol.
    pub name: String,
}

/// An operation is undefined for the value it was applied to, such as `ln(-1)` over the reals,
/// or a division by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is undefined for the given value", operation),
    note = "the operation may be defined for other numeric types; for example, `ln(-1)` has a complex value",
)]
pub struct DomainError {
    /// The operation or function that failed.
    pub operation: String,
}

/// A function is not in the registry, or it has no numeric definition.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` function cannot be evaluated", name),
    help = if suggestions.is_empty() {
        "only functions in the registry can be evaluated".to_string()
    } else if suggestions.len() == 1 {
        format!("did you mean the `{}` function?", (&*suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these functions? {}",
            suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    },
)]
pub struct UndefinedFunction {
    /// The name of the function.
    pub name: String,

    /// Registered functions with similar names.
    pub suggestions: Vec<String>,
}
