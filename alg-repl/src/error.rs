use ariadne::Fmt;
use alg_attrs::ErrorKind;
use alg_error::{ErrorKind, EXPR};

/// The line starts with `:`, but names no known command.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `{}`", name),
    labels = ["this command"],
    help = format!("type {} to list the available commands", ":help".fg(EXPR)),
)]
pub struct UnknownCommand {
    /// The name of the command, without the leading `:`.
    pub name: String,
}

/// A command that needs an expression was given none.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `:{}` command needs an expression", name),
    labels = ["add an expression after the command"],
)]
pub struct MissingExpression {
    /// The name of the command.
    pub name: String,
}

/// A binding after `where` is not of the form `name = expression`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid binding",
    labels = ["this binding"],
    help = format!("bindings look like: {}", "where a = 1, b = 2".fg(EXPR)),
)]
pub struct InvalidBinding;
