//! The kinds of syntax errors reported by the [`Parser`](super::Parser).

use ariadne::Fmt;
use alg_attrs::ErrorKind;
use alg_error::{ErrorKind, EXPR};
use super::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unexpected {}", found.describe()),
    labels = [format!("expected {} here", expected)],
)]
pub struct UnexpectedToken {
    /// A description of what was expected.
    pub expected: &'static str,

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed parenthesis",
    labels = ["this parenthesis is not closed"],
    help = if *opening {
        "add a closing parenthesis `)` somewhere after this"
    } else {
        "add an opening parenthesis `(` somewhere before this"
    },
)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

/// An argument of a function call is missing, as in `f()` or `f(x,)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing argument in call to `{}`", name),
    labels = ["add an argument here"],
)]
pub struct EmptyArgument {
    /// The name of the function being called.
    pub name: String,
}

/// A function call was not closed with `)`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unterminated call to `{}`", name),
    labels = ["this call is never closed"],
    help = "add a closing parenthesis `)` after the last argument",
)]
pub struct UnterminatedCall {
    /// The name of the function being called.
    pub name: String,
}

/// A literal could not be parsed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid literal: {}", message),
    labels = ["here"],
)]
pub struct InvalidLiteral {
    /// The reason the literal is invalid.
    pub message: String,
}

/// A registered function was called with a number of arguments it has no entry for.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("wrong number of arguments to `{}`", name),
    labels = [format!("this call has {} argument{}", given, if *given == 1 { "" } else { "s" })],
    help = format!(
        "`{}` takes {} argument(s)",
        name,
        expected.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" or "),
    ),
)]
pub struct ArgumentCount {
    /// The name of the function being called.
    pub name: String,

    /// The number of arguments given.
    pub given: usize,

    /// The numbers of arguments the function accepts.
    pub expected: Vec<usize>,
}
