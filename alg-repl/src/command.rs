//! Parsing of the lines typed into the shell.

use alg_error::Error;
use crate::error::{InvalidBinding, MissingExpression, UnknownCommand};
use std::ops::Range;

/// An expression, along with its byte offset in the line it was typed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located<'a> {
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Located<'a> {
    fn new(line: &'a str, range: Range<usize>) -> Self {
        let text = &line[range.clone()];
        let trimmed = text.trim_start();
        Self {
            text: trimmed.trim_end(),
            offset: range.start + (text.len() - trimmed.len()),
        }
    }

    /// Moves the spans of an error raised while processing this text so that they point into the
    /// whole line.
    pub fn relocate(&self, mut err: Error) -> Error {
        for span in &mut err.spans {
            *span = span.start + self.offset..span.end + self.offset;
        }
        err
    }
}

/// A symbol bound to a value for evaluation, as in `where a = 5`.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding<'a> {
    pub name: &'a str,
    pub value: Located<'a>,
}

/// A command typed into the shell.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<'a> {
    /// Simplify the expression and print the result.
    Simplify(Located<'a>),

    /// Print the canonical form of the expression without simplifying it.
    Parse(Located<'a>),

    /// Simplify the expression, printing every step.
    Steps(Located<'a>),

    /// Evaluate the expression with floating-point numbers.
    Eval(Located<'a>, Vec<Binding<'a>>),

    /// Evaluate the expression exactly.
    Exact(Located<'a>, Vec<Binding<'a>>),

    /// List the registered functions.
    Funcs,

    /// Print the list of commands.
    Help,
}

/// Splits the text on the commas that are not inside parentheses.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (idx, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..idx]);
                start = idx + 1;
            },
            _ => (),
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Splits an expression from its `where` bindings.
fn parse_bindings<'a>(line: &'a str, range: Range<usize>) -> Result<(Located<'a>, Vec<Binding<'a>>), Error> {
    let text = &line[range.clone()];
    let Some(idx) = text.find(" where ") else {
        return Ok((Located::new(line, range), Vec::new()));
    };

    let expr = Located::new(line, range.start..range.start + idx);
    let mut bindings = Vec::new();
    let mut start = range.start + idx + " where ".len();
    for part in split_top_level(&line[start..range.end]) {
        let end = start + part.len();
        let (name, value) = part.split_once('=')
            .map(|(name, _)| {
                let eq = start + name.len();
                (Located::new(line, start..eq), Located::new(line, eq + 1..end))
            })
            .filter(|(name, value)| alg_value::is_symbol_name(name.text) && !value.text.is_empty())
            .ok_or_else(|| Error::new(vec![start..end], InvalidBinding))?;
        bindings.push(Binding { name: name.text, value });
        start = end + 1;
    }

    Ok((expr, bindings))
}

impl<'a> Command<'a> {
    /// Parses a line of input.
    pub fn parse(line: &'a str) -> Result<Self, Error> {
        let Some(rest) = line.trim_start().strip_prefix(':') else {
            return Ok(Command::Simplify(Located::new(line, 0..line.len())));
        };

        let name_start = line.len() - rest.len();
        let name_end = name_start + rest.find(char::is_whitespace).unwrap_or(rest.len());
        let name = &line[name_start..name_end];
        let args = name_end..line.len();

        let needs_expr = |located: Located<'a>| {
            if located.text.is_empty() {
                Err(Error::new(vec![name_start - 1..name_end], MissingExpression { name: name.to_string() }))
            } else {
                Ok(located)
            }
        };

        match name {
            "parse" => Ok(Command::Parse(needs_expr(Located::new(line, args))?)),
            "steps" => Ok(Command::Steps(needs_expr(Located::new(line, args))?)),
            "eval" | "exact" => {
                let (expr, bindings) = parse_bindings(line, args)?;
                let expr = needs_expr(expr)?;
                Ok(if name == "eval" {
                    Command::Eval(expr, bindings)
                } else {
                    Command::Exact(expr, bindings)
                })
            },
            "funcs" => Ok(Command::Funcs),
            "help" => Ok(Command::Help),
            _ => Err(Error::new(vec![name_start - 1..name_end], UnknownCommand { name: name.to_string() })),
        }
    }
}
