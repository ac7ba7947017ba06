//! Parser for the algebraic notation.
//!
//! The grammar, from lowest to highest precedence:
//!
//! ```text
//! expr  := term (('+' | '-') term)*
//! term  := unary (('*' | '/') unary | <implicit> power)*
//! unary := ('-' | '+') unary | power
//! power := factor ('^' unary)?
//! factor := '(' expr ')' | call | literal
//! call  := NAME '_'? '(' expr (',' expr)* ')'
//! ```
//!
//! `NAME (` is a function call if the name is in the function registry (with any arity), or if
//! the name is followed by the `_` marker, as in `f_(x)`. Otherwise, it is implicit
//! multiplication: `x(y + 1)` is `x*(y + 1)`. Implicit multiplication also applies between any
//! two adjacent factors, as in `2x` or `2(x + 1)`.
//!
//! The parser builds canonical [`Node`]s directly, so `a + b` and `b + a` parse into the same
//! tree.

pub mod error;
pub mod tokenizer;

use crate::{
    node::{
        build::make_nary_in,
        make_fraction,
        make_power,
        make_product,
        make_sum,
        make_unary,
        negate,
        Node,
    },
    registry::{self, FunctionRegistry},
};
use alg_error::{Error, ErrorKind};
use alg_value::Value;
use error::{
    ArgumentCount,
    EmptyArgument,
    ExpectedEof,
    InvalidLiteral,
    UnclosedParenthesis,
    UnexpectedEof,
    UnexpectedToken,
    UnterminatedCall,
};
use std::ops::Range;
use tokenizer::{tokenize_complete, Token, TokenKind};

/// Parses the given text into a [`Node`], using the global function registry to decide which
/// names are functions.
pub fn parse(text: &str) -> Result<Node, Error> {
    Parser::new(text).parse_full()
}

/// A recursive descent parser for the algebraic notation.
#[derive(Debug, Clone)]
pub struct Parser<'source, 'r> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,

    /// The length of the source code.
    source_len: usize,

    /// The registry used to decide which names are functions.
    registry: &'r FunctionRegistry,
}

impl<'source> Parser<'source, 'static> {
    /// Create a new parser for the given source, using the global function registry.
    pub fn new(source: &'source str) -> Self {
        Self::with_registry(source, registry::global())
    }
}

impl<'source, 'r> Parser<'source, 'r> {
    /// Create a new parser for the given source, using the given function registry.
    pub fn with_registry(source: &'source str, registry: &'r FunctionRegistry) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
            source_len: source.len(),
            registry,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    fn eof_span(&self) -> Range<usize> {
        self.source_len..self.source_len
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the end of the previous token, or zero at the beginning of the stream.
    fn prev_end(&self) -> usize {
        self.cursor.checked_sub(1)
            .and_then(|idx| self.tokens.get(idx))
            .map_or(0, |token| token.span.end)
    }

    /// Returns the current token without moving the cursor. Returns [`None`] at the end of the
    /// stream.
    fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Returns the kind of the token `offset` tokens ahead of the cursor.
    fn peek_kind(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.cursor + offset).map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor.
    ///
    /// Returns an EOF error if there are no more tokens.
    fn next_token(&mut self) -> Result<Token<'source>, Error> {
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(UnexpectedEof)),
        }
    }

    /// Speculatively parses a value with the given parsing function, backtracking the cursor if
    /// parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and the error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses an expression. All the tokens must be consumed by the parser; if not, an error is
    /// returned.
    pub fn parse_full(&mut self) -> Result<Node, Error> {
        let node = self.try_parse_with_fn(Self::parse_expr)?;
        match self.current_token() {
            None => Ok(node),
            Some(token) if token.kind == TokenKind::CloseParen => {
                Err(self.error(UnclosedParenthesis { opening: false }))
            },
            Some(token) => Err(Error::new(vec![token.span.start..self.source_len], ExpectedEof)),
        }
    }

    /// `expr := term (('+' | '-') term)*`
    fn parse_expr(&mut self) -> Result<Node, Error> {
        let mut lhs = self.parse_term()?;
        loop {
            match self.peek_kind(0) {
                Some(TokenKind::Add) => {
                    self.cursor += 1;
                    let rhs = self.parse_term()?;
                    lhs = make_sum([lhs, rhs]);
                },
                Some(TokenKind::Sub) => {
                    self.cursor += 1;
                    let rhs = self.parse_term()?;
                    lhs = make_sum([lhs, negate(rhs)]);
                },
                _ => return Ok(lhs),
            }
        }
    }

    /// `term := unary (('*' | '/') unary | <implicit> power)*`
    fn parse_term(&mut self) -> Result<Node, Error> {
        let mut lhs = self.parse_unary()?;
        loop {
            match self.peek_kind(0) {
                Some(TokenKind::Mul) => {
                    self.cursor += 1;
                    let rhs = self.parse_unary()?;
                    lhs = make_product([lhs, rhs]);
                },
                Some(TokenKind::Div) => {
                    let start = self.span().start;
                    self.cursor += 1;
                    let rhs = self.parse_unary()?;
                    let span = start..self.prev_end();
                    lhs = make_fraction(lhs, rhs)
                        .map_err(|err| Error { spans: vec![span], kind: err.kind })?;
                },
                Some(kind) if kind.starts_factor() => {
                    let rhs = self.parse_power()?;
                    lhs = make_product([lhs, rhs]);
                },
                _ => return Ok(lhs),
            }
        }
    }

    /// `unary := ('-' | '+') unary | power`
    fn parse_unary(&mut self) -> Result<Node, Error> {
        match self.peek_kind(0) {
            Some(TokenKind::Sub) => {
                self.cursor += 1;
                Ok(negate(self.parse_unary()?))
            },
            Some(TokenKind::Add) => {
                self.cursor += 1;
                self.parse_unary()
            },
            _ => self.parse_power(),
        }
    }

    /// `power := factor ('^' unary)?`
    ///
    /// The exponent is parsed with [`Parser::parse_unary`], which makes `^` right-associative
    /// and allows negative exponents, such as in `x^-1`.
    fn parse_power(&mut self) -> Result<Node, Error> {
        let base = self.parse_factor()?;
        if self.peek_kind(0) == Some(TokenKind::Exp) {
            self.cursor += 1;
            let exponent = self.parse_unary()?;
            Ok(make_power(base, exponent))
        } else {
            Ok(base)
        }
    }

    /// `factor := '(' expr ')' | call | literal`
    fn parse_factor(&mut self) -> Result<Node, Error> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::OpenParen => self.parse_paren(token),
            TokenKind::Name => {
                match (self.peek_kind(0), self.peek_kind(1)) {
                    (Some(TokenKind::CallMarker), Some(TokenKind::OpenParen)) => {
                        self.cursor += 2;
                        self.parse_call(token)
                    },
                    (Some(TokenKind::OpenParen), _) if self.registry.contains_name(token.lexeme) => {
                        self.cursor += 1;
                        self.parse_call(token)
                    },
                    _ => Self::parse_literal(&token),
                }
            },
            TokenKind::Number => Self::parse_literal(&token),
            found => Err(Error::new(vec![token.span], UnexpectedToken {
                expected: "an expression",
                found,
            })),
        }
    }

    /// Parses the rest of a parenthesized expression, after the opening parenthesis.
    fn parse_paren(&mut self, open: Token<'source>) -> Result<Node, Error> {
        if self.peek_kind(0) == Some(TokenKind::CloseParen) {
            return Err(self.error(UnexpectedToken {
                expected: "an expression",
                found: TokenKind::CloseParen,
            }));
        }

        let inner = self.parse_expr()?;
        match self.peek_kind(0) {
            Some(TokenKind::CloseParen) => {
                self.cursor += 1;
                Ok(inner)
            },
            Some(found) => Err(self.error(UnexpectedToken { expected: "`)`", found })),
            None => Err(Error::new(vec![open.span], UnclosedParenthesis { opening: true })),
        }
    }

    /// Parses the arguments of a function call, after the opening parenthesis.
    fn parse_call(&mut self, name_token: Token<'source>) -> Result<Node, Error> {
        let name = name_token.lexeme;
        let call_start = name_token.span.start;
        let mut args = Vec::new();

        loop {
            match self.peek_kind(0) {
                Some(TokenKind::Comma | TokenKind::CloseParen) => {
                    return Err(self.error(EmptyArgument { name: name.to_string() }));
                },
                None => {
                    return Err(Error::new(
                        vec![call_start..self.prev_end()],
                        UnterminatedCall { name: name.to_string() },
                    ));
                },
                _ => (),
            }

            args.push(self.parse_expr()?);

            match self.peek_kind(0) {
                Some(TokenKind::Comma) => self.cursor += 1,
                Some(TokenKind::CloseParen) => {
                    self.cursor += 1;
                    break;
                },
                Some(found) => {
                    return Err(self.error(UnexpectedToken { expected: "`,` or `)`", found }));
                },
                None => {
                    return Err(Error::new(
                        vec![call_start..self.prev_end()],
                        UnterminatedCall { name: name.to_string() },
                    ));
                },
            }
        }

        if self.registry.contains_name(name) && self.registry.lookup(name, args.len()).is_none() {
            return Err(Error::new(vec![call_start..self.prev_end()], ArgumentCount {
                name: name.to_string(),
                given: args.len(),
                expected: self.registry.arities(name).collect(),
            }));
        }

        Ok(match args.len() {
            1 => make_unary(name, args.remove(0)),
            _ => make_nary_in(self.registry, name, args),
        })
    }

    /// Parses a number or symbol with the literal parser of [`Value`].
    /// Parses a literal, reporting a failure at the offending character of the literal.
    fn parse_literal(token: &Token<'source>) -> Result<Node, Error> {
        token.lexeme.parse::<Value>()
            .map(Node::Leaf)
            .map_err(|err| {
                let width = token.lexeme.get(err.offset..)
                    .and_then(|rest| rest.chars().next())
                    .map_or(1, char::len_utf8);
                let start = (token.span.start + err.offset).min(token.span.end);
                Error::new(vec![start..start + width], InvalidLiteral { message: err.message })
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::FunctionDef;
    use crate::node::error::DivisionByZero;
    use alg_value::primitive::rational;
    use pretty_assertions::assert_eq;
    use super::*;

    fn sym(name: &str) -> Node {
        Node::symbol(name)
    }

    #[test]
    fn constant_folding() {
        assert_eq!(parse("2 + 3").unwrap(), Node::leaf(5));
        assert_eq!(parse("2 * 3").unwrap(), Node::leaf(6));
        assert_eq!(parse("2.5").unwrap(), Node::leaf(rational(5, 2)));
        assert_eq!(parse("2^10").unwrap(), Node::leaf(1024));
        assert_eq!(parse("1/2 + 1/3").unwrap(), Node::leaf(rational(5, 6)));
    }

    #[test]
    fn commutative() {
        assert_eq!(parse("a+b").unwrap(), parse("b+a").unwrap());
        assert_eq!(parse("a*b").unwrap(), parse("b*a").unwrap());
        assert_eq!(parse("sin(x) + cos(y)").unwrap(), parse("cos(y) + sin(x)").unwrap());
        assert_eq!(parse("sin(x) * cos(y)").unwrap(), parse("cos(y) * sin(x)").unwrap());
    }

    #[test]
    fn precedence() {
        assert_eq!(parse("2^3^2").unwrap(), Node::leaf(512));
        assert_eq!(parse("-2^2").unwrap(), Node::leaf(-4));
        assert_eq!(parse("(-2)^2").unwrap(), Node::leaf(4));
        assert_eq!(parse("1 + 2 * 3").unwrap(), Node::leaf(7));
        assert_eq!(parse("8/2/2").unwrap(), Node::leaf(2));
        assert_eq!(parse("x^-1").unwrap(), Node::leaf(Value::symbol("x").checked_recip().unwrap()));
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(parse("2x").unwrap(), parse("2*x").unwrap());
        assert_eq!(parse("x(y+1)").unwrap(), parse("x*(y+1)").unwrap());
        assert_eq!(parse("2(x+1)").unwrap(), parse("2*(x+1)").unwrap());
        assert_eq!(parse("2 sin(x)").unwrap(), parse("2*sin(x)").unwrap());
    }

    #[test]
    fn calls() {
        assert_eq!(parse("sin(x)").unwrap(), make_unary("sin", sym("x")));
        assert_eq!(parse("f_(x)").unwrap(), make_unary("f", sym("x")));
        assert!(matches!(parse("g_(x, y)").unwrap(), Node::Binary { .. }));
        assert!(matches!(parse("h_(x, y, z)").unwrap(), Node::NAry { .. }));
        assert_eq!(parse("exp(x, y)").unwrap().as_power().map(|(b, _)| b.clone()), Some(sym("x")));
    }

    #[test]
    fn binary_exp_is_a_power() {
        assert_eq!(parse("exp(x, 2)").unwrap(), parse("x^2").unwrap());
        assert_eq!(parse("exp(sin(x), 1)").unwrap(), parse("sin(x)").unwrap());
        assert_eq!(parse("exp(sin(x), 1) * 1").unwrap(), parse("exp(sin(x), 1)").unwrap());
        assert_eq!(parse("exp(2, 3)").unwrap(), parse("2^3").unwrap());
        assert_eq!(parse("exp(sin(x), 2)").unwrap(), parse("sin(x)^2").unwrap());
    }

    #[test]
    fn oversized_constants() {
        let product = parse("x^2000000000 * x^2000000000").unwrap();
        assert_eq!(product.to_string(), "x^2000000000*x^2000000000");
        assert_eq!(parse(&product.to_string()).unwrap(), product);

        let power = parse("2^2147483647").unwrap();
        assert!(power.as_power().is_some());
        assert!(parse("(2^2147483647)^2147483647").unwrap().as_power().is_some());
        assert!(parse("(a+b+c+d+e+f+g+h)^64").unwrap().as_power().is_some());

        // the reciprocal of x^-2147483648 does not fit, so the fraction is kept
        assert!(matches!(parse("1/(x^-2147483647*x^-1)").unwrap(), Node::Fraction(..)));
    }

    #[test]
    fn local_registry() {
        let mut registry = FunctionRegistry::with_builtins();
        registry.register(FunctionDef::new("f", 1));

        let node = Parser::with_registry("f(x)", &registry).parse_full().unwrap();
        assert_eq!(node, make_unary("f", sym("x")));

        // with the global registry, `f` is not a function
        assert_eq!(parse("f(x)").unwrap(), parse("f*x").unwrap());
    }

    #[test]
    fn unterminated_call() {
        let err = parse("sin(x").unwrap_err();
        assert!(err.is::<UnterminatedCall>());
        assert_eq!(err.spans, vec![0..5]);
    }

    #[test]
    fn parenthesis_errors() {
        let err = parse("(x + 1").unwrap_err();
        assert!(err.is::<UnclosedParenthesis>());
        assert_eq!(err.offset(), Some(0));

        let err = parse("x + 1)").unwrap_err();
        assert_eq!(err.downcast_ref::<UnclosedParenthesis>(), Some(&UnclosedParenthesis { opening: false }));
        assert_eq!(err.offset(), Some(5));
    }

    #[test]
    fn empty_arguments() {
        assert!(parse("f_()").unwrap_err().is::<EmptyArgument>());
        let err = parse("sin(x,)").unwrap_err();
        assert!(err.is::<EmptyArgument>());
        assert_eq!(err.offset(), Some(6));
    }

    #[test]
    fn unexpected_tokens() {
        let err = parse("* x").unwrap_err();
        assert_eq!(err.downcast_ref::<UnexpectedToken>().map(|e| e.found), Some(TokenKind::Mul));
        assert_eq!(err.offset(), Some(0));

        assert!(parse("").unwrap_err().is::<UnexpectedEof>());
        assert!(parse("x +").unwrap_err().is::<UnexpectedEof>());
        assert!(parse("x $").unwrap_err().is::<ExpectedEof>());
    }

    #[test]
    fn invalid_literal() {
        let err = parse("x + 1.2.3").unwrap_err();
        assert_eq!(
            err.downcast_ref::<InvalidLiteral>(),
            Some(&InvalidLiteral { message: "a number can only have one decimal point".to_string() }),
        );
        assert_eq!(err.spans, vec![7..8]);
        assert_eq!(err.offset(), Some(7));
    }

    #[test]
    fn argument_count() {
        let err = parse("sin(x, y)").unwrap_err();
        let kind = err.downcast_ref::<ArgumentCount>().unwrap();
        assert_eq!(kind.given, 2);
        assert_eq!(kind.expected, vec![1]);
    }

    #[test]
    fn division_by_zero() {
        let err = parse("1/0").unwrap_err();
        assert!(err.is::<DivisionByZero>());
        assert_eq!(err.spans, vec![1..3]);
        assert!(parse("x/(y - y)").unwrap_err().is::<DivisionByZero>());
    }
}
