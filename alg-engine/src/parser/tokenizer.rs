//! Tokenizer for the algebraic notation, built on [`logos`].

use logos::{Lexer, Logos};
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    Mul,

    #[token("/")]
    Div,

    #[token("^")]
    Exp,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    /// Marks a call to a function that the registry does not know, as in `f_(x)`.
    #[token("_")]
    CallMarker,

    #[regex(r"[a-zA-Z][a-zA-Z0-9]*")]
    Name,

    /// A number. This is deliberately loose (`1.2.3` is one token) so that malformed numbers are
    /// reported by the literal parser.
    #[regex(r"[0-9][0-9.]*")]
    Number,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Returns true if a token of this kind can begin a factor, which allows it to follow
    /// another factor with implicit multiplication.
    pub fn starts_factor(self) -> bool {
        matches!(self, TokenKind::Name | TokenKind::Number | TokenKind::OpenParen)
    }

    /// Returns a human-readable description of the token kind.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Add => "`+`",
            TokenKind::Sub => "`-`",
            TokenKind::Mul => "`*`",
            TokenKind::Div => "`/`",
            TokenKind::Exp => "`^`",
            TokenKind::Comma => "`,`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::CallMarker => "`_`",
            TokenKind::Name => "a name",
            TokenKind::Number => "a number",
            TokenKind::Symbol => "a symbol",
        }
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the non-whitespace tokens produced by the tokenizer.
/// This allows the parser to look ahead and backtrack.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        // every character matches `Symbol`, so the lexer cannot fail
        let Ok(kind) = result else { continue };
        if kind.is_whitespace() {
            continue;
        }
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<const N: usize>(input: &str, expected: [(TokenKind, &str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "1 + 2",
            [
                (TokenKind::Number, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Number, "2"),
            ],
        );
    }

    #[test]
    fn implicit_and_marked_calls() {
        compare_tokens(
            "2x f_(y1) $",
            [
                (TokenKind::Number, "2"),
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "f"),
                (TokenKind::CallMarker, "_"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "y1"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
            ],
        );
    }

    #[test]
    fn malformed_number_is_one_token() {
        compare_tokens("1.2.3", [(TokenKind::Number, "1.2.3")]);
    }

    #[test]
    fn whitespace_is_dropped() {
        let tokens = tokenize_complete(" a ^ 2 ");
        let kinds = tokens.iter().map(|token| token.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![TokenKind::Name, TokenKind::Exp, TokenKind::Number]);
        assert_eq!(tokens[1].span, 3..4);
    }
}
