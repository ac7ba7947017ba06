//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type that pairs a kind with the source regions it points at.
//!
//! Errors raised while parsing carry the spans of the offending tokens. Errors raised while
//! building or evaluating expression trees have no source text to point at, and carry no spans;
//! their reports consist of the message and help text only.

// derived `ErrorKind` impls refer to `alg_error::EXPR`
#[cfg(test)]
extern crate self as alg_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually derived with `#[derive(ErrorKind)]` from the `alg-attrs` crate.
pub trait ErrorKind: Debug + Send + Sync {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;

    /// Returns the headline message of the error, without any source annotations.
    fn message(&self) -> String;

    /// Returns `self` as [`Any`], so that callers can inspect the concrete kind.
    fn as_any(&self) -> &dyn Any;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from. This is empty for errors
    /// that did not originate from source code.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that is not associated with any source code.
    pub fn detached(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Returns the byte offset of the start of the first span, if there is one.
    pub fn offset(&self) -> Option<usize> {
        self.spans.first().map(|span| span.start)
    }

    /// Returns the headline message of the error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Returns true if the error is of the given kind.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns a reference to the error kind if it is of the given type.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr, highlighting the given source code.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) {
        // a failure to write to stderr leaves nowhere else to report to
        let _ = self.build_report(src_id).eprint((src_id, Source::from(input)));
    }

    /// Renders the report for this error into a string, including ANSI color codes.
    pub fn report_to_string(&self, src_id: &str, input: &str) -> String {
        let mut buf = Vec::new();
        if self.build_report(src_id).write((src_id, Source::from(input)), &mut buf).is_err() {
            return self.message();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset() {
            Some(offset) => write!(f, "{} (at offset {})", self.message(), offset),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for Error {}
