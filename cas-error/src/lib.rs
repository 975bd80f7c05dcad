//! Contains the common [`ErrorKind`] trait used by every user-facing error in the workspace, along
//! with a span-carrying [`Error`] type that can be rendered with [`ariadne`].
//!
//! Error kinds are usually plain structs that derive [`ErrorKind`] with the `cas_attrs` derive
//! macro; the derived implementation builds a report whose labels point at the spans stored in
//! the surrounding [`Error`].

use ariadne::{Color, Report, Source};
use std::{fmt::Debug, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send + Sync {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error against the given source text, without colors.
    ///
    /// This is mostly useful for logging, where the output is not a terminal.
    pub fn render(&self, src_id: &str, input: &str) -> String {
        let mut buf = Vec::new();
        let report = self.build_report(src_id);
        if report.write((src_id, Source::from(input)), &mut buf).is_err() {
            return format!("{:?}", self.kind);
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Report this error to stderr.
    ///
    /// The [`Report`] type does not implement `Display`, so its `eprint` method is the only way
    /// to print it with colors.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) {
        // a failure to write to stderr leaves nowhere else to report to
        let _ = self.build_report(src_id).eprint((src_id, Source::from(input)));
    }
}
