//! Spans resolved to the line and column a terminal shows them at.

use std::fmt;

/// Where a span appears when its expression is printed.
///
/// Lines and columns are 1-indexed. Columns count characters, not bytes, so
/// an underline built with [`ResolvedSpan::underline`] lines up under
/// non-ASCII text. Produced by
/// [`SourceDb::resolve_span`](crate::SourceDb::resolve_span).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// Display name of the expression, e.g. `params.txt:12` or `<arg 1>`.
    pub name: String,
    /// Line the span starts on.
    pub line: u32,
    /// Column of the first character.
    pub column: u32,
    /// Characters covered on the starting line, at least 1.
    pub width: u32,
}

impl ResolvedSpan {
    /// Indentation followed by `width` copies of `mark`.
    pub fn underline(&self, mark: char) -> String {
        let indent = self.column.saturating_sub(1) as usize;
        let mut out = " ".repeat(indent);
        out.extend(std::iter::repeat(mark).take(self.width as usize));
        out
    }
}

impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.name, self.line, self.column)
    }
}
