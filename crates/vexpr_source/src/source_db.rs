//! Database of the expressions evaluated in one session.

use crate::expr_id::ExprId;
use crate::resolved_span::ResolvedSpan;
use crate::source_expr::SourceExpr;
use crate::span::Span;

/// Owns all registered expression text and resolves [`Span`]s to
/// line/column coordinates for diagnostics.
pub struct SourceDb {
    exprs: Vec<SourceExpr>,
}

impl SourceDb {
    /// Creates an empty source database.
    pub fn new() -> Self {
        Self { exprs: Vec::new() }
    }

    /// Registers an expression under a display name and returns its [`ExprId`].
    pub fn add_expr(&mut self, name: impl Into<String>, text: impl Into<String>) -> ExprId {
        let id = ExprId::from_index(self.exprs.len());
        self.exprs.push(SourceExpr::new(id, name.into(), text.into()));
        id
    }

    /// Returns the [`SourceExpr`] for the given id, if it is registered.
    pub fn get(&self, id: ExprId) -> Option<&SourceExpr> {
        self.exprs.get(id.index()?)
    }

    /// Returns the number of registered expressions.
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    /// Returns `true` if no expressions are registered.
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    /// Resolves a [`Span`] to the line and column it is printed at. A span
    /// running over several lines is cut at the end of its first line.
    ///
    /// Returns `None` for dummy spans and spans of unknown expressions.
    pub fn resolve_span(&self, span: Span) -> Option<ResolvedSpan> {
        let expr = self.get(span.expr)?;
        let (line, byte_col) = expr.line_col(span.start);
        let line_start = span.start - (byte_col - 1);
        let line_len = u32::try_from(expr.line_text(span.start).len()).unwrap_or(u32::MAX);
        let line_end = line_start.saturating_add(line_len);
        let before = expr.snippet(line_start, span.start);
        let covered = expr.snippet(span.start, span.end.min(line_end));
        Some(ResolvedSpan {
            name: expr.name.clone(),
            line,
            column: char_count(before).saturating_add(1),
            width: char_count(covered).max(1),
        })
    }

    /// Returns the text covered by a [`Span`], or `""` if it cannot be resolved.
    pub fn snippet(&self, span: Span) -> &str {
        match self.get(span.expr) {
            Some(expr) => expr.snippet(span.start, span.end),
            None => "",
        }
    }
}

fn char_count(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}
