//! Byte-offset ranges within expression text.

use crate::expr_id::ExprId;
use serde::{Deserialize, Serialize};

/// A byte offset range within one expression.
///
/// The `start` is inclusive and `end` is exclusive. Tokens, evaluation errors,
/// and diagnostics all carry spans so a failure can be pointed at precisely.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The expression this span belongs to.
    pub expr: ExprId,
    /// Byte offset of the start of the span (inclusive).
    pub start: u32,
    /// Byte offset of the end of the span (exclusive).
    pub end: u32,
}

impl Span {
    /// A dummy span used when no source location is available.
    pub const DUMMY: Span = Span {
        expr: ExprId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a new span in the given expression with the given byte range.
    pub fn new(expr: ExprId, start: u32, end: u32) -> Self {
        Self { expr, start, end }
    }

    /// Merges two spans of the same expression into one covering both.
    ///
    /// # Panics
    ///
    /// Panics if the two spans belong to different expressions.
    pub fn merge(self, other: Span) -> Span {
        assert_eq!(
            self.expr, other.expr,
            "cannot merge spans from different expressions"
        );
        Span {
            expr: self.expr,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns the length of this span in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` if this span has zero length.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if this span is not backed by a registered expression.
    pub fn is_dummy(&self) -> bool {
        self.expr == ExprId::DUMMY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construct() {
        let e = ExprId::from_raw(0);
        let s = Span::new(e, 3, 9);
        assert_eq!(s.expr, e);
        assert_eq!(s.start, 3);
        assert_eq!(s.end, 9);
    }

    #[test]
    fn merge_spans() {
        let e = ExprId::from_raw(0);
        let m = Span::new(e, 5, 15).merge(Span::new(e, 10, 25));
        assert_eq!((m.start, m.end), (5, 25));
    }

    #[test]
    fn merge_order_independent() {
        let e = ExprId::from_raw(0);
        let a = Span::new(e, 0, 2);
        let b = Span::new(e, 4, 7);
        assert_eq!(a.merge(b), b.merge(a));
    }

    #[test]
    #[should_panic(expected = "different expressions")]
    fn merge_across_expressions_panics() {
        let a = Span::new(ExprId::from_raw(0), 0, 1);
        let b = Span::new(ExprId::from_raw(1), 0, 1);
        let _ = a.merge(b);
    }

    #[test]
    fn len_and_empty() {
        let e = ExprId::from_raw(0);
        assert_eq!(Span::new(e, 10, 20).len(), 10);
        assert!(Span::new(e, 5, 5).is_empty());
    }

    #[test]
    fn dummy_span() {
        assert!(Span::DUMMY.is_dummy());
        assert!(!Span::new(ExprId::from_raw(0), 0, 0).is_dummy());
    }

    #[test]
    fn serde_roundtrip() {
        let s = Span::new(ExprId::from_raw(1), 10, 20);
        let json = serde_json::to_string(&s).unwrap();
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
