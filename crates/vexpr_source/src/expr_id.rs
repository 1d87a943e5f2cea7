//! Identifiers for expressions registered in a [`SourceDb`](crate::SourceDb).

use serde::{Deserialize, Serialize};

/// Identifies one expression held by the [`SourceDb`](crate::SourceDb).
///
/// Ids are handed out in registration order, so sorting by id puts
/// diagnostics from a batch back into file order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct ExprId(u32);

impl ExprId {
    /// Marks spans of text evaluated outside any database. Never handed out
    /// by [`SourceDb::add_expr`](crate::SourceDb::add_expr).
    pub const DUMMY: ExprId = ExprId(u32::MAX);

    /// Creates an `ExprId` from a raw `u32` value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` value of this `ExprId`.
    pub fn as_raw(self) -> u32 {
        self.0
    }

    /// The id of the `index`-th registered expression, or [`ExprId::DUMMY`]
    /// once the id space is exhausted.
    pub(crate) fn from_index(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(raw) if raw != u32::MAX => Self(raw),
            _ => Self::DUMMY,
        }
    }

    /// Position in registration order; `None` for [`ExprId::DUMMY`].
    pub(crate) fn index(self) -> Option<usize> {
        if self == Self::DUMMY {
            None
        } else {
            usize::try_from(self.0).ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_order_sorts() {
        let mut ids = vec![ExprId::from_index(2), ExprId::from_index(0), ExprId::from_index(1)];
        ids.sort();
        assert_eq!(ids, vec![ExprId::from_raw(0), ExprId::from_raw(1), ExprId::from_raw(2)]);
    }

    #[test]
    fn dummy_has_no_index() {
        assert_eq!(ExprId::DUMMY.index(), None);
        assert_eq!(ExprId::from_raw(7).index(), Some(7));
        assert_eq!(ExprId::from_index(u32::MAX as usize), ExprId::DUMMY);
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_string(&ExprId::from_raw(7)).unwrap();
        assert_eq!(json, "7");
        let back: ExprId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ExprId::from_raw(7));
    }
}
