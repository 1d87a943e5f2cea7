//! Expression text management, span tracking, and location resolution for diagnostics.
//!
//! This crate provides the [`SourceDb`] for holding the expressions submitted
//! in one session, [`ExprId`] and [`Span`] types for tracking byte ranges inside
//! them, and [`ResolvedSpan`] for converting byte offsets to human-readable
//! line/column coordinates for rendering.

#![warn(missing_docs)]

pub mod expr_id;
pub mod resolved_span;
pub mod source_db;
pub mod source_expr;
pub mod span;

pub use expr_id::ExprId;
pub use resolved_span::ResolvedSpan;
pub use source_db::SourceDb;
pub use source_expr::SourceExpr;
pub use span::Span;
