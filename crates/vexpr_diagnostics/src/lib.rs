//! Structured reporting on evaluated expressions.
//!
//! Evaluation failures (`E1xx`) and warnings about expressions that evaluate
//! but look suspicious (`W0xx`) are turned into [`Diagnostic`] values
//! carrying a [`DiagnosticCode`], a severity and a span into the expression.
//! The thread-safe [`DiagnosticSink`] collects them while expressions are
//! evaluated (possibly in parallel), and [`TerminalRenderer`] prints them.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod label;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use label::{Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
