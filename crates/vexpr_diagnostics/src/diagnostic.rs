//! Structured diagnostic messages.

use crate::code::DiagnosticCode;
use crate::label::Label;
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use vexpr_source::Span;

/// A structured report about one expression.
///
/// Each diagnostic has a severity, a code, a message and the span where the
/// problem was found. Labels, notes and help lines add context when rendered.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the kind of problem.
    pub code: DiagnosticCode,
    /// The main diagnostic message.
    pub message: String,
    /// The span where the problem was detected.
    pub primary_span: Span,
    /// Additional annotated spans.
    pub labels: Vec<Label>,
    /// Explanatory footnotes.
    pub notes: Vec<String>,
    /// Actionable suggestions.
    pub help: Vec<String>,
}

impl Diagnostic {
    fn new(severity: Severity, code: DiagnosticCode, message: String, span: Span) -> Self {
        Self {
            severity,
            code,
            message,
            primary_span: span,
            labels: Vec::new(),
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a new error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Error, code, message.into(), span)
    }

    /// Creates a new warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::new(Severity::Warning, code, message.into(), span)
    }

    /// Adds a label to this diagnostic.
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_error() {
        let diag = Diagnostic::error(DiagnosticCode::SYNTAX, "unexpected ')'", Span::DUMMY);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.message, "unexpected ')'");
        assert_eq!(diag.code.to_string(), "E102");
    }

    #[test]
    fn create_warning() {
        let diag = Diagnostic::warning(
            DiagnosticCode::OVERSIZED_LITERAL,
            "3'o11 does not fit in 3 bits",
            Span::DUMMY,
        )
        .with_note("the value needs 4 bits");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.code.to_string(), "W001");
        assert_eq!(diag.notes, vec!["the value needs 4 bits".to_string()]);
    }

    #[test]
    fn builder_methods() {
        let diag = Diagnostic::error(DiagnosticCode::SYNTAX, "expected ')'", Span::DUMMY)
            .with_label(Label::primary(Span::DUMMY, "expression ends or breaks here"))
            .with_label(Label::secondary(Span::DUMMY, "group opened here"))
            .with_help("close the group with ')'");
        assert_eq!(diag.labels.len(), 2);
        assert!(diag.notes.is_empty());
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn serializes_to_json() {
        let diag = Diagnostic::error(DiagnosticCode::LEXICAL, "bad digit", Span::DUMMY);
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["message"], "bad digit");
        assert_eq!(json["severity"], "Error");
    }
}
