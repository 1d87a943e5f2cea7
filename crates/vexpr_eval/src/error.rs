//! Evaluation errors.
//!
//! Every way an expression can fail is an [`EvalError`]. Operators return
//! [`EvalResult`] and failures propagate outward with `?`, so a single bad
//! sub-expression invalidates everything that encloses it.

use serde::{Deserialize, Serialize};
use vexpr_diagnostics::{Diagnostic, DiagnosticCode, Label};
use vexpr_source::Span;

/// Result alias used throughout the evaluator.
pub type EvalResult<T> = Result<T, EvalError>;

/// The stage at which an expression was rejected.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed or unterminated literal, or a character outside the language.
    Lexical,
    /// Tokens that do not form an expression: unmatched groups, dangling operators.
    Syntax,
    /// A well-formed expression whose value is undefined, e.g. division by zero.
    Semantic,
    /// A configured resource guard (depth, shift, exponent, result size) or
    /// the expression length limit was exceeded.
    Limit,
}

impl ErrorKind {
    /// The diagnostic code reported for this kind.
    pub fn code(self) -> DiagnosticCode {
        match self {
            ErrorKind::Lexical => DiagnosticCode::LEXICAL,
            ErrorKind::Syntax => DiagnosticCode::SYNTAX,
            ErrorKind::Semantic => DiagnosticCode::SEMANTIC,
            ErrorKind::Limit => DiagnosticCode::LIMIT,
        }
    }
}

/// Why and where an expression failed to evaluate.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    /// The failure category.
    pub kind: ErrorKind,
    /// Human-readable reason.
    pub message: String,
    /// The part of the expression responsible.
    pub span: Span,
    /// The opening `(` or `{` when the error is a missing closing delimiter.
    pub opened_at: Option<Span>,
}

impl EvalError {
    /// Creates an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            opened_at: None,
        }
    }

    /// Creates a [`ErrorKind::Lexical`] error.
    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Lexical, message, span)
    }

    /// Creates a [`ErrorKind::Syntax`] error.
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Syntax, message, span)
    }

    /// Creates a [`ErrorKind::Semantic`] error.
    pub fn semantic(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Semantic, message, span)
    }

    /// Creates a [`ErrorKind::Limit`] error.
    pub fn limit(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::Limit, message, span)
    }

    /// Re-anchors an error raised without location information.
    pub(crate) fn at(mut self, span: Span) -> Self {
        if self.span.is_dummy() {
            self.span = span;
        }
        self
    }

    /// Records the delimiter a failed closing `expect` was matching. Only
    /// syntax errors raised at the closing position are marked.
    pub(crate) fn unclosed(mut self, open: Span) -> Self {
        if self.kind == ErrorKind::Syntax && self.opened_at.is_none() {
            self.opened_at = Some(open);
        }
        self
    }

    /// Converts this error into an error-severity [`Diagnostic`].
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.code(), self.message.clone(), self.span)
            .with_label(Label::primary(self.span, label_for(self.kind)));
        if let Some(open) = self.opened_at {
            diag = diag.with_label(Label::secondary(open, "opened here"));
        }
        match self.kind {
            ErrorKind::Limit => {
                diag.with_help("raise the limit in the [eval] section of vexpr.toml")
            }
            _ => diag,
        }
    }
}

fn label_for(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Lexical => "not a valid token",
        ErrorKind::Syntax => "expression ends or breaks here",
        ErrorKind::Semantic => "cannot be evaluated",
        ErrorKind::Limit => "limit exceeded",
    }
}
