//! Labels pointing at parts of an expression.

use serde::{Deserialize, Serialize};
use vexpr_source::Span;

/// How a label is underlined.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// `^^^` under the place evaluation stopped.
    Primary,
    /// `---` under related text, such as the `(` of a group left open.
    Secondary,
}

impl LabelStyle {
    /// Character repeated under the labelled text.
    pub fn mark(self) -> char {
        match self {
            LabelStyle::Primary => '^',
            LabelStyle::Secondary => '-',
        }
    }
}

/// A span of the expression annotated with a short message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// The span this label annotates.
    pub span: Span,
    /// The message displayed after the underline.
    pub message: String,
    /// Whether this is a primary or secondary label.
    pub style: LabelStyle,
}

impl Label {
    fn new(span: Span, message: impl Into<String>, style: LabelStyle) -> Self {
        Self {
            span,
            message: message.into(),
            style,
        }
    }

    /// Labels the span a diagnostic is reported at.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self::new(span, message, LabelStyle::Primary)
    }

    /// Labels related context elsewhere in the expression.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self::new(span, message, LabelStyle::Secondary)
    }
}
