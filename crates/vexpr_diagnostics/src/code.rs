//! Diagnostic codes identifying why an expression was rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Errors that make an expression invalid, prefixed with `E`.
    Error,
    /// Advisory findings on otherwise valid input, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A structured diagnostic code: category prefix plus a 3-digit number.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// A character or literal the tokenizer could not accept.
    pub const LEXICAL: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);
    /// Tokens that do not form an expression.
    pub const SYNTAX: DiagnosticCode = DiagnosticCode::new(Category::Error, 102);
    /// A well-formed expression whose value cannot be computed.
    pub const SEMANTIC: DiagnosticCode = DiagnosticCode::new(Category::Error, 103);
    /// A resource limit from the evaluation options was exceeded.
    pub const LIMIT: DiagnosticCode = DiagnosticCode::new(Category::Error, 104);
    /// A sized literal whose value needs more bits than its size prefix.
    pub const OVERSIZED_LITERAL: DiagnosticCode = DiagnosticCode::new(Category::Warning, 1);

    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
