//! Token types for the expression lexer.
//!
//! Literal values are not stored in tokens; the literal resolver reads them
//! from the source text through the token's span.

use serde::{Deserialize, Serialize};
use vexpr_source::Span;

/// Why the lexer produced an [`TokenKind::Error`] token.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LexError {
    /// A `"` with no closing quote.
    UnterminatedString,
    /// A number running straight into letters, e.g. `12ab`.
    MalformedNumber,
    /// An apostrophe not followed by any digits or base letter.
    DanglingTick,
    /// `$` not followed by a name.
    MissingFunctionName,
    /// A character that starts no token.
    UnexpectedChar,
}

impl LexError {
    /// Human-readable description.
    pub fn message(self) -> &'static str {
        match self {
            LexError::UnterminatedString => "unterminated string literal",
            LexError::MalformedNumber => "malformed number",
            LexError::DanglingTick => "expected a based literal after '",
            LexError::MissingFunctionName => "expected a function name after '$'",
            LexError::UnexpectedChar => "unexpected character",
        }
    }
}

/// The kind of a lexed token.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TokenKind {
    // === Literals ===
    /// Decimal integer, `_` separators allowed: `42`, `10_000`
    IntLiteral,
    /// Fixed-point literal: `0.240`
    RealLiteral,
    /// Based literal with optional size and signedness: `8'hFF`, `'sd5`, `'2`
    BasedLiteral,
    /// Double-quoted text, quotes included in the span.
    StringLiteral,
    /// Bare word; only the boolean keywords are meaningful.
    Identifier,
    /// Function name: `$clog2`
    SystemIdentifier,

    // === Operators ===
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `**`
    Power,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `~`
    Tilde,
    /// `&`
    Amp,
    /// `&&`
    AmpAmp,
    /// `|`
    Pipe,
    /// `||`
    PipePipe,
    /// `^`
    Caret,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,

    // === Punctuation ===
    /// `?`
    Question,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,

    // === Special ===
    /// Unlexable input; the payload says why.
    Error(LexError),
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns `true` for tokens that carry a literal value.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::RealLiteral
                | TokenKind::BasedLiteral
                | TokenKind::StringLiteral
                | TokenKind::Identifier
        )
    }

    /// Returns `true` for numeric literal tokens (the ones a sign may precede
    /// in a plain value).
    pub fn is_number(self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral | TokenKind::RealLiteral | TokenKind::BasedLiteral
        )
    }
}

/// A token with its kind and location.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Token {
    /// What was lexed.
    pub kind: TokenKind,
    /// Where it was lexed.
    pub span: Span,
}

impl Token {
    /// Returns the text this token covers, or `""` if the span does not
    /// lie within `source`.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.span.start as usize..self.span.end as usize)
            .unwrap_or("")
    }
}
