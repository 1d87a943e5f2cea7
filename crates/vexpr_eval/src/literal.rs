//! Literal resolution.
//!
//! Decodes a single literal token into a [`Value`] together with the radix
//! it was written in:
//!
//! | Form | Example | Value | Radix |
//! |------|---------|-------|-------|
//! | decimal | `10_000` | `10000` | 10 |
//! | fixed-point | `0.240` | `Real(0.240)` | 10 |
//! | based | `8'hFF`, `'sd5`, `'2` | `255`, `5`, `2` | 16, 10, 10 |
//! | boolean | `TRUE`, `false` | `1`, `0` | 10 |
//! | string | `"abc"` | `Text("\"abc\"")` | 0 |
//!
//! The size of a based literal is kept as a width hint for `~`; it never
//! truncates the value. A value wider than its size draws a `W001` warning.

use crate::error::{EvalError, EvalResult};
use crate::token::TokenKind;
use crate::value::{Decimal, Value};
use num_bigint::BigInt;
use vexpr_diagnostics::{Diagnostic, DiagnosticCode, Label};
use vexpr_source::Span;

/// A decoded literal.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Literal {
    /// The literal's value.
    pub value: Value,
    /// 2, 8, 10 or 16 for numbers and booleans, 0 for strings.
    pub radix: u32,
    /// The size prefix of a based literal (`4` in `4'b0111`).
    pub width: Option<u32>,
}

impl Literal {
    fn new(value: Value, radix: u32) -> Self {
        Self {
            value,
            radix,
            width: None,
        }
    }

    /// A warning when the value needs more bits than the size prefix gives.
    /// `text` and `span` locate the literal.
    pub fn size_warning(&self, text: &str, span: Span) -> Option<Diagnostic> {
        let width = self.width?;
        let needed = match &self.value {
            Value::Integer(i) => i.bits(),
            _ => return None,
        };
        if needed <= u64::from(width) {
            return None;
        }
        Some(
            Diagnostic::warning(
                DiagnosticCode::OVERSIZED_LITERAL,
                format!("{text} does not fit in {}", bits(u64::from(width))),
                span,
            )
            .with_label(Label::primary(span, format!("sized to {}", bits(u64::from(width)))))
            .with_note(format!("the value needs {}", bits(needed))),
        )
    }
}

fn bits(n: u64) -> String {
    if n == 1 {
        "1 bit".to_string()
    } else {
        format!("{n} bits")
    }
}

/// Decodes the literal token `kind` whose source text is `text`.
pub fn resolve_literal(kind: TokenKind, text: &str, span: Span) -> EvalResult<Literal> {
    match kind {
        TokenKind::IntLiteral => {
            let value = parse_digits(text, 10)
                .ok_or_else(|| EvalError::lexical(format!("malformed integer '{text}'"), span))?;
            Ok(Literal::new(Value::Integer(value), 10))
        }
        TokenKind::RealLiteral => {
            let value = Decimal::parse(text)
                .ok_or_else(|| EvalError::lexical(format!("malformed real '{text}'"), span))?;
            Ok(Literal::new(Value::Real(value), 10))
        }
        TokenKind::BasedLiteral => resolve_based(text, span),
        TokenKind::StringLiteral => Ok(Literal::new(Value::Text(text.to_string()), 0)),
        TokenKind::Identifier => {
            if text.eq_ignore_ascii_case("true") {
                Ok(Literal::new(Value::int(1), 10))
            } else if text.eq_ignore_ascii_case("false") {
                Ok(Literal::new(Value::int(0), 10))
            } else {
                Err(EvalError::lexical(
                    format!("unknown identifier '{text}'"),
                    span,
                ))
            }
        }
        TokenKind::Error(reason) => Err(EvalError::lexical(reason.message(), span)),
        _ => Err(EvalError::syntax(
            format!("expected a literal, found '{text}'"),
            span,
        )),
    }
}

fn resolve_based(text: &str, span: Span) -> EvalResult<Literal> {
    let (size, rest) = text
        .split_once('\'')
        .ok_or_else(|| EvalError::lexical("based literal without apostrophe", span))?;

    let width = if size.is_empty() {
        None
    } else {
        let width = parse_digits(size, 10)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| EvalError::lexical(format!("size '{size}' is out of range"), span))?;
        if width == 0 {
            return Err(EvalError::lexical("literal size must be positive", span));
        }
        Some(width)
    };

    let rest = match rest.as_bytes().first() {
        Some(b's' | b'S') if rest.len() > 1 => &rest[1..],
        _ => rest,
    };
    let (radix, digits) = match rest.as_bytes().first().map(u8::to_ascii_lowercase) {
        Some(b'b') => (2, &rest[1..]),
        Some(b'o') => (8, &rest[1..]),
        Some(b'd') => (10, &rest[1..]),
        Some(b'h') => (16, &rest[1..]),
        _ => (10, rest),
    };

    if digits.bytes().all(|b| b == b'_') {
        return Err(EvalError::lexical("based literal has no digits", span));
    }
    if digits.bytes().any(|b| matches!(b, b'x' | b'X' | b'z' | b'Z' | b'?')) {
        return Err(EvalError::lexical(
            "unknown and high-impedance digits are not supported",
            span,
        ));
    }
    let value = parse_digits(digits, radix).ok_or_else(|| {
        EvalError::lexical(format!("'{digits}' is not a valid base-{radix} number"), span)
    })?;

    Ok(Literal {
        value: Value::Integer(value),
        radix,
        width,
    })
}

/// Parses unsigned digits in `radix`, skipping `_` separators.
fn parse_digits(text: &str, radix: u32) -> Option<BigInt> {
    let clean: Vec<u8> = text.bytes().filter(|&b| b != b'_').collect();
    if clean.is_empty() || !clean.iter().all(u8::is_ascii_alphanumeric) {
        return None;
    }
    BigInt::parse_bytes(&clean, radix)
}
