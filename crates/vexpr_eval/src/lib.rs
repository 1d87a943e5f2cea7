//! Evaluator for SystemVerilog-style constant expressions.
//!
//! Expressions are the kind written into parameter, register and field
//! definitions of hardware descriptions: sized and based literals
//! (`8'hFF`, `'b1010`), fixed-point reals, strings, arrays and a handful of
//! `$` functions, combined with the usual arithmetic, bitwise, logical and
//! conditional operators. The main entry point is [`parse_expression`],
//! which returns the canonical result text and a validity flag.
//!
//! # Architecture
//!
//! - **Lexer** ([`lexer`]): converts expression text to tokens.
//! - **Literals** ([`literal`]): decodes one literal token into a value and radix.
//! - **Values** ([`value`]): exact integers and fixed-point decimals.
//! - **Evaluator**: a Pratt parser that computes values as it parses.
//! - **Analysis**: radix detection and plain-value classification, both
//!   purely lexical.
//!
//! Every function here is pure; expressions may be evaluated from any number
//! of threads at once.

#![warn(missing_docs)]

mod analysis;
mod arith;
/// Evaluation errors and their diagnostic codes.
pub mod error;
mod eval;
mod functions;
/// Lexical analyzer for expression text.
pub mod lexer;
/// Literal token decoding.
pub mod literal;
mod options;
/// Token types for the expression lexer.
pub mod token;
/// Integer and fixed-point values.
pub mod value;

pub use analysis::{base_for_expression, is_plain_value};
pub use arith::BinaryOp;
pub use error::{ErrorKind, EvalError, EvalResult};
pub use functions::Builtin;
pub use options::EvalOptions;
pub use token::{Token, TokenKind};
pub use value::{Decimal, Value};

use vexpr_diagnostics::{Diagnostic, DiagnosticSink};
use vexpr_source::{ExprId, Span};

/// The result text reported for an invalid expression.
pub const INVALID_RESULT: &str = "x";

/// Longest expression text, in bytes, that can be evaluated. Spans hold
/// 32-bit offsets.
pub const MAX_EXPRESSION_LEN: usize = u32::MAX as usize;

/// Evaluates `expression` with default options.
///
/// Returns the canonical text of the result and whether the expression is
/// valid. Empty input is valid and yields the empty string; invalid input
/// yields [`INVALID_RESULT`].
///
/// ```
/// use vexpr_eval::parse_expression;
///
/// assert_eq!(parse_expression("'hA + 'b1010 + 'o12 + 10"), ("40".to_string(), true));
/// assert_eq!(parse_expression("1/0"), ("x".to_string(), false));
/// ```
pub fn parse_expression(expression: &str) -> (String, bool) {
    match evaluate(expression, EvalOptions::default()) {
        Ok(Some(value)) => (value.to_string(), true),
        Ok(None) => (String::new(), true),
        Err(_) => (INVALID_RESULT.to_string(), false),
    }
}

/// Evaluates `expression` into a typed [`Value`].
///
/// Returns `Ok(None)` for empty input (including input made only of empty
/// parentheses such as `(())`).
pub fn evaluate(expression: &str, options: EvalOptions) -> EvalResult<Option<Value>> {
    evaluate_in(expression, ExprId::from_raw(0), options).0
}

/// Evaluates and also returns the warnings raised along the way.
fn evaluate_in(
    source: &str,
    expr: ExprId,
    options: EvalOptions,
) -> (EvalResult<Option<Value>>, Vec<Diagnostic>) {
    if let Err(err) = check_length(source.len(), expr) {
        return (Err(err), Vec::new());
    }
    let tokens = lexer::lex(source, expr);
    if eval::is_blank(&tokens) {
        return (Ok(None), Vec::new());
    }
    let (result, warnings) = eval::Evaluator::new(tokens, source, options).evaluate();
    (result.map(Some), warnings)
}

fn check_length(len: usize, expr: ExprId) -> EvalResult<()> {
    match u32::try_from(len) {
        Ok(_) => Ok(()),
        Err(_) => Err(EvalError::limit(
            format!("expression is {len} bytes long, more than {MAX_EXPRESSION_LEN}"),
            Span::new(expr, 0, 0),
        )),
    }
}

/// A successfully evaluated expression.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Evaluation {
    /// The result, or `None` for empty input.
    pub value: Option<Value>,
    /// Canonical result text, as returned by [`parse_expression`].
    pub text: String,
    /// Greatest literal radix, as returned by [`base_for_expression`].
    pub base: u32,
    /// Whether the expression is a single literal, see [`is_plain_value`].
    pub plain: bool,
}

/// Evaluates the expression `expr` whose text is `source`, reporting a
/// failure to `sink` as an error [`Diagnostic`] whose spans point into
/// `expr`. Warnings, such as a sized literal too wide for its size, are
/// emitted whether or not evaluation succeeds.
///
/// Returns `None` if the expression is invalid.
pub fn evaluate_with_sink(
    source: &str,
    expr: ExprId,
    options: EvalOptions,
    sink: &DiagnosticSink,
) -> Option<Evaluation> {
    let (result, warnings) = evaluate_in(source, expr, options);
    for warning in warnings {
        sink.emit(warning);
    }
    match result {
        Ok(value) => Some(Evaluation {
            text: value.as_ref().map(Value::to_string).unwrap_or_default(),
            value,
            base: base_for_expression(source),
            plain: is_plain_value(source),
        }),
        Err(err) => {
            sink.emit(err.to_diagnostic());
            None
        }
    }
}
