//! Lexical analysis of expression text: dominant radix and plain-value
//! detection. Neither function evaluates the expression.

use crate::lexer::lex;
use crate::literal::resolve_literal;
use crate::token::{Token, TokenKind};
use vexpr_source::ExprId;

/// Returns the greatest radix among the literals in `expression`: 16, 10, 8
/// or 2. Strings count as 0, so an expression with only string literals (or
/// no literals at all) yields 0.
///
/// Malformed literals are skipped; the expression does not need to be valid.
pub fn base_for_expression(expression: &str) -> u32 {
    lex(expression, ExprId::from_raw(0))
        .iter()
        .filter(|token| token.kind.is_literal())
        .filter_map(|token| {
            resolve_literal(token.kind, token.text(expression), token.span).ok()
        })
        .map(|literal| literal.radix)
        .max()
        .unwrap_or(0)
}

/// Returns `true` if `expression` is a single literal: an optionally signed
/// number, a boolean keyword or a string. Empty text also counts.
///
/// `-99999999999999` is plain; `(8 + 2)` and `1+1` are not.
pub fn is_plain_value(expression: &str) -> bool {
    let trimmed = expression.trim();
    let tokens = lex(trimmed, ExprId::from_raw(0));
    let body = match tokens.split_last() {
        Some((last, body)) if last.kind == TokenKind::Eof => body,
        _ => return false,
    };

    match body {
        [] => true,
        [literal] => resolves(trimmed, literal),
        [sign, number] => {
            matches!(sign.kind, TokenKind::Plus | TokenKind::Minus)
                && number.kind.is_number()
                && sign.span.end == number.span.start
                && resolves(trimmed, number)
        }
        _ => false,
    }
}

fn resolves(source: &str, token: &Token) -> bool {
    token.kind.is_literal() && resolve_literal(token.kind, token.text(source), token.span).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- base_for_expression ----

    #[test]
    fn greatest_base_wins() {
        assert_eq!(base_for_expression("'b01 + 'o1 + 'h01 + 'd1"), 16);
        assert_eq!(base_for_expression("'b01 + 'o1"), 8);
        assert_eq!(base_for_expression("'b01 + 1"), 10);
        assert_eq!(base_for_expression("4'b0111"), 2);
        assert_eq!(base_for_expression("12.5"), 10);
    }

    #[test]
    fn strings_and_empty() {
        assert_eq!(base_for_expression("\"text\""), 0);
        assert_eq!(base_for_expression(""), 0);
        assert_eq!(base_for_expression("\"a\" == \"b\""), 0);
        assert_eq!(base_for_expression("{\"a\", 'hF}"), 16);
    }

    #[test]
    fn booleans_are_decimal() {
        assert_eq!(base_for_expression("TRUE"), 10);
        assert_eq!(base_for_expression("'b1 && false"), 10);
    }

    #[test]
    fn invalid_expressions_still_report_a_base() {
        assert_eq!(base_for_expression("'hF / 0"), 16);
        assert_eq!(base_for_expression("'b1 +"), 2);
        assert_eq!(base_for_expression("'b102 + 'o7"), 8);
    }

    // ---- is_plain_value ----

    #[test]
    fn plain_values() {
        for text in [
            "",
            "   ",
            "0",
            "-99999999999999",
            "+5",
            "8'hFF",
            "-'d3",
            "1.5",
            "true",
            "FALSE",
            "\"text\"",
            "  42  ",
        ] {
            assert!(is_plain_value(text), "{text:?} should be plain");
        }
    }

    #[test]
    fn computed_values() {
        for text in [
            "(8 + 2)",
            "(8)",
            "1+1",
            "- 5",
            "--5",
            "-true",
            "{1}",
            "$clog2(4)",
            "~1",
            "'b102",
            "foo",
            "\"open",
        ] {
            assert!(!is_plain_value(text), "{text:?} should not be plain");
        }
    }
}
