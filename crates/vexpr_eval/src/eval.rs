//! Pratt evaluator.
//!
//! Parses the token stream by operator precedence and computes each
//! sub-expression as soon as its operands are known; no syntax tree is built.
//!
//! | BP (L,R) | Operators |
//! |----------|-----------|
//! | (1,2)    | `\|\|` |
//! | (3,4)    | `&&` |
//! | (5,6)    | `\|` |
//! | (7,8)    | `^` |
//! | (9,10)   | `&` |
//! | (11,12)  | `==` `!=` |
//! | (13,14)  | `<` `<=` `>` `>=` |
//! | (15,16)  | `<<` `>>` |
//! | (17,18)  | `+` `-` |
//! | (19,20)  | `*` `/` `%` |
//! | (22,21)  | `**` (right-assoc) |
//! | prefix 23 | `+` `-` `~` |
//!
//! Ternary `? :` is handled as a special case at min_bp=0 (right-associative).
//! Both branches are always evaluated, so an error in the branch not taken
//! still invalidates the result.

use crate::arith::{self, BinaryOp, Limits};
use crate::error::{EvalError, EvalResult};
use crate::functions::Builtin;
use crate::literal::resolve_literal;
use crate::options::EvalOptions;
use crate::token::{Token, TokenKind};
use crate::value::Value;
use vexpr_diagnostics::Diagnostic;
use vexpr_source::Span;

const PREFIX_BP: u8 = 23;

/// Binding power for binary operators. Returns (left_bp, right_bp).
fn infix_binding_power(op: BinaryOp) -> (u8, u8) {
    match op {
        BinaryOp::LogOr => (1, 2),
        BinaryOp::LogAnd => (3, 4),
        BinaryOp::BitOr => (5, 6),
        BinaryOp::BitXor => (7, 8),
        BinaryOp::BitAnd => (9, 10),
        BinaryOp::Eq | BinaryOp::Neq => (11, 12),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => (13, 14),
        BinaryOp::Shl | BinaryOp::Shr => (15, 16),
        BinaryOp::Add | BinaryOp::Sub => (17, 18),
        BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => (19, 20),
        BinaryOp::Pow => (22, 21), // right-associative
    }
}

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::PipePipe => BinaryOp::LogOr,
        TokenKind::AmpAmp => BinaryOp::LogAnd,
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Amp => BinaryOp::BitAnd,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::BangEq => BinaryOp::Neq,
        TokenKind::Less => BinaryOp::Lt,
        TokenKind::LessEq => BinaryOp::Le,
        TokenKind::Greater => BinaryOp::Gt,
        TokenKind::GreaterEq => BinaryOp::Ge,
        TokenKind::ShiftLeft => BinaryOp::Shl,
        TokenKind::ShiftRight => BinaryOp::Shr,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::Power => BinaryOp::Pow,
        _ => return None,
    };
    Some(op)
}

/// Returns `true` if the tokens are nothing but balanced, properly nested
/// parentheses (including no tokens at all). Such input evaluates to the
/// empty result.
pub(crate) fn is_blank(tokens: &[Token]) -> bool {
    let mut open = 0usize;
    for token in tokens {
        match token.kind {
            TokenKind::LeftParen => open += 1,
            TokenKind::RightParen => match open.checked_sub(1) {
                Some(n) => open = n,
                None => return false,
            },
            TokenKind::Eof => break,
            _ => return false,
        }
    }
    open == 0
}

/// A computed sub-expression.
struct Operand {
    value: Value,
    span: Span,
    /// Size prefix when the operand is a single sized literal, possibly
    /// parenthesized.
    width: Option<u32>,
}

impl Operand {
    fn new(value: Value, span: Span) -> Self {
        Self {
            value,
            span,
            width: None,
        }
    }
}

/// Evaluates one token stream.
///
/// The `tokens` must have been lexed from `source` and end with
/// [`TokenKind::Eof`].
pub(crate) struct Evaluator<'src> {
    tokens: Vec<Token>,
    pos: usize,
    source: &'src str,
    options: EvalOptions,
    depth: u32,
    warnings: Vec<Diagnostic>,
}

impl<'src> Evaluator<'src> {
    /// Creates an evaluator over a lexed token stream.
    pub(crate) fn new(tokens: Vec<Token>, source: &'src str, options: EvalOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
            options,
            depth: 0,
            warnings: Vec::new(),
        }
    }

    /// Evaluates the whole stream as one expression. Warnings raised before
    /// evaluation stopped are returned even if it failed.
    pub(crate) fn evaluate(mut self) -> (EvalResult<Value>, Vec<Diagnostic>) {
        let result = self.evaluate_stream();
        (result, self.warnings)
    }

    fn evaluate_stream(&mut self) -> EvalResult<Value> {
        let result = self.parse_expr_bp(0)?;
        if !self.at_eof() {
            return Err(self.expected("an operator or end of input"));
        }
        Ok(result.value)
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    fn current(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn current_text(&self) -> &'src str {
        self.tokens[self.pos].text(self.source)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    fn at_eof(&self) -> bool {
        self.current() == TokenKind::Eof
    }

    fn advance(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of the given kind and returns its span.
    fn expect(&mut self, kind: TokenKind, what: &str) -> EvalResult<Span> {
        let span = self.current_span();
        if self.eat(kind) {
            Ok(span)
        } else {
            Err(self.expected(what))
        }
    }

    /// An "expected X" error at the current position. An unlexable token is
    /// reported as the lexical error it is.
    fn expected(&self, what: &str) -> EvalError {
        let span = self.current_span();
        match self.current() {
            TokenKind::Error(reason) => EvalError::lexical(reason.message(), span),
            TokenKind::Eof => {
                EvalError::syntax(format!("expected {what}, found end of input"), span)
            }
            _ => EvalError::syntax(
                format!("expected {what}, found '{}'", self.current_text()),
                span,
            ),
        }
    }

    fn limits(&self) -> Limits {
        Limits {
            max_shift: self.options.max_shift,
            max_exponent: self.options.max_exponent,
            max_result_bits: self.options.max_result_bits,
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn parse_expr_bp(&mut self, min_bp: u8) -> EvalResult<Operand> {
        if self.depth >= self.options.max_depth {
            return Err(EvalError::limit(
                format!(
                    "expression nests deeper than {} levels",
                    self.options.max_depth
                ),
                self.current_span(),
            ));
        }
        self.depth += 1;
        let result = self.parse_expr_bp_inner(min_bp);
        self.depth -= 1;
        result
    }

    fn parse_expr_bp_inner(&mut self, min_bp: u8) -> EvalResult<Operand> {
        let mut lhs = self.parse_prefix_expr()?;

        loop {
            if self.at_eof() {
                break;
            }

            if self.at(TokenKind::Question) && min_bp == 0 {
                self.advance(); // eat ?
                let then_expr = self.parse_expr_bp(0)?;
                self.expect(TokenKind::Colon, "':'")?;
                let else_expr = self.parse_expr_bp(0)?;
                let condition = lhs.value.truthiness().ok_or_else(|| {
                    EvalError::semantic(
                        format!("condition must be a number, found {}", lhs.value.type_name()),
                        lhs.span,
                    )
                })?;
                let span = lhs.span.merge(else_expr.span);
                let value = if condition {
                    then_expr.value
                } else {
                    else_expr.value
                };
                lhs = Operand::new(value, span);
                continue;
            }

            let op = match binary_op(self.current()) {
                Some(op) => op,
                None => break,
            };

            let (l_bp, r_bp) = infix_binding_power(op);
            if l_bp < min_bp {
                break;
            }

            self.advance(); // consume operator token

            let rhs = self.parse_expr_bp(r_bp)?;
            let span = lhs.span.merge(rhs.span);
            let value = arith::binary(op, &lhs.value, &rhs.value, self.limits())
                .map_err(|e| e.at(span))?;
            lhs = Operand::new(value, span);
        }

        Ok(lhs)
    }

    fn parse_prefix_expr(&mut self) -> EvalResult<Operand> {
        let start = self.current_span();

        let kind = self.current();
        if matches!(kind, TokenKind::Minus | TokenKind::Plus | TokenKind::Tilde) {
            self.advance();
            let operand = self.parse_expr_bp(PREFIX_BP)?;
            let span = start.merge(operand.span);
            let value = match kind {
                TokenKind::Minus => arith::negate(&operand.value),
                TokenKind::Plus => arith::identity(operand.value),
                _ => {
                    let width = operand.width.unwrap_or(self.options.default_width);
                    if width > self.options.max_shift {
                        return Err(EvalError::limit(
                            format!(
                                "bit width {width} exceeds the limit of {}",
                                self.options.max_shift
                            ),
                            span,
                        ));
                    }
                    arith::bit_not(&operand.value, width)
                }
            }
            .map_err(|e| e.at(span))?;
            return Ok(Operand::new(value, span));
        }

        match kind {
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expr_bp(0)?;
                let end = self
                    .expect(TokenKind::RightParen, "')'")
                    .map_err(|e| e.unclosed(start))?;
                Ok(Operand {
                    span: start.merge(end),
                    ..inner
                })
            }
            TokenKind::LeftBrace => self.parse_array(),
            TokenKind::SystemIdentifier => self.parse_call(),
            _ if kind.is_literal() => {
                let text = self.current_text();
                let literal = resolve_literal(kind, text, start)?;
                self.warnings.extend(literal.size_warning(text, start));
                self.advance();
                Ok(Operand {
                    value: literal.value,
                    span: start,
                    width: literal.width,
                })
            }
            _ => Err(self.expected("an expression")),
        }
    }

    /// `{ e1, e2, ... }`
    fn parse_array(&mut self) -> EvalResult<Operand> {
        let start = self.current_span();
        self.advance(); // eat {
        if self.at(TokenKind::RightBrace) {
            return Err(EvalError::syntax(
                "array literal needs at least one element",
                start.merge(self.current_span()),
            ));
        }

        let mut elements = vec![self.parse_expr_bp(0)?.value];
        while self.eat(TokenKind::Comma) {
            elements.push(self.parse_expr_bp(0)?.value);
        }
        let end = self
            .expect(TokenKind::RightBrace, "',' or '}'")
            .map_err(|e| e.unclosed(start))?;
        Ok(Operand::new(Value::Array(elements), start.merge(end)))
    }

    /// `$name(arg, ...)`
    fn parse_call(&mut self) -> EvalResult<Operand> {
        let start = self.current_span();
        let name = self.current_text();
        let builtin = Builtin::lookup(name).ok_or_else(|| {
            EvalError::semantic(format!("unknown function '{name}'"), start)
        })?;
        self.advance();
        let open = self.expect(TokenKind::LeftParen, "'(' after function name")?;

        let mut args = Vec::new();
        if !self.at(TokenKind::RightParen) {
            args.push(self.parse_expr_bp(0)?.value);
            while self.eat(TokenKind::Comma) {
                args.push(self.parse_expr_bp(0)?.value);
            }
        }
        let end = self
            .expect(TokenKind::RightParen, "',' or ')'")
            .map_err(|e| e.unclosed(open))?;
        let span = start.merge(end);

        let value = builtin
            .apply(&args, self.limits())
            .map_err(|e| e.at(span))?;
        Ok(Operand::new(value, span))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::lexer::lex;
    use vexpr_source::ExprId;

    fn eval_with(source: &str, options: EvalOptions) -> EvalResult<Value> {
        let tokens = lex(source, ExprId::from_raw(0));
        Evaluator::new(tokens, source, options).evaluate().0
    }

    fn warnings(source: &str) -> Vec<Diagnostic> {
        let tokens = lex(source, ExprId::from_raw(0));
        Evaluator::new(tokens, source, EvalOptions::default()).evaluate().1
    }

    fn eval(source: &str) -> EvalResult<Value> {
        eval_with(source, EvalOptions::default())
    }

    fn ok(source: &str) -> String {
        match eval(source) {
            Ok(v) => v.to_string(),
            Err(e) => panic!("{source} failed: {e}"),
        }
    }

    fn err(source: &str) -> EvalError {
        match eval(source) {
            Ok(v) => panic!("{source} evaluated to {v}"),
            Err(e) => e,
        }
    }

    // ---- precedence ----

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(ok("1 + 2 * 3"), "7");
        assert_eq!(ok("(1 + 2) * 3"), "9");
        assert_eq!(ok("10 - 4 - 3"), "3");
        assert_eq!(ok("2**2**2"), "16");
        assert_eq!(ok("2**3**2"), "512");
        assert_eq!(ok("1 + 1 << 2"), "8");
        assert_eq!(ok("1 < 2 == 1"), "1");
        assert_eq!(ok("6 & 3 | 8"), "10");
        assert_eq!(ok("1 || 0 && 0"), "1");
    }

    #[test]
    fn unary_binds_tighter_than_power() {
        assert_eq!(ok("-1**2"), "1");
        assert_eq!(ok("-2**3"), "-8");
        assert_eq!(ok("--3"), "3");
        assert_eq!(ok("+-3"), "-3");
        assert_eq!(ok("2*-3"), "-6");
    }

    // ---- ternary ----

    #[test]
    fn nested_ternary() {
        assert_eq!(ok("1?11:2?12:0"), "11");
        assert_eq!(ok("0?11:2?12:0"), "12");
        assert_eq!(ok("0?11:0?12:0"), "0");
        assert_eq!(ok("1 + 1 ? 2 : 3"), "2");
        assert_eq!(ok("0.0 ? 2 : 3"), "3");
    }

    #[test]
    fn ternary_errors() {
        assert_eq!(err("1 ? 2").kind, ErrorKind::Syntax);
        assert_eq!(err("\"a\" ? 1 : 2").kind, ErrorKind::Semantic);
        assert_eq!(err("1 ? 2 : 1/0").kind, ErrorKind::Semantic);
    }

    // ---- arrays and calls ----

    #[test]
    fn arrays() {
        assert_eq!(ok("{1+1,1}"), "{2,1}");
        assert_eq!(ok("{{1,2},{3}}"), "{{1,2},{3}}");
        assert_eq!(ok("{ \"a\" , 2 }"), "{\"a\",2}");
        assert!(eval("{}").is_err());
        assert!(eval("{1,}").is_err());
        assert!(eval("{1,2").is_err());
        assert!(eval("{1,1}+{1,1}").is_err());
        assert!(eval("{1,1} + 1").is_err());
    }

    #[test]
    fn calls() {
        assert_eq!(ok("$clog2(1+3)"), "2");
        assert_eq!(ok("$pow(2, 1+2)"), "8");
        assert_eq!(ok("$sqrt(16) + 1"), "5");
        assert!(eval("$clog2").is_err());
        assert!(eval("$clog2()").is_err());
        assert!(eval("$clog2(4").is_err());
        assert!(eval("$pow(2)").is_err());
        assert_eq!(err("$log(2)").kind, ErrorKind::Semantic);
        assert!(eval("$clog2({4})").is_err());
    }

    // ---- bitwise not ----

    #[test]
    fn bit_not_width() {
        assert_eq!(ok("~4'b001"), "-2");
        assert_eq!(ok("~0"), "-1");
        assert_eq!(ok("~(4'b001)"), "-2");
        assert_eq!(ok("~4'b1000"), "7");
        assert_eq!(ok("~(4'b1000)"), "7");
        assert_eq!(ok("~((4'b1000))"), "7");
        assert_eq!(ok("~(4'b1000 + 0)"), "-9");
        assert_eq!(ok("~8'd1"), "-2");
        let narrow = EvalOptions {
            default_width: 4,
            ..EvalOptions::default()
        };
        assert_eq!(eval_with("~5", narrow).unwrap().to_string(), "-6");
        assert_eq!(eval_with("~8", narrow).unwrap().to_string(), "7");
    }

    #[test]
    fn bit_not_width_limit() {
        let options = EvalOptions {
            max_shift: 16,
            default_width: 16,
            ..EvalOptions::default()
        };
        let e = eval_with("~32'd1", options).unwrap_err();
        assert_eq!(e.kind, ErrorKind::Limit);
    }

    // ---- syntax errors ----

    #[test]
    fn dangling_and_unmatched() {
        for bad in ["1 +", "* 2", "(1", "1)", "()", "1 2", "1 = 2", "(1 + )", ":"] {
            assert!(eval(bad).is_err(), "{bad} should be invalid");
        }
    }

    #[test]
    fn lexical_errors_are_reported_as_such() {
        assert_eq!(err("1 = 2").kind, ErrorKind::Lexical);
        assert_eq!(err("\"abc").kind, ErrorKind::Lexical);
        assert_eq!(err("1 + 'b102").kind, ErrorKind::Lexical);
        assert_eq!(err("foo").kind, ErrorKind::Lexical);
    }

    #[test]
    fn error_spans_point_at_the_failure() {
        let e = err("1 + 4/0");
        assert_eq!((e.span.start, e.span.end), (4, 7));
        let e = err("1 + )");
        assert_eq!((e.span.start, e.span.end), (4, 5));
    }

    #[test]
    fn unclosed_delimiters_point_back_at_the_opener() {
        let e = err("1 + (2 * 3");
        assert_eq!(e.kind, ErrorKind::Syntax);
        let open = e.opened_at.unwrap();
        assert_eq!((open.start, open.end), (4, 5));

        let e = err("((1)");
        assert_eq!(e.opened_at.map(|s| s.start), Some(0));
        let e = err("{1, 2");
        assert_eq!(e.opened_at.map(|s| s.start), Some(0));
        let e = err("$clog2(8");
        assert_eq!(e.opened_at.map(|s| (s.start, s.end)), Some((6, 7)));
    }

    #[test]
    fn other_errors_have_no_opener() {
        for bad in ["(1 + )", "1)", "(1/0)", "(1 + foo)", "{1,}"] {
            assert_eq!(err(bad).opened_at, None, "{bad}");
        }
    }

    // ---- size warnings ----

    #[test]
    fn oversized_literals_warn_without_failing() {
        assert_eq!(ok("~2'hFF"), "0");
        let found = warnings("~2'hFF + 1'd3");
        let spans: Vec<_> = found
            .iter()
            .map(|w| (w.primary_span.start, w.primary_span.end))
            .collect();
        assert_eq!(spans, vec![(1, 6), (9, 13)]);
        assert!(warnings("8'hFF + 'hFFFF + 255").is_empty());
    }

    #[test]
    fn warnings_survive_a_failure() {
        let source = "2'hFF / 0";
        let tokens = lex(source, ExprId::from_raw(0));
        let (result, found) = Evaluator::new(tokens, source, EvalOptions::default()).evaluate();
        assert!(result.is_err());
        assert_eq!(found.len(), 1);
    }

    // ---- depth guard ----

    #[test]
    fn depth_guard() {
        let options = EvalOptions {
            max_depth: 8,
            ..EvalOptions::default()
        };
        assert!(eval_with("((((1))))", options).is_ok());
        let deep = format!("{}1{}", "(".repeat(20), ")".repeat(20));
        assert_eq!(eval_with(&deep, options).unwrap_err().kind, ErrorKind::Limit);
        assert_eq!(
            eval_with(&"-".repeat(20), options).unwrap_err().kind,
            ErrorKind::Limit
        );
    }

    #[test]
    fn deep_default_nesting_fails_closed() {
        let deep = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(err(&deep).kind, ErrorKind::Limit);
    }

    // ---- blank input ----

    #[test]
    fn blank_token_streams() {
        let blank = |s: &str| is_blank(&lex(s, ExprId::from_raw(0)));
        assert!(blank(""));
        assert!(blank("   "));
        assert!(blank("()"));
        assert!(blank("(())"));
        assert!(!blank("(()"));
        assert!(!blank(")("));
        assert!(!blank("(1)"));
    }
}
