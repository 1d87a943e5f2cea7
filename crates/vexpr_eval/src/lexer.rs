//! Lexical analyzer for expression text.
//!
//! Converts an expression into a sequence of [`Token`]s: decimal, fixed-point,
//! sized/based literals (`4'b1010`, `'hFF`, `'sd5`), string literals, bare
//! words, `$` function names and operators. Signs are never folded into
//! literals; `-1` is a unary minus applied to `1`. Problems become
//! [`TokenKind::Error`] tokens so that analysis passes can skip them.

use crate::token::{LexError, Token, TokenKind};
use vexpr_source::{ExprId, Span};

/// Lexes an expression into tokens.
///
/// Whitespace is skipped. The returned vector always ends with a
/// [`TokenKind::Eof`] token.
pub fn lex(source: &str, expr: ExprId) -> Vec<Token> {
    let mut lexer = Lexer {
        source: source.as_bytes(),
        pos: 0,
        expr,
    };
    lexer.lex_all()
}

/// Span offset of a byte position. Positions past `u32::MAX` saturate;
/// evaluation rejects such input before lexing.
fn offset(pos: usize) -> u32 {
    u32::try_from(pos).unwrap_or(u32::MAX)
}

struct Lexer<'a> {
    source: &'a [u8],
    pos: usize,
    expr: ExprId,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            while self.pos < self.source.len() && self.source[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos >= self.source.len() {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    span: Span::new(self.expr, offset(self.pos), offset(self.pos)),
                });
                break;
            }
            tokens.push(self.next_token());
        }
        tokens
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        let idx = self.pos + offset;
        if idx < self.source.len() {
            self.source[idx]
        } else {
            0
        }
    }

    fn advance(&mut self) -> u8 {
        let b = self.source[self.pos];
        self.pos += 1;
        b
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            span: Span::new(self.expr, offset(start), offset(self.pos)),
        }
    }

    fn next_token(&mut self) -> Token {
        let start = self.pos;
        let b = self.peek();

        if is_ident_start(b) {
            self.eat_while(is_ident_char);
            return self.token(TokenKind::Identifier, start);
        }
        if b == b'$' {
            self.pos += 1;
            if !is_ident_start(self.peek()) {
                return self.token(TokenKind::Error(LexError::MissingFunctionName), start);
            }
            self.eat_while(is_ident_char);
            return self.token(TokenKind::SystemIdentifier, start);
        }
        if b.is_ascii_digit() {
            return self.lex_number(start);
        }
        if b == b'\'' {
            return self.lex_based(start);
        }
        if b == b'"' {
            return self.lex_string(start);
        }
        self.lex_operator(start)
    }

    fn lex_number(&mut self, start: usize) -> Token {
        self.eat_while(is_decimal_char);

        // Sized literal: the digits so far are the size.
        if self.peek() == b'\'' {
            return self.lex_based(start);
        }

        let mut kind = TokenKind::IntLiteral;
        if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
            self.pos += 1;
            self.eat_while(is_decimal_char);
            kind = TokenKind::RealLiteral;
        }

        if is_ident_char(self.peek()) {
            self.eat_while(is_ident_char);
            return self.token(TokenKind::Error(LexError::MalformedNumber), start);
        }
        self.token(kind, start)
    }

    /// Lexes from the apostrophe of a based literal. `start` may point at a
    /// preceding size.
    fn lex_based(&mut self, start: usize) -> Token {
        self.pos += 1; // skip '
        let after_tick = self.pos;

        if matches!(self.peek(), b's' | b'S') && self.peek_at(1).is_ascii_alphanumeric() {
            self.pos += 1;
        }
        if matches!(self.peek().to_ascii_lowercase(), b'b' | b'o' | b'd' | b'h') {
            self.pos += 1;
        }
        // Digits are validated against the base by the literal resolver.
        self.eat_while(is_ident_char);

        if self.pos == after_tick {
            return self.token(TokenKind::Error(LexError::DanglingTick), start);
        }
        self.token(TokenKind::BasedLiteral, start)
    }

    fn lex_string(&mut self, start: usize) -> Token {
        self.pos += 1; // skip opening "
        while self.pos < self.source.len() {
            if self.advance() == b'"' {
                return self.token(TokenKind::StringLiteral, start);
            }
        }
        self.token(TokenKind::Error(LexError::UnterminatedString), start)
    }

    fn lex_operator(&mut self, start: usize) -> Token {
        let b = self.advance();
        let kind = match b {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => {
                if self.peek() == b'*' {
                    self.pos += 1;
                    TokenKind::Power
                } else {
                    TokenKind::Star
                }
            }
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'~' => TokenKind::Tilde,
            b'^' => TokenKind::Caret,
            b'&' => self.pick(b'&', TokenKind::AmpAmp, TokenKind::Amp),
            b'|' => self.pick(b'|', TokenKind::PipePipe, TokenKind::Pipe),
            b'<' => match self.peek() {
                b'<' => {
                    self.pos += 1;
                    TokenKind::ShiftLeft
                }
                b'=' => {
                    self.pos += 1;
                    TokenKind::LessEq
                }
                _ => TokenKind::Less,
            },
            b'>' => match self.peek() {
                b'>' => {
                    self.pos += 1;
                    TokenKind::ShiftRight
                }
                b'=' => {
                    self.pos += 1;
                    TokenKind::GreaterEq
                }
                _ => TokenKind::Greater,
            },
            b'=' => self.pick(
                b'=',
                TokenKind::EqEq,
                TokenKind::Error(LexError::UnexpectedChar),
            ),
            b'!' => self.pick(
                b'=',
                TokenKind::BangEq,
                TokenKind::Error(LexError::UnexpectedChar),
            ),
            b'?' => TokenKind::Question,
            b':' => TokenKind::Colon,
            b',' => TokenKind::Comma,
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'{' => TokenKind::LeftBrace,
            b'}' => TokenKind::RightBrace,
            _ => {
                // Keep spans on UTF-8 boundaries.
                while self.pos < self.source.len() && (self.source[self.pos] & 0xC0) == 0x80 {
                    self.pos += 1;
                }
                TokenKind::Error(LexError::UnexpectedChar)
            }
        };
        self.token(kind, start)
    }

    /// Consumes `second` if it follows, choosing between a two-character and a
    /// one-character token.
    fn pick(&mut self, second: u8, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == second {
            self.pos += 1;
            double
        } else {
            single
        }
    }

    fn eat_while(&mut self, pred: fn(u8) -> bool) {
        while self.pos < self.source.len() && pred(self.source[self.pos]) {
            self.pos += 1;
        }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_decimal_char(b: u8) -> bool {
    b.is_ascii_digit() || b == b'_'
}
