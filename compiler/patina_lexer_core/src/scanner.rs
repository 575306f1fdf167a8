//! The raw tokenizer.
//!
//! `Tokenizer::advance_token` consumes exactly one token's worth of bytes
//! and reports the kind plus consumed length. Compound operators (`==`,
//! `<<`, `->`) are not recognized here; each operator byte is emitted alone
//! and re-glued later from the joint flags. The only multi-byte operators
//! this layer knows are the comment markers `//` and `/* */`.

use crate::cursor::{Cursor, EOF_BYTE};
use crate::token::{Base, RawLiteralKind, RawToken, RawTokenKind};

#[inline]
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

#[inline]
pub fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

#[inline]
pub fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Tokenize a whole source text.
pub fn tokenize(src: &str) -> impl Iterator<Item = RawToken> + '_ {
    Tokenizer::new(src)
}

/// Cursor-driven scanner producing one [`RawToken`] per call.
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Tokenizer {
            cursor: Cursor::new(src),
        }
    }

    /// Classify and consume the next token, or `None` at end of input.
    pub fn advance_token(&mut self) -> Option<RawToken> {
        let start = self.cursor.consumed();
        let first = self.cursor.bump()?;

        let kind = match first {
            b'/' => match self.cursor.first() {
                b'/' => self.line_comment(),
                b'*' => self.block_comment(),
                _ => RawTokenKind::Slash,
            },

            // `r#raw_ident`, or an ordinary identifier starting with `r`.
            // Raw strings are not part of the grammar, so `r"` and a bare
            // `r#` fall out as Unknown.
            b'r' => {
                if self.cursor.first() == b'#' && is_ident_start(self.cursor.second()) {
                    self.raw_identifier()
                } else if self.cursor.first() == b'#' || self.cursor.first() == b'"' {
                    RawTokenKind::Unknown
                } else {
                    self.identifier()
                }
            }

            b'\'' => self.lifetime_or_char(start),

            b'"' => {
                let terminated = self.double_quoted_string();
                let suffix_start = self.cursor.consumed() - start;
                if terminated {
                    self.eat_literal_suffix();
                }
                RawTokenKind::Literal {
                    kind: RawLiteralKind::Str {
                        terminated,
                        suffix_start,
                    },
                }
            }

            byte if is_ident_start(byte) => self.identifier(),
            byte if is_whitespace(byte) => self.whitespace(),
            byte if byte.is_ascii_digit() => RawTokenKind::Literal {
                kind: self.number(byte, start),
            },

            // One-symbol tokens.
            b';' => RawTokenKind::Semi,
            b',' => RawTokenKind::Comma,
            b'.' => RawTokenKind::Dot,
            b'(' => RawTokenKind::OpenParen,
            b')' => RawTokenKind::CloseParen,
            b'{' => RawTokenKind::OpenBrace,
            b'}' => RawTokenKind::CloseBrace,
            b'[' => RawTokenKind::OpenBracket,
            b']' => RawTokenKind::CloseBracket,
            b'@' => RawTokenKind::At,
            b'#' => RawTokenKind::Pound,
            b'~' => RawTokenKind::Tilde,
            b'?' => RawTokenKind::Question,
            b':' => RawTokenKind::Colon,
            b'$' => RawTokenKind::Dollar,
            b'=' => RawTokenKind::Eq,
            b'!' => RawTokenKind::Not,
            b'<' => RawTokenKind::Lt,
            b'>' => RawTokenKind::Gt,
            b'-' => RawTokenKind::Minus,
            b'&' => RawTokenKind::And,
            b'|' => RawTokenKind::Or,
            b'+' => RawTokenKind::Plus,
            b'*' => RawTokenKind::Star,
            b'^' => RawTokenKind::Caret,
            b'%' => RawTokenKind::Percent,

            _ => RawTokenKind::Unknown,
        };

        Some(RawToken::new(kind, self.cursor.consumed() - start))
    }

    fn line_comment(&mut self) -> RawTokenKind {
        debug_assert_eq!(self.cursor.first(), b'/');
        let _ = self.cursor.bump();
        self.cursor.eat_until_newline();
        RawTokenKind::LineComment
    }

    fn block_comment(&mut self) -> RawTokenKind {
        debug_assert_eq!(self.cursor.first(), b'*');
        let _ = self.cursor.bump();
        let mut depth = 1u32;
        while let Some(byte) = self.cursor.bump() {
            match byte {
                b'/' if self.cursor.first() == b'*' => {
                    let _ = self.cursor.bump();
                    depth += 1;
                }
                b'*' if self.cursor.first() == b'/' => {
                    let _ = self.cursor.bump();
                    depth -= 1;
                    if depth == 0 {
                        // Closed; for `/* */ */` the trailing ` */` is
                        // scanned separately.
                        break;
                    }
                }
                _ => {}
            }
        }
        RawTokenKind::BlockComment {
            terminated: depth == 0,
        }
    }

    fn whitespace(&mut self) -> RawTokenKind {
        self.cursor.eat_while(is_whitespace);
        RawTokenKind::Whitespace
    }

    fn identifier(&mut self) -> RawTokenKind {
        self.cursor.eat_while(is_ident_continue);
        RawTokenKind::Ident
    }

    fn raw_identifier(&mut self) -> RawTokenKind {
        debug_assert_eq!(self.cursor.first(), b'#');
        let _ = self.cursor.bump();
        self.cursor.eat_while(is_ident_continue);
        RawTokenKind::RawIdent
    }

    fn number(&mut self, first_digit: u8, start: u32) -> RawLiteralKind {
        debug_assert!(first_digit.is_ascii_digit());
        let mut base = Base::Decimal;

        if first_digit == b'0' {
            // Attempt to parse an encoding base.
            let has_digits = match self.cursor.first() {
                b'b' => {
                    base = Base::Binary;
                    let _ = self.cursor.bump();
                    self.eat_decimal_digits()
                }
                b'o' => {
                    base = Base::Octal;
                    let _ = self.cursor.bump();
                    self.eat_decimal_digits()
                }
                b'x' => {
                    base = Base::Hexadecimal;
                    let _ = self.cursor.bump();
                    self.eat_hexadecimal_digits()
                }
                // Not a base prefix.
                b'0'..=b'9' | b'_' | b'.' | b'e' | b'E' => {
                    let _ = self.eat_decimal_digits();
                    true
                }
                // Just a 0.
                _ => {
                    let suffix_start = self.cursor.consumed() - start;
                    self.eat_literal_suffix();
                    return RawLiteralKind::Int {
                        base,
                        empty_int: false,
                        suffix_start,
                    };
                }
            };
            // Base prefix with no digits after it, e.g. `0x`.
            if !has_digits {
                let suffix_start = self.cursor.consumed() - start;
                self.eat_literal_suffix();
                return RawLiteralKind::Int {
                    base,
                    empty_int: true,
                    suffix_start,
                };
            }
        } else {
            let _ = self.eat_decimal_digits();
        }

        // Binary and octal digit runs are consumed as decimal here; the
        // cooker validates them against the base so `0b123` produces a
        // spanned diagnostic instead of splitting into two tokens.
        match self.cursor.first() {
            // Don't be greedy if this is an integer followed by a range or
            // a field access (`0..2`, `12.foo`).
            b'.' if self.cursor.second() != b'.' && !is_ident_start(self.cursor.second()) => {
                let _ = self.cursor.bump();
                let mut empty_exponent = false;
                if self.cursor.first().is_ascii_digit() {
                    let _ = self.eat_decimal_digits();
                    if matches!(self.cursor.first(), b'e' | b'E') {
                        let _ = self.cursor.bump();
                        empty_exponent = !self.eat_float_exponent();
                    }
                }
                let suffix_start = self.cursor.consumed() - start;
                self.eat_literal_suffix();
                RawLiteralKind::Float {
                    base,
                    empty_exponent,
                    suffix_start,
                }
            }
            b'e' | b'E' => {
                let _ = self.cursor.bump();
                let empty_exponent = !self.eat_float_exponent();
                let suffix_start = self.cursor.consumed() - start;
                self.eat_literal_suffix();
                RawLiteralKind::Float {
                    base,
                    empty_exponent,
                    suffix_start,
                }
            }
            _ => {
                let suffix_start = self.cursor.consumed() - start;
                self.eat_literal_suffix();
                RawLiteralKind::Int {
                    base,
                    empty_int: false,
                    suffix_start,
                }
            }
        }
    }

    fn lifetime_or_char(&mut self, start: u32) -> RawTokenKind {
        let can_be_lifetime = if self.cursor.second() == b'\'' {
            // Surely a char literal like 'a'.
            false
        } else {
            // A lifetime if the next byte could begin an identifier. Digits
            // are included so `'0` reports as an invalid lifetime rather
            // than an unterminated char literal.
            is_ident_start(self.cursor.first()) || self.cursor.first().is_ascii_digit()
        };

        if !can_be_lifetime {
            let terminated = self.single_quoted_string();
            let suffix_start = self.cursor.consumed() - start;
            if terminated {
                self.eat_literal_suffix();
            }
            return RawTokenKind::Literal {
                kind: RawLiteralKind::Char {
                    terminated,
                    suffix_start,
                },
            };
        }

        let starts_with_number = self.cursor.first().is_ascii_digit();

        // Skip the literal contents. The first byte may be a digit, which
        // is not a valid identifier start, so take it unconditionally.
        let _ = self.cursor.bump();
        self.cursor.eat_while(is_ident_continue);

        // A closing quote after identifier characters means the user wrote
        // a multi-character char literal ('abc').
        if self.cursor.first() == b'\'' {
            let _ = self.cursor.bump();
            let suffix_start = self.cursor.consumed() - start;
            return RawTokenKind::Literal {
                kind: RawLiteralKind::Char {
                    terminated: true,
                    suffix_start,
                },
            };
        }

        RawTokenKind::Lifetime { starts_with_number }
    }

    fn single_quoted_string(&mut self) -> bool {
        // One-symbol literal fast path.
        if self.cursor.second() == b'\'' && self.cursor.first() != b'\\' {
            let _ = self.cursor.bump();
            let _ = self.cursor.bump();
            return true;
        }

        // Parse until the closing quote or an unrecoverable boundary.
        loop {
            match self.cursor.first() {
                b'\'' => {
                    let _ = self.cursor.bump();
                    return true;
                }
                // Probable comment start; keep it out of the bad literal.
                b'/' => return false,
                // Newline without a following quote means unclosed literal.
                b'\n' if self.cursor.second() != b'\'' => return false,
                EOF_BYTE if self.cursor.is_eof() => return false,
                // An escape counts as one character, bump twice.
                b'\\' => {
                    let _ = self.cursor.bump();
                    let _ = self.cursor.bump();
                }
                _ => {
                    let _ = self.cursor.bump();
                }
            }
        }
    }

    /// Eats a double-quoted string; true if terminated.
    fn double_quoted_string(&mut self) -> bool {
        while let Some(byte) = self.cursor.bump() {
            match byte {
                b'"' => return true,
                b'\\' if self.cursor.first() == b'\\' || self.cursor.first() == b'"' => {
                    // Bump again to skip the escaped character.
                    let _ = self.cursor.bump();
                }
                _ => {}
            }
        }
        false
    }

    fn eat_decimal_digits(&mut self) -> bool {
        let mut has_digits = false;
        loop {
            match self.cursor.first() {
                b'_' => {
                    let _ = self.cursor.bump();
                }
                byte if byte.is_ascii_digit() => {
                    has_digits = true;
                    let _ = self.cursor.bump();
                }
                _ => break,
            }
        }
        has_digits
    }

    fn eat_hexadecimal_digits(&mut self) -> bool {
        let mut has_digits = false;
        loop {
            match self.cursor.first() {
                b'_' => {
                    let _ = self.cursor.bump();
                }
                byte if byte.is_ascii_hexdigit() => {
                    has_digits = true;
                    let _ = self.cursor.bump();
                }
                _ => break,
            }
        }
        has_digits
    }

    /// Eats a float exponent; true if at least one digit was met.
    fn eat_float_exponent(&mut self) -> bool {
        if matches!(self.cursor.first(), b'-' | b'+') {
            let _ = self.cursor.bump();
        }
        self.eat_decimal_digits()
    }

    /// Eats a literal suffix, e.g. the `u8` of `12_u8`.
    fn eat_literal_suffix(&mut self) {
        if !is_ident_start(self.cursor.first()) {
            return;
        }
        let _ = self.cursor.bump();
        self.cursor.eat_while(is_ident_continue);
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        self.advance_token()
    }
}
