//! Turns raw tokens into cooked tokens.
//!
//! Cooking interns identifier and literal text, validates literal shapes,
//! and reports everything the raw layer encoded as data. Trivia is consumed
//! here; the tree reader only learns whether any separated two tokens.

use patina_ast::token::{BinOpToken as BinOp, Delim, Lit, LitKind, Token, TokenKind};
use patina_diagnostic::{ParseSession, PResult};
use patina_lexer_core::{Base, RawLiteralKind, RawTokenKind, Tokenizer};
use patina_span::Span;

/// Cooks the raw token sequence of one source file, in order.
pub struct StringReader<'sess> {
    sess: &'sess ParseSession,
    tokenizer: Tokenizer<'sess>,
    pos: u32,
}

impl<'sess> StringReader<'sess> {
    pub fn new(sess: &'sess ParseSession) -> Self {
        StringReader {
            sess,
            tokenizer: Tokenizer::new(&sess.source_file.src),
            pos: 0,
        }
    }

    /// The next cooked token and whether trivia (or a skipped invalid
    /// token) preceded it. Returns `Eof` forever once the source is spent.
    pub fn next_token(&mut self) -> PResult<(Token, bool)> {
        let mut preceded_by_trivia = false;
        loop {
            let Some(raw) = self.tokenizer.advance_token() else {
                let token = Token::new(TokenKind::Eof, Span::point(self.pos));
                return Ok((token, preceded_by_trivia));
            };
            let span = Span::new(self.pos, self.pos + raw.len);
            self.pos += raw.len;

            match self.cook(raw.kind, span)? {
                Some(kind) => return Ok((Token::new(kind, span), preceded_by_trivia)),
                None => preceded_by_trivia = true,
            }
        }
    }

    /// `None` means the raw token produces no cooked token.
    fn cook(&self, raw: RawTokenKind, span: Span) -> PResult<Option<TokenKind>> {
        let text = self.sess.source_file.span_text(span);
        let kind = match raw {
            RawTokenKind::Whitespace | RawTokenKind::LineComment => return Ok(None),
            RawTokenKind::BlockComment { terminated } => {
                if !terminated {
                    return Err(self.sess.critical_span(span, "unterminated block comment"));
                }
                return Ok(None);
            }

            RawTokenKind::Ident => TokenKind::Ident(self.sess.interner.intern(text)),
            RawTokenKind::RawIdent => {
                self.sess
                    .error_span(span, "raw identifiers are not implemented");
                return Ok(None);
            }
            RawTokenKind::Lifetime { starts_with_number } => {
                if starts_with_number {
                    self.sess
                        .error_span(span, "lifetimes cannot start with a number");
                }
                TokenKind::Lifetime(self.sess.interner.intern(text))
            }
            RawTokenKind::Literal { kind } => {
                TokenKind::Literal(self.cook_literal(kind, span, text)?)
            }

            RawTokenKind::Semi => TokenKind::Semi,
            RawTokenKind::Comma => TokenKind::Comma,
            RawTokenKind::Dot => TokenKind::Dot,
            RawTokenKind::OpenParen => TokenKind::OpenDelim(Delim::Paren),
            RawTokenKind::CloseParen => TokenKind::CloseDelim(Delim::Paren),
            RawTokenKind::OpenBrace => TokenKind::OpenDelim(Delim::Brace),
            RawTokenKind::CloseBrace => TokenKind::CloseDelim(Delim::Brace),
            RawTokenKind::OpenBracket => TokenKind::OpenDelim(Delim::Bracket),
            RawTokenKind::CloseBracket => TokenKind::CloseDelim(Delim::Bracket),
            RawTokenKind::At => TokenKind::At,
            RawTokenKind::Pound => TokenKind::Pound,
            RawTokenKind::Tilde => TokenKind::Tilde,
            RawTokenKind::Question => TokenKind::Question,
            RawTokenKind::Colon => TokenKind::Colon,
            RawTokenKind::Dollar => TokenKind::Dollar,
            RawTokenKind::Eq => TokenKind::Eq,
            RawTokenKind::Not => TokenKind::Not,
            RawTokenKind::Lt => TokenKind::Lt,
            RawTokenKind::Gt => TokenKind::Gt,
            RawTokenKind::Minus => TokenKind::BinOp(BinOp::Minus),
            RawTokenKind::And => TokenKind::BinOp(BinOp::And),
            RawTokenKind::Or => TokenKind::BinOp(BinOp::Or),
            RawTokenKind::Plus => TokenKind::BinOp(BinOp::Plus),
            RawTokenKind::Star => TokenKind::BinOp(BinOp::Star),
            RawTokenKind::Slash => TokenKind::BinOp(BinOp::Slash),
            RawTokenKind::Caret => TokenKind::BinOp(BinOp::Caret),
            RawTokenKind::Percent => TokenKind::BinOp(BinOp::Percent),

            RawTokenKind::Unknown => {
                self.sess
                    .error_span(span, format!("unknown start of token: `{text}`"));
                return Ok(None);
            }
        };
        Ok(Some(kind))
    }

    fn cook_literal(&self, kind: RawLiteralKind, span: Span, text: &str) -> PResult<Lit> {
        match kind {
            RawLiteralKind::Int {
                base,
                empty_int,
                suffix_start,
            } => {
                if empty_int {
                    self.sess
                        .error_span(span, "no valid digits found for number");
                    return Ok(self.lit(LitKind::Err, text, suffix_start));
                }
                if matches!(base, Base::Binary | Base::Octal) {
                    self.check_digits(base, span, text, suffix_start);
                }
                Ok(self.lit(LitKind::Integer, text, suffix_start))
            }
            RawLiteralKind::Float {
                base,
                empty_exponent,
                suffix_start,
            } => {
                if empty_exponent {
                    self.sess
                        .error_span(span, "expected at least one digit in exponent");
                }
                match base {
                    Base::Binary => self.sess.error_span(span, "binary float literal is not supported"),
                    Base::Octal => self.sess.error_span(span, "octal float literal is not supported"),
                    Base::Hexadecimal => {
                        self.sess
                            .error_span(span, "hexadecimal float literal is not supported");
                    }
                    Base::Decimal => {}
                }
                Ok(self.lit(LitKind::Float, text, suffix_start))
            }
            RawLiteralKind::Char {
                terminated,
                suffix_start,
            } => {
                if !terminated {
                    return Err(self
                        .sess
                        .critical_span(span, "unterminated character literal"));
                }
                let lit = self.lit(LitKind::Char, text, suffix_start);
                if lit.suffix.is_some() {
                    let suffix_span = Span::new(span.lo + suffix_start, span.hi);
                    self.sess
                        .error_span(suffix_span, "suffixes on a char literal are invalid");
                }
                Ok(lit)
            }
            RawLiteralKind::Str {
                terminated,
                suffix_start,
            } => {
                if !terminated {
                    return Err(self
                        .sess
                        .critical_span(span, "unterminated double quote string"));
                }
                let lit = self.lit(LitKind::Str, text, suffix_start);
                if lit.suffix.is_some() {
                    let suffix_span = Span::new(span.lo + suffix_start, span.hi);
                    self.sess
                        .error_span(suffix_span, "suffixes on a string literal are invalid");
                }
                Ok(lit)
            }
        }
    }

    /// Splits off the suffix and interns both halves. The literal text is
    /// kept verbatim; escape processing belongs to later phases.
    fn lit(&self, kind: LitKind, text: &str, suffix_start: u32) -> Lit {
        let (body, suffix) = text.split_at((suffix_start as usize).min(text.len()));
        let suffix = (!suffix.is_empty()).then(|| self.sess.interner.intern(suffix));
        Lit::new(kind, self.sess.interner.intern(body), suffix)
    }

    /// Base 2 and base 8 prefixes accept any decimal digit while scanning;
    /// out-of-range digits are caught here, one error per digit.
    fn check_digits(&self, base: Base, span: Span, text: &str, suffix_start: u32) {
        let digits = &text.as_bytes()[2..(suffix_start as usize).min(text.len())];
        for (index, byte) in digits.iter().enumerate() {
            if byte.is_ascii_digit() && u32::from(byte - b'0') >= base.radix() {
                let lo = span.lo + 2 + index as u32;
                self.sess.error_span(
                    Span::new(lo, lo + 1),
                    format!("invalid digit for a base {} literal", base.radix()),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patina_span::{kw, SourceFile};
    use pretty_assertions::assert_eq;

    fn read_all(src: &str) -> (ParseSession, Vec<(Token, bool)>) {
        let sess = ParseSession::new(SourceFile::new("test.pat", src));
        let mut tokens = Vec::new();
        {
            let mut reader = StringReader::new(&sess);
            loop {
                let Ok(pair) = reader.next_token() else {
                    break;
                };
                let eof = pair.0.is_eof();
                tokens.push(pair);
                if eof {
                    break;
                }
            }
        }
        (sess, tokens)
    }

    #[test]
    fn cooks_keywords_as_identifiers() {
        let (sess, tokens) = read_all("let x");
        assert_eq!(tokens.len(), 3);
        assert!(tokens[0].0.is_keyword(kw::LET));
        assert_eq!(tokens[1].0.span, Span::new(4, 5));
        let Some(ident) = tokens[1].0.ident() else {
            panic!("expected identifier");
        };
        assert_eq!(sess.interner.get(ident.name), "x");
        assert!(tokens[1].1, "separated by a space");
    }

    #[test]
    fn splits_literal_suffix() {
        let (sess, tokens) = read_all("12u8");
        let TokenKind::Literal(lit) = tokens[0].0.kind else {
            panic!("expected literal");
        };
        assert_eq!(lit.kind, LitKind::Integer);
        assert_eq!(sess.interner.get(lit.symbol), "12");
        assert_eq!(lit.suffix.map(|s| sess.interner.get(s)), Some("u8"));
        assert!(!sess.handler.has_errors());
    }

    #[test]
    fn binary_literal_digit_check() {
        let (sess, tokens) = read_all("0b123");
        let TokenKind::Literal(lit) = tokens[0].0.kind else {
            panic!("expected literal");
        };
        assert_eq!(lit.kind, LitKind::Integer);
        // `2` and `3` are each out of range for base 2.
        assert_eq!(sess.handler.err_count(), 2);
        let diags = sess.handler.take();
        assert_eq!(diags[0].span, Span::new(3, 4));
        assert_eq!(diags[0].message, "invalid digit for a base 2 literal");
    }

    #[test]
    fn empty_int_is_recoverable() {
        let (sess, tokens) = read_all("0x;");
        let TokenKind::Literal(lit) = tokens[0].0.kind else {
            panic!("expected literal");
        };
        assert_eq!(lit.kind, LitKind::Err);
        assert_eq!(tokens[1].0.kind, TokenKind::Semi);
        assert_eq!(sess.handler.err_count(), 1);
    }

    #[test]
    fn unterminated_string_is_fatal() {
        let sess = ParseSession::new(SourceFile::new("test.pat", "\"oops"));
        let mut reader = StringReader::new(&sess);
        assert!(reader.next_token().is_err());
        let diags = sess.handler.take();
        assert_eq!(diags[0].message, "unterminated double quote string");
        assert_eq!(diags[0].span, Span::new(0, 5));
    }

    #[test]
    fn string_suffix_is_recoverable() {
        let (sess, tokens) = read_all("\"abc\"suf");
        let TokenKind::Literal(lit) = tokens[0].0.kind else {
            panic!("expected literal");
        };
        assert_eq!(lit.kind, LitKind::Str);
        assert_eq!(sess.interner.get(lit.symbol), "\"abc\"");
        assert_eq!(sess.handler.err_count(), 1);
    }

    #[test]
    fn comments_mark_separation() {
        let (_, tokens) = read_all("a/* gap */b");
        assert_eq!(tokens.len(), 3);
        assert!(!tokens[0].1);
        assert!(tokens[1].1, "comment separates the identifiers");
    }

    #[test]
    fn unknown_bytes_are_skipped_with_an_error() {
        let (sess, tokens) = read_all("a ` b");
        assert_eq!(tokens.len(), 3);
        assert!(tokens[1].0.is_ident());
        assert_eq!(sess.handler.err_count(), 1);
    }

    #[test]
    fn compound_operators_stay_split_here() {
        let (_, tokens) = read_all("==");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].0.kind, TokenKind::Eq);
        assert_eq!(tokens[1].0.kind, TokenKind::Eq);
        assert!(!tokens[1].1, "adjacent, gluing happens in the tree reader");
    }
}
