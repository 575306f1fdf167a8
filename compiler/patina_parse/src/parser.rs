//! Parser state and token-level plumbing.

use bitflags::bitflags;
use patina_ast::token::{Delim, Token, TokenKind};
use patina_ast::token_stream::{TokenStream, TokenTree};
use patina_diagnostic::{FatalError, ParseSession, PResult};
use patina_span::{Span, Symbol};

use crate::cursor::TokenCursor;

/// Nesting deeper than this aborts the parse; see [`Parser::with_depth`].
pub(crate) const MAX_NESTING_DEPTH: u32 = 256;

bitflags! {
    /// Context restrictions threaded through expression parsing.
    #[derive(Copy, Clone, Eq, PartialEq, Debug)]
    pub struct Restrictions: u8 {
        /// Parsing a statement head: a block-like expression ends the
        /// statement instead of becoming an operand.
        const STMT_EXPR = 1 << 0;
        /// Parsing a condition: a `{` starts the body, never a struct
        /// literal.
        const NO_STRUCT_LITERAL = 1 << 1;
    }
}

pub struct Parser<'sess> {
    pub sess: &'sess ParseSession,
    /// The current token.
    pub token: Token,
    /// The previous token, for span bookkeeping.
    pub prev_token: Token,
    pub(crate) restrictions: Restrictions,
    /// Token descriptions collected by failed `check`s since the last bump,
    /// for "expected one of" diagnostics.
    expected_tokens: Vec<String>,
    token_cursor: TokenCursor,
    depth: u32,
}

impl<'sess> Parser<'sess> {
    pub fn new(sess: &'sess ParseSession, stream: TokenStream) -> Self {
        let eof_span = Span::point(sess.source_file.src.len() as u32);
        let mut token_cursor = TokenCursor::new(stream, eof_span);
        let token = token_cursor.next();
        Parser {
            sess,
            token,
            prev_token: Token::dummy(),
            restrictions: Restrictions::empty(),
            expected_tokens: Vec::new(),
            token_cursor,
            depth: 0,
        }
    }

    /// Advance one token. Advancing past `Eof` is a parser bug; it aborts
    /// instead of spinning.
    pub fn bump(&mut self) -> PResult<()> {
        if self.token.is_eof() && self.prev_token.is_eof() {
            return Err(self
                .sess
                .critical_span(self.token.span, "attempted to advance past the end of the file"));
        }
        self.prev_token = std::mem::replace(&mut self.token, self.token_cursor.next());
        self.expected_tokens.clear();
        Ok(())
    }

    /// Look `dist` tokens ahead without advancing. Does not look past the
    /// end of the current delimited group.
    pub fn look_ahead<R>(&self, dist: usize, looker: impl FnOnce(&Token) -> R) -> R {
        if dist == 0 {
            return looker(&self.token);
        }
        match self.token_cursor.frame.tree_cursor.look_ahead(dist - 1) {
            Some(TokenTree::Token(token)) => looker(token),
            Some(TokenTree::Delimited(span, delim, _)) => {
                looker(&TokenTree::open_token(*span, *delim))
            }
            None => {
                let frame = &self.token_cursor.frame;
                let kind = match frame.delim {
                    Delim::NoDelim => TokenKind::Eof,
                    delim => TokenKind::CloseDelim(delim),
                };
                looker(&Token::new(kind, frame.span.close))
            }
        }
    }

    /// Whether the current token matches, recording the expectation for
    /// diagnostics when it does not.
    pub fn check(&mut self, kind: TokenKind) -> bool {
        let matches = self.token.kind == kind;
        if !matches {
            let desc = format!("`{}`", Token::new(kind, Span::DUMMY).printable(&self.sess.interner));
            self.push_expected(desc);
        }
        matches
    }

    pub fn eat(&mut self, kind: TokenKind) -> PResult<bool> {
        let matches = self.check(kind);
        if matches {
            self.bump()?;
        }
        Ok(matches)
    }

    /// Consume the expected token or report "expected .., found ..".
    /// Returns whether it was there; the caller picks the recovery.
    pub fn expect(&mut self, kind: TokenKind) -> PResult<bool> {
        if self.eat(kind)? {
            Ok(true)
        } else {
            let message = self.expected_one_of_found();
            self.sess.error_span(self.token.span, message);
            Ok(false)
        }
    }

    pub fn check_keyword(&mut self, keyword: Symbol) -> bool {
        let matches = self.token.is_keyword(keyword);
        if !matches {
            self.push_expected(format!("`{}`", self.sess.interner.get(keyword)));
        }
        matches
    }

    pub fn eat_keyword(&mut self, keyword: Symbol) -> PResult<bool> {
        let matches = self.check_keyword(keyword);
        if matches {
            self.bump()?;
        }
        Ok(matches)
    }

    pub(crate) fn push_expected(&mut self, desc: String) {
        if !self.expected_tokens.contains(&desc) {
            self.expected_tokens.push(desc);
        }
    }

    /// "expected one of `;`, `=`, found `.`", built from the expectations
    /// recorded since the last bump.
    pub(crate) fn expected_one_of_found(&mut self) -> String {
        let found = self.describe_token(&self.token);
        let expected = std::mem::take(&mut self.expected_tokens);
        match expected.len() {
            0 => format!("unexpected token: {found}"),
            1 => format!("expected {}, found {found}", expected[0]),
            _ => format!("expected one of {}, found {found}", expected.join(", ")),
        }
    }

    pub(crate) fn describe_token(&self, token: &Token) -> String {
        match token.kind {
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Ident(name) if name.is_reserved() => {
                format!("keyword `{}`", self.sess.interner.get(name))
            }
            TokenKind::Literal(lit) => format!("{} literal", lit.kind.descr()),
            _ => format!("`{}`", token.printable(&self.sess.interner)),
        }
    }

    /// Run `parse` one nesting level deeper, aborting at the depth limit so
    /// pathological inputs cannot blow the stack.
    pub(crate) fn with_depth<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(self.sess.critical_span(
                self.token.span,
                format!("exceeded the nesting depth limit of {MAX_NESTING_DEPTH} while parsing"),
            ));
        }
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn with_res<T>(
        &mut self,
        restrictions: Restrictions,
        parse: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let old = std::mem::replace(&mut self.restrictions, restrictions);
        let result = parse(self);
        self.restrictions = old;
        result
    }

    /// A construct the grammar recognizes but the front end does not build.
    pub(crate) fn not_implemented(&self, span: Span, what: &str) -> FatalError {
        self.sess
            .critical_span(span, format!("{what} are not implemented"))
    }
}
