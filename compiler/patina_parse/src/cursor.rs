//! Flattening cursor over a token stream.
//!
//! The parser sees a flat token sequence; this cursor walks the token tree
//! and synthesizes the open and close delimiter tokens the tree form does
//! not store. Entering a `Delimited` node pushes a frame, leaving it pops
//! one.

use patina_ast::token::{Delim, Token, TokenKind};
use patina_ast::token_stream::{DelimSpan, TokenStream, TokenTree, TreeCursor};
use patina_span::Span;

pub(crate) struct TokenCursorFrame {
    pub(crate) delim: Delim,
    pub(crate) span: DelimSpan,
    pub(crate) tree_cursor: TreeCursor,
    open_emitted: bool,
    close_emitted: bool,
}

impl TokenCursorFrame {
    fn new(delim: Delim, span: DelimSpan, stream: TokenStream) -> Self {
        TokenCursorFrame {
            delim,
            span,
            tree_cursor: TreeCursor::new(stream),
            open_emitted: delim == Delim::NoDelim,
            close_emitted: delim == Delim::NoDelim,
        }
    }
}

pub(crate) struct TokenCursor {
    pub(crate) frame: TokenCursorFrame,
    stack: Vec<TokenCursorFrame>,
    /// Span for the synthetic end-of-file token, one past the source.
    eof_span: Span,
}

impl TokenCursor {
    pub(crate) fn new(stream: TokenStream, eof_span: Span) -> Self {
        TokenCursor {
            frame: TokenCursorFrame::new(Delim::NoDelim, DelimSpan::dummy(), stream),
            stack: Vec::new(),
            eof_span,
        }
    }

    /// The next flattened token. Yields `Eof` forever once the root stream
    /// is exhausted.
    pub(crate) fn next(&mut self) -> Token {
        loop {
            if !self.frame.open_emitted {
                self.frame.open_emitted = true;
                return TokenTree::open_token(self.frame.span, self.frame.delim);
            }
            match self.frame.tree_cursor.next_with_spacing() {
                Some((TokenTree::Token(token), _)) => return token,
                Some((TokenTree::Delimited(span, delim, stream), _)) => {
                    let frame = TokenCursorFrame::new(delim, span, stream);
                    self.stack.push(std::mem::replace(&mut self.frame, frame));
                }
                None => {
                    if !self.frame.close_emitted {
                        self.frame.close_emitted = true;
                        return TokenTree::close_token(self.frame.span, self.frame.delim);
                    }
                    match self.stack.pop() {
                        Some(frame) => self.frame = frame,
                        None => return Token::new(TokenKind::Eof, self.eof_span),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patina_ast::token_stream::Spacing;
    use pretty_assertions::assert_eq;

    fn tok(kind: TokenKind, lo: u32, hi: u32) -> TokenTree {
        TokenTree::Token(Token::new(kind, Span::new(lo, hi)))
    }

    #[test]
    fn flattens_with_synthetic_delimiters() {
        // `; ( , ) .`
        let mut inner = TokenStream::new();
        inner.push(tok(TokenKind::Comma, 3, 4), Spacing::Alone);
        let mut stream = TokenStream::new();
        stream.push(tok(TokenKind::Semi, 0, 1), Spacing::Alone);
        stream.push(
            TokenTree::Delimited(
                DelimSpan::new(Span::new(2, 3), Span::new(5, 6)),
                Delim::Paren,
                inner,
            ),
            Spacing::Alone,
        );
        stream.push(tok(TokenKind::Dot, 7, 8), Spacing::Alone);

        let mut cursor = TokenCursor::new(stream, Span::point(8));
        let kinds: Vec<TokenKind> = (0..7).map(|_| cursor.next().kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Semi,
                TokenKind::OpenDelim(Delim::Paren),
                TokenKind::Comma,
                TokenKind::CloseDelim(Delim::Paren),
                TokenKind::Dot,
                TokenKind::Eof,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn eof_span_points_past_the_source() {
        let mut cursor = TokenCursor::new(TokenStream::new(), Span::point(12));
        let eof = cursor.next();
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.span, Span::new(12, 12));
    }
}
