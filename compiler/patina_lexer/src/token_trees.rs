//! Groups cooked tokens into delimiter-matched token trees.
//!
//! This is also where compound operators are formed: adjacent operator
//! tokens are pushed as joint and `TokenStream::push` glues them.
//!
//! Delimiter recovery: an unexpected closer is reported and skipped, a
//! mismatched closer is reported but left for an enclosing level, and a
//! delimiter still open at end of file is unrecoverable, reported at the
//! outermost opener.

use patina_ast::token::{Delim, Token, TokenKind};
use patina_ast::token_stream::{DelimSpan, Spacing, TokenStream, TokenTree};
use patina_diagnostic::{ParseSession, PResult};
use patina_span::Span;

use crate::cooker::StringReader;

/// Reads one source file into a delimiter-balanced token stream.
pub fn token_trees(sess: &ParseSession) -> PResult<TokenStream> {
    let mut reader = TokenTreeReader::new(sess)?;
    reader.parse_all()
}

struct TokenTreeReader<'sess> {
    sess: &'sess ParseSession,
    reader: StringReader<'sess>,
    /// One cooked token of lookahead.
    token: Token,
    /// Spans of the currently open delimiters, outermost first.
    open_delims: Vec<(Delim, Span)>,
}

impl<'sess> TokenTreeReader<'sess> {
    fn new(sess: &'sess ParseSession) -> PResult<Self> {
        let mut reader = StringReader::new(sess);
        let (token, _) = reader.next_token()?;
        Ok(TokenTreeReader {
            sess,
            reader,
            token,
            open_delims: Vec::new(),
        })
    }

    /// Advance, returning the previous token and its spacing relative to
    /// the new one.
    fn bump(&mut self) -> PResult<(Token, Spacing)> {
        let (next, preceded_by_trivia) = self.reader.next_token()?;
        let spacing = if !preceded_by_trivia && next.is_op() {
            Spacing::Joint
        } else {
            Spacing::Alone
        };
        let current = std::mem::replace(&mut self.token, next);
        Ok((current, spacing))
    }

    fn parse_all(&mut self) -> PResult<TokenStream> {
        let mut stream = TokenStream::new();
        while !self.token.is_eof() {
            if let TokenKind::CloseDelim(delim) = self.token.kind {
                self.sess.error_span(
                    self.token.span,
                    format!("unexpected closing delimiter: `{}`", delim.as_str(false)),
                );
                self.bump()?;
                continue;
            }
            let (tree, spacing) = self.parse_token_tree()?;
            stream.push(tree, spacing);
        }
        Ok(stream)
    }

    /// The current token is neither `Eof` nor a closing delimiter.
    fn parse_token_tree(&mut self) -> PResult<(TokenTree, Spacing)> {
        match self.token.kind {
            TokenKind::OpenDelim(delim) => self.parse_delimited(delim),
            _ => {
                let (token, spacing) = self.bump()?;
                Ok((TokenTree::Token(token), spacing))
            }
        }
    }

    fn parse_delimited(&mut self, delim: Delim) -> PResult<(TokenTree, Spacing)> {
        let open_span = self.token.span;
        self.open_delims.push((delim, open_span));
        self.bump()?;

        let mut stream = TokenStream::new();
        loop {
            match self.token.kind {
                TokenKind::CloseDelim(close) if close == delim => {
                    self.open_delims.pop();
                    let (close_token, spacing) = self.bump()?;
                    let span = DelimSpan::new(open_span, close_token.span);
                    return Ok((TokenTree::Delimited(span, delim, stream), spacing));
                }
                TokenKind::CloseDelim(close) => {
                    // Close this group without consuming the stray closer;
                    // an enclosing group may still match it.
                    self.sess.error_span(
                        self.token.span,
                        format!(
                            "mismatched closing delimiter: expected `{}`, found `{}`",
                            delim.as_str(false),
                            close.as_str(false)
                        ),
                    );
                    self.open_delims.pop();
                    let span = DelimSpan::new(open_span, self.token.span);
                    return Ok((TokenTree::Delimited(span, delim, stream), Spacing::Alone));
                }
                TokenKind::Eof => {
                    let span = self.open_delims.first().map_or(open_span, |&(_, s)| s);
                    return Err(self
                        .sess
                        .critical_span(span, "this file contains an unclosed delimiter"));
                }
                _ => {
                    let (tree, spacing) = self.parse_token_tree()?;
                    stream.push(tree, spacing);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patina_ast::token::BinOpToken;
    use patina_span::SourceFile;
    use pretty_assertions::assert_eq;

    fn trees(src: &str) -> (ParseSession, PResult<TokenStream>) {
        let sess = ParseSession::new(SourceFile::new("test.pat", src));
        let stream = token_trees(&sess);
        (sess, stream)
    }

    fn kinds(stream: &TokenStream) -> Vec<TokenKind> {
        stream
            .iter()
            .map(|(tree, _)| match tree {
                TokenTree::Token(token) => token.kind,
                TokenTree::Delimited(_, delim, _) => TokenKind::OpenDelim(*delim),
            })
            .collect()
    }

    #[test]
    fn groups_nested_delimiters() {
        let (sess, stream) = trees("a { b ( c ) } d");
        let Ok(stream) = stream else {
            panic!("expected a stream");
        };
        assert!(!sess.handler.has_errors());
        assert_eq!(stream.len(), 3);
        let Some((TokenTree::Delimited(span, Delim::Brace, inner), _)) = stream.get(1) else {
            panic!("expected a brace group");
        };
        assert_eq!(span.entire(), Span::new(2, 13));
        assert_eq!(inner.len(), 2);
        let Some((TokenTree::Delimited(_, Delim::Paren, parens), _)) = inner.get(1) else {
            panic!("expected a paren group");
        };
        assert_eq!(parens.len(), 1);
    }

    #[test]
    fn glues_adjacent_operators() {
        let (sess, stream) = trees("x += 1");
        let Ok(stream) = stream else {
            panic!("expected a stream");
        };
        assert!(!sess.handler.has_errors());
        assert_eq!(
            kinds(&stream)[1],
            TokenKind::BinOpEq(BinOpToken::Plus)
        );
    }

    #[test]
    fn separated_operators_stay_apart() {
        let (_, stream) = trees("a = = b");
        let Ok(stream) = stream else {
            panic!("expected a stream");
        };
        let kinds = kinds(&stream);
        assert_eq!(kinds[1], TokenKind::Eq);
        assert_eq!(kinds[2], TokenKind::Eq);
    }

    #[test]
    fn glues_arrow_and_fat_arrow() {
        let (_, stream) = trees("-> =>");
        let Ok(stream) = stream else {
            panic!("expected a stream");
        };
        assert_eq!(
            kinds(&stream),
            vec![TokenKind::RArrow, TokenKind::FatArrow]
        );
    }

    #[test]
    fn unexpected_closer_is_skipped() {
        let (sess, stream) = trees(") a");
        let Ok(stream) = stream else {
            panic!("expected a stream");
        };
        assert_eq!(stream.len(), 1);
        let diags = sess.handler.take();
        assert_eq!(diags[0].message, "unexpected closing delimiter: `)`");
    }

    #[test]
    fn mismatched_closer_is_reported_once_per_group() {
        let (sess, stream) = trees("( a }");
        let Ok(stream) = stream else {
            panic!("expected a stream");
        };
        // The paren group closes at the `}`; the stray `}` is then also
        // unexpected at the top level.
        assert_eq!(stream.len(), 1);
        let diags = sess.handler.take();
        assert_eq!(
            diags[0].message,
            "mismatched closing delimiter: expected `)`, found `}`"
        );
        assert_eq!(diags[1].message, "unexpected closing delimiter: `}`");
    }

    #[test]
    fn unclosed_delimiter_is_fatal_at_the_outermost_opener() {
        let (sess, stream) = trees("a ( b { c");
        assert!(stream.is_err());
        let diags = sess.handler.take();
        assert_eq!(diags[0].message, "this file contains an unclosed delimiter");
        assert_eq!(diags[0].span, Span::new(2, 3));
    }

    #[test]
    fn empty_source_is_an_empty_stream() {
        let (sess, stream) = trees("");
        let Ok(stream) = stream else {
            panic!("expected a stream");
        };
        assert!(stream.is_empty());
        assert!(!sess.handler.has_errors());
    }
}
