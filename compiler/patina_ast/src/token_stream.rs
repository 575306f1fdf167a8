//! Token trees and streams.
//!
//! A `TokenStream` is the delimiter-grouped form of the token sequence:
//! ordinary tokens interleaved with `Delimited` nodes that own the tokens
//! between a matching open/close pair. The open and close tokens themselves
//! are not stored; the parser's cursor synthesizes them when flattening.

use patina_span::Span;

use crate::token::{Delim, Token, TokenKind};

/// Whether a token was immediately adjacent to the next one, with no
/// intervening trivia. Only joint tokens are candidates for gluing.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Spacing {
    Alone,
    Joint,
}

/// The open and close spans of a delimited group.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct DelimSpan {
    pub open: Span,
    pub close: Span,
}

impl DelimSpan {
    pub const fn new(open: Span, close: Span) -> Self {
        DelimSpan { open, close }
    }

    pub const fn dummy() -> Self {
        DelimSpan {
            open: Span::DUMMY,
            close: Span::DUMMY,
        }
    }

    /// The span from the open delimiter through the close delimiter.
    pub fn entire(&self) -> Span {
        self.open.to(self.close)
    }
}

/// One level of bracket nesting: a token, or a delimited subtree.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenTree {
    Token(Token),
    Delimited(DelimSpan, Delim, TokenStream),
}

impl TokenTree {
    pub fn span(&self) -> Span {
        match self {
            TokenTree::Token(token) => token.span,
            TokenTree::Delimited(span, ..) => span.entire(),
        }
    }

    /// Synthetic open-delimiter token for flattening.
    pub fn open_token(span: DelimSpan, delim: Delim) -> Token {
        Token::new(TokenKind::OpenDelim(delim), span.open)
    }

    /// Synthetic close-delimiter token for flattening.
    pub fn close_token(span: DelimSpan, delim: Delim) -> Token {
        Token::new(TokenKind::CloseDelim(delim), span.close)
    }
}

/// Ordered sequence of `(tree, spacing)` pairs.
///
/// `push` glues: a joint operator token followed by a compatible operator
/// token collapses into the compound token (`=` + `=` becomes `==`). The
/// tokenizer never produces compound operators itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenStream(Vec<(TokenTree, Spacing)>);

impl TokenStream {
    pub fn new() -> Self {
        TokenStream(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&(TokenTree, Spacing)> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (TokenTree, Spacing)> {
        self.0.iter()
    }

    /// Append a tree, gluing it onto a joint operator predecessor when the
    /// pair forms a compound operator.
    pub fn push(&mut self, tree: TokenTree, spacing: Spacing) {
        if let Some((TokenTree::Token(prev), Spacing::Joint)) = self.0.last() {
            if let TokenTree::Token(token) = &tree {
                if let Some(glued) = prev.glue(token) {
                    self.0.pop();
                    self.0.push((TokenTree::Token(glued), spacing));
                    return;
                }
            }
        }
        self.0.push((tree, spacing));
    }
}

impl IntoIterator for TokenStream {
    type Item = (TokenTree, Spacing);
    type IntoIter = std::vec::IntoIter<(TokenTree, Spacing)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Destructive in-order walk over one stream level.
///
/// `look_ahead` previews without consuming and never descends into or past
/// a `Delimited` subtree boundary.
#[derive(Clone, Debug)]
pub struct TreeCursor {
    iter: std::vec::IntoIter<(TokenTree, Spacing)>,
}

impl TreeCursor {
    pub fn new(stream: TokenStream) -> Self {
        TreeCursor {
            iter: stream.into_iter(),
        }
    }

    pub fn next_with_spacing(&mut self) -> Option<(TokenTree, Spacing)> {
        self.iter.next()
    }

    pub fn look_ahead(&self, n: usize) -> Option<&TokenTree> {
        self.iter.as_slice().get(n).map(|(tree, _)| tree)
    }
}

impl Default for TreeCursor {
    fn default() -> Self {
        TreeCursor::new(TokenStream::new())
    }
}
