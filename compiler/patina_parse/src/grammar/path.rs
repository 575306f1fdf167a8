//! Paths and identifiers.

use patina_ast::ast::{Path, PathSegment};
use patina_ast::token::TokenKind;
use patina_diagnostic::PResult;
use patina_span::{kw, Ident};

use crate::parser::Parser;

impl Parser<'_> {
    /// A non-reserved identifier, or a path-segment keyword where those are
    /// allowed. Reports and substitutes a placeholder otherwise, without
    /// consuming.
    pub(crate) fn parse_ident(&mut self) -> PResult<Ident> {
        match self.token.ident() {
            Some(ident) if !ident.name.is_reserved() => {
                self.bump()?;
                Ok(ident)
            }
            _ => {
                let message = format!(
                    "expected identifier, found {}",
                    self.describe_token(&self.token)
                );
                self.sess.error_span(self.token.span, message);
                Ok(Ident::new(kw::INVALID, self.token.span))
            }
        }
    }

    /// `a::b::c`, optionally `::`-prefixed.
    pub(crate) fn parse_path(&mut self) -> PResult<Path> {
        let lo = self.token.span;
        let mut segments = Vec::new();
        if self.eat(TokenKind::ModSep)? {
            segments.push(PathSegment::path_root(self.prev_token.span));
        }
        loop {
            segments.push(self.parse_path_segment()?);
            if !self.eat(TokenKind::ModSep)? {
                break;
            }
        }
        let span = lo.to(self.prev_token.span);
        Ok(Path { segments, span })
    }

    fn parse_path_segment(&mut self) -> PResult<PathSegment> {
        match self.token.ident() {
            Some(ident) if !ident.name.is_reserved() || ident.name.is_path_segment_keyword() => {
                self.bump()?;
                Ok(PathSegment::from_ident(ident))
            }
            _ => {
                let message = format!(
                    "expected identifier, found {}",
                    self.describe_token(&self.token)
                );
                self.sess.error_span(self.token.span, message);
                Ok(PathSegment::from_ident(Ident::new(
                    kw::INVALID,
                    self.token.span,
                )))
            }
        }
    }
}
