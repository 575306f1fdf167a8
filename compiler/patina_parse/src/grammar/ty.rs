//! Type grammar.

use patina_ast::ast::{AnonConst, Ty, TyKind, DUMMY_NODE_ID};
use patina_ast::op::Mutability;
use patina_ast::token::{BinOpToken, Delim, TokenKind};
use patina_diagnostic::PResult;
use patina_span::kw;

use crate::parser::Parser;

impl Parser<'_> {
    pub(crate) fn parse_ty(&mut self) -> PResult<Box<Ty>> {
        self.with_depth(|p| p.parse_ty_inner())
    }

    fn parse_ty_inner(&mut self) -> PResult<Box<Ty>> {
        let lo = self.token.span;
        let kind = match self.token.kind {
            TokenKind::Ident(name) if name == kw::UNDERSCORE => {
                self.bump()?;
                TyKind::Infer
            }
            TokenKind::BinOp(BinOpToken::And) => {
                self.bump()?;
                let mutbl = self.parse_mutability()?;
                TyKind::Ref(mutbl, self.parse_ty()?)
            }
            TokenKind::AndAnd => {
                // `&&ty` is two references.
                self.bump()?;
                let mutbl = self.parse_mutability()?;
                let inner = self.parse_ty()?;
                let inner_span = lo.to(inner.span);
                TyKind::Ref(
                    Mutability::Not,
                    Box::new(Ty::new(TyKind::Ref(mutbl, inner), inner_span)),
                )
            }
            TokenKind::OpenDelim(Delim::Paren) => {
                self.bump()?;
                if self.check(TokenKind::CloseDelim(Delim::Paren)) {
                    return Err(self.not_implemented(lo.to(self.token.span), "tuple types"));
                }
                let ty = self.parse_ty()?;
                if self.check(TokenKind::Comma) {
                    return Err(self.not_implemented(lo.to(self.token.span), "tuple types"));
                }
                self.expect(TokenKind::CloseDelim(Delim::Paren))?;
                TyKind::Paren(ty)
            }
            TokenKind::OpenDelim(Delim::Bracket) => {
                self.bump()?;
                let element = self.parse_ty()?;
                if !self.eat(TokenKind::Semi)? {
                    return Err(self.not_implemented(lo.to(self.token.span), "slice types"));
                }
                let count = AnonConst {
                    id: DUMMY_NODE_ID,
                    value: self.parse_expr()?,
                };
                self.expect(TokenKind::CloseDelim(Delim::Bracket))?;
                TyKind::Array(element, count)
            }
            TokenKind::Lt => {
                return Err(self.not_implemented(self.token.span, "qualified paths"));
            }
            TokenKind::Ident(name)
                if matches!(
                    name,
                    kw::DYN | kw::IMPL | kw::FN | kw::EXTERN | kw::TYPEOF | kw::UNSAFE | kw::FOR
                ) =>
            {
                let word = self.sess.interner.get(name);
                return Err(self.not_implemented(self.token.span, &format!("`{word}` types")));
            }
            _ if self.token.can_begin_type() && matches!(
                self.token.kind,
                TokenKind::Ident(_) | TokenKind::ModSep
            ) =>
            {
                let path = self.parse_path()?;
                if self.check(TokenKind::Lt) {
                    return Err(self.not_implemented(self.token.span, "generic arguments"));
                }
                TyKind::Path(path)
            }
            _ => {
                let message = format!(
                    "expected type, found {}",
                    self.describe_token(&self.token)
                );
                self.sess.error_span(self.token.span, message);
                return Ok(Box::new(Ty::new(TyKind::Err, self.token.span)));
            }
        };
        Ok(Box::new(Ty::new(kind, lo.to(self.prev_token.span))))
    }

    /// An optional `mut`. `const` in this position is a raw-pointer form
    /// the front end does not build.
    pub(crate) fn parse_mutability(&mut self) -> PResult<Mutability> {
        if self.eat_keyword(kw::MUT)? {
            Ok(Mutability::Mut)
        } else {
            Ok(Mutability::Not)
        }
    }
}
