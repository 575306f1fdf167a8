//! Item grammar: the free-standing declarations a statement can open.

use patina_ast::ast::{
    FnDecl, FnRetTy, FnSig, Item, ItemKind, Param, DUMMY_NODE_ID,
};
use patina_ast::token::{Delim, TokenKind};
use patina_diagnostic::PResult;
use patina_span::{kw, Span};

use crate::parser::Parser;

impl Parser<'_> {
    /// An item, or `None` when the current token opens none.
    pub(crate) fn parse_item(&mut self) -> PResult<Option<Box<Item>>> {
        let lo = self.token.span;
        if self.eat_keyword(kw::FN)? {
            return Ok(Some(self.parse_fn_item(lo)?));
        }
        if self.token.is_keyword(kw::CONST) {
            // `const` also opens an unimplemented `const fn`.
            if self.look_ahead(1, |t| t.is_keyword(kw::FN)) {
                return Err(self.not_implemented(lo, "`const fn` items"));
            }
            self.bump()?;
            return Ok(Some(self.parse_const_item(lo)?));
        }
        if self.eat_keyword(kw::STATIC)? {
            return Ok(Some(self.parse_static_item(lo)?));
        }
        Ok(None)
    }

    fn parse_fn_item(&mut self, lo: Span) -> PResult<Box<Item>> {
        let ident = self.parse_ident()?;
        if self.check(TokenKind::Lt) {
            return Err(self.not_implemented(self.token.span, "generic parameters"));
        }
        let decl = self.parse_fn_decl()?;
        let sig = FnSig {
            decl,
            span: lo.to(self.prev_token.span),
        };
        let body = if self.check(TokenKind::OpenDelim(Delim::Brace)) {
            Some(self.parse_block()?)
        } else {
            let message = self.expected_one_of_found();
            self.sess.error_span(self.token.span, message);
            None
        };
        Ok(Box::new(Item {
            ident,
            kind: ItemKind::Fn(sig, body),
            id: DUMMY_NODE_ID,
            span: lo.to(self.prev_token.span),
        }))
    }

    fn parse_fn_decl(&mut self) -> PResult<Box<FnDecl>> {
        self.expect(TokenKind::OpenDelim(Delim::Paren))?;
        let mut inputs = Vec::new();
        while !self.check(TokenKind::CloseDelim(Delim::Paren)) && !self.token.is_eof() {
            inputs.push(self.parse_param()?);
            if !self.eat(TokenKind::Comma)? {
                break;
            }
        }
        self.expect(TokenKind::CloseDelim(Delim::Paren))?;
        let output = if self.eat(TokenKind::RArrow)? {
            FnRetTy::Ty(self.parse_ty()?)
        } else {
            FnRetTy::Default(Span::point(self.prev_token.span.hi))
        };
        Ok(Box::new(FnDecl { inputs, output }))
    }

    fn parse_param(&mut self) -> PResult<Param> {
        let lo = self.token.span;
        let pat = self.parse_pat()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_ty()?;
        Ok(Param {
            pat,
            ty,
            id: DUMMY_NODE_ID,
            span: lo.to(self.prev_token.span),
        })
    }

    /// `const NAME: ty [= value] ;`
    fn parse_const_item(&mut self, lo: Span) -> PResult<Box<Item>> {
        let ident = self.parse_const_name()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_ty()?;
        let init = if self.eat(TokenKind::Eq)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(TokenKind::Semi)?;
        Ok(Box::new(Item {
            ident,
            kind: ItemKind::Const(ty, init),
            id: DUMMY_NODE_ID,
            span: lo.to(self.prev_token.span),
        }))
    }

    /// `const _: ..` is allowed; plain identifiers go through the usual
    /// path.
    fn parse_const_name(&mut self) -> PResult<patina_span::Ident> {
        match self.token.ident() {
            Some(ident) if ident.name == kw::UNDERSCORE => {
                self.bump()?;
                Ok(ident)
            }
            _ => self.parse_ident(),
        }
    }

    fn parse_static_item(&mut self, lo: Span) -> PResult<Box<Item>> {
        let mutbl = self.parse_mutability()?;
        let ident = self.parse_ident()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_ty()?;
        let init = if self.eat(TokenKind::Eq)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        self.expect(TokenKind::Semi)?;
        Ok(Box::new(Item {
            ident,
            kind: ItemKind::Static(mutbl, ty, init),
            id: DUMMY_NODE_ID,
            span: lo.to(self.prev_token.span),
        }))
    }
}
