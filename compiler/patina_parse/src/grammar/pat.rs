//! Pattern grammar.

use patina_ast::ast::{Expr, ExprKind, Pat, PatKind};
use patina_ast::op::{BindingMode, Mutability, UnOpKind};
use patina_ast::token::{BinOpToken, Delim, Lit, LitKind, TokenKind};
use patina_diagnostic::PResult;
use patina_span::kw;

use crate::parser::Parser;

impl Parser<'_> {
    pub(crate) fn parse_pat(&mut self) -> PResult<Box<Pat>> {
        self.with_depth(|p| {
            let pat = p.parse_pat_inner()?;
            // Constructs the grammar knows but the front end does not
            // build; reported after the leading pattern so the span is
            // precise.
            if p.check(TokenKind::BinOp(BinOpToken::Or)) || p.check(TokenKind::OrOr) {
                return Err(p.not_implemented(p.token.span, "or-patterns"));
            }
            if p.token.is_range_kind() {
                return Err(p.not_implemented(p.token.span, "range patterns"));
            }
            Ok(pat)
        })
    }

    fn parse_pat_inner(&mut self) -> PResult<Box<Pat>> {
        let lo = self.token.span;
        let kind = match self.token.kind {
            TokenKind::Ident(name) if name == kw::UNDERSCORE => {
                self.bump()?;
                PatKind::Wild
            }
            TokenKind::BinOp(BinOpToken::And) => {
                self.bump()?;
                let mutbl = self.parse_mutability()?;
                PatKind::Ref(self.parse_pat()?, mutbl)
            }
            TokenKind::AndAnd => {
                self.bump()?;
                let mutbl = self.parse_mutability()?;
                let inner = self.parse_pat()?;
                let inner_span = lo.to(inner.span);
                PatKind::Ref(
                    Box::new(Pat::new(PatKind::Ref(inner, mutbl), inner_span)),
                    Mutability::Not,
                )
            }
            TokenKind::OpenDelim(Delim::Paren) => {
                self.bump()?;
                if self.check(TokenKind::CloseDelim(Delim::Paren)) {
                    return Err(self.not_implemented(lo.to(self.token.span), "tuple patterns"));
                }
                let pat = self.parse_pat()?;
                if self.check(TokenKind::Comma) {
                    return Err(self.not_implemented(lo.to(self.token.span), "tuple patterns"));
                }
                self.expect(TokenKind::CloseDelim(Delim::Paren))?;
                PatKind::Paren(pat)
            }
            TokenKind::OpenDelim(Delim::Bracket) => {
                return Err(self.not_implemented(self.token.span, "slice patterns"));
            }
            TokenKind::Literal(_) => PatKind::Lit(self.parse_literal_maybe_minus()?),
            TokenKind::BinOp(BinOpToken::Minus) => {
                PatKind::Lit(self.parse_literal_maybe_minus()?)
            }
            TokenKind::Ident(name) if name.is_bool_lit() => {
                PatKind::Lit(self.parse_literal_maybe_minus()?)
            }
            TokenKind::Ident(name) if name == kw::REF => {
                self.bump()?;
                let mutbl = self.parse_mutability()?;
                let ident = self.parse_ident()?;
                self.parse_binding(BindingMode::ByRef(mutbl), ident)?
            }
            TokenKind::Ident(name) if name == kw::MUT => {
                self.bump()?;
                let ident = self.parse_ident()?;
                self.parse_binding(BindingMode::ByValue(Mutability::Mut), ident)?
            }
            TokenKind::Ident(name) if !name.is_reserved() => {
                if self.look_ahead(1, |t| t.kind == TokenKind::ModSep) {
                    self.parse_path_pat()?
                } else if self.look_ahead(1, |t| {
                    matches!(t.kind, TokenKind::OpenDelim(Delim::Paren | Delim::Brace))
                }) {
                    self.parse_path_pat()?
                } else {
                    let ident = self.parse_ident()?;
                    self.parse_binding(BindingMode::ByValue(Mutability::Not), ident)?
                }
            }
            TokenKind::ModSep => self.parse_path_pat()?,
            TokenKind::Lt => {
                return Err(self.not_implemented(self.token.span, "qualified paths"));
            }
            _ => {
                let message = format!(
                    "expected pattern, found {}",
                    self.describe_token(&self.token)
                );
                self.sess.error_span(self.token.span, message);
                return Ok(Box::new(Pat::new(PatKind::Wild, self.token.span)));
            }
        };
        Ok(Box::new(Pat::new(kind, lo.to(self.prev_token.span))))
    }

    fn parse_binding(
        &mut self,
        mode: BindingMode,
        ident: patina_span::Ident,
    ) -> PResult<PatKind> {
        let sub = if self.eat(TokenKind::At)? {
            Some(self.parse_pat()?)
        } else {
            None
        };
        Ok(PatKind::Ident(mode, ident, sub))
    }

    fn parse_path_pat(&mut self) -> PResult<PatKind> {
        let path = self.parse_path()?;
        match self.token.kind {
            TokenKind::OpenDelim(Delim::Paren) => {
                Err(self.not_implemented(path.span.to(self.token.span), "tuple struct patterns"))
            }
            TokenKind::OpenDelim(Delim::Brace) => {
                Err(self.not_implemented(path.span.to(self.token.span), "struct patterns"))
            }
            _ => Ok(PatKind::Path(path)),
        }
    }

    /// A literal pattern, with an optional leading minus kept as a unary
    /// expression the way the literal appears in source.
    fn parse_literal_maybe_minus(&mut self) -> PResult<Box<Expr>> {
        let lo = self.token.span;
        if self.eat(TokenKind::BinOp(BinOpToken::Minus))? {
            let lit = self.parse_literal_expr()?;
            let span = lo.to(lit.span);
            return Ok(Box::new(Expr::new(
                ExprKind::Unary(UnOpKind::Neg, lit),
                span,
            )));
        }
        self.parse_literal_expr()
    }

    fn parse_literal_expr(&mut self) -> PResult<Box<Expr>> {
        let lo = self.token.span;
        let kind = match self.token.kind {
            TokenKind::Literal(lit) => {
                self.bump()?;
                ExprKind::Lit(lit)
            }
            TokenKind::Ident(name) if name.is_bool_lit() => {
                self.bump()?;
                ExprKind::Lit(Lit::new(LitKind::Bool, name, None))
            }
            _ => {
                let message = format!(
                    "expected literal, found {}",
                    self.describe_token(&self.token)
                );
                self.sess.error_span(self.token.span, message);
                return Ok(Box::new(Expr::new(ExprKind::Err, self.token.span)));
            }
        };
        Ok(Box::new(Expr::new(kind, lo.to(self.prev_token.span))))
    }
}
