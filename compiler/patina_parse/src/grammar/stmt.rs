//! Statement and block grammar.

use patina_ast::ast::{Block, Local, Stmt, StmtKind, DUMMY_NODE_ID};
use patina_ast::token::{Delim, TokenKind};
use patina_diagnostic::PResult;
use patina_span::{kw, Span};

use crate::parser::{Parser, Restrictions};

impl Parser<'_> {
    /// One statement including its trailing semicolon handling.
    pub fn parse_full_stmt(&mut self) -> PResult<Stmt> {
        enum SemiPolicy {
            /// Non-block expression: a semicolon, or a block tail position.
            Required,
            /// Block-like expression: a semicolon still reclassifies.
            Optional,
            /// Local binding: always terminated.
            Local,
            /// Already complete.
            Done,
        }

        let mut stmt = self.parse_stmt()?;
        let policy = match &stmt.kind {
            StmtKind::Expr(expr) if expr.requires_semi_to_be_stmt() => SemiPolicy::Required,
            StmtKind::Expr(_) => SemiPolicy::Optional,
            StmtKind::Local(_) => SemiPolicy::Local,
            StmtKind::Item(_) | StmtKind::Semi(_) | StmtKind::Empty => SemiPolicy::Done,
        };
        match policy {
            SemiPolicy::Required => {
                if self.eat(TokenKind::Semi)? {
                    stmt = stmt.add_trailing_semicolon();
                    stmt.span = stmt.span.to(self.prev_token.span);
                } else if !matches!(
                    self.token.kind,
                    TokenKind::CloseDelim(Delim::Brace) | TokenKind::Eof
                ) {
                    // Not a block tail either; complain but keep going.
                    let message = self.expected_one_of_found();
                    self.sess.error_span(self.token.span, message);
                }
            }
            SemiPolicy::Optional => {
                if self.eat(TokenKind::Semi)? {
                    stmt = stmt.add_trailing_semicolon();
                    stmt.span = stmt.span.to(self.prev_token.span);
                }
            }
            SemiPolicy::Local => {
                self.expect(TokenKind::Semi)?;
                stmt.span = stmt.span.to(self.prev_token.span);
            }
            SemiPolicy::Done => {}
        }
        Ok(stmt)
    }

    fn parse_stmt(&mut self) -> PResult<Stmt> {
        let lo = self.token.span;
        if self.eat(TokenKind::Semi)? {
            return Ok(Stmt::new(StmtKind::Empty, self.prev_token.span));
        }
        if self.eat_keyword(kw::LET)? {
            let local = self.parse_local(lo)?;
            let span = local.span;
            return Ok(Stmt::new(StmtKind::Local(local), span));
        }
        if let Some(stmt) = self.recover_local_without_let(lo)? {
            return Ok(stmt);
        }
        if let Some(item) = self.parse_item()? {
            let span = item.span;
            return Ok(Stmt::new(StmtKind::Item(item), span));
        }
        self.reject_unimplemented_items()?;

        let expr = self.parse_expr_res(Restrictions::STMT_EXPR)?;
        let span = lo.to(expr.span);
        Ok(Stmt::new(StmtKind::Expr(expr), span))
    }

    /// `let pat [: ty] [= init]`; the semicolon belongs to the caller.
    fn parse_local(&mut self, lo: Span) -> PResult<Box<Local>> {
        let pat = self.parse_pat()?;
        let ty = if self.eat(TokenKind::Colon)? {
            Some(self.parse_ty()?)
        } else {
            None
        };
        let init = if self.eat(TokenKind::Eq)? {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Box::new(Local {
            pat,
            ty,
            init,
            id: DUMMY_NODE_ID,
            span: lo.to(self.prev_token.span),
        }))
    }

    /// `mut x = ..`, `auto x = ..` and `var x = ..` are declarations missing
    /// (or written in place of) `let`; fix them up with an error.
    fn recover_local_without_let(&mut self, lo: Span) -> PResult<Option<Stmt>> {
        let next_is_binding = self.look_ahead(1, |t| {
            matches!(t.ident(), Some(ident) if !ident.name.is_reserved())
        });
        if !next_is_binding {
            return Ok(None);
        }

        if self.token.is_keyword(kw::MUT) {
            self.sess.error_span(
                self.token.span,
                "invalid variable declaration: write `let mut` instead of `mut`",
            );
            // Leave `mut` for the pattern parser.
        } else if self.token.is_keyword(kw::AUTO) {
            self.sess.error_span(
                self.token.span,
                "invalid variable declaration: write `let` instead of `auto`",
            );
            self.bump()?;
        } else if matches!(self.token.ident(), Some(ident) if self.sess.interner.get(ident.name) == "var")
        {
            self.sess.error_span(
                self.token.span,
                "invalid variable declaration: write `let` instead of `var`",
            );
            self.bump()?;
        } else {
            return Ok(None);
        }

        let local = self.parse_local(lo)?;
        let span = local.span;
        Ok(Some(Stmt::new(StmtKind::Local(local), span)))
    }

    /// Item keywords the grammar recognizes but the front end does not
    /// build. Continuing would only cascade, so these are unrecoverable.
    fn reject_unimplemented_items(&mut self) -> PResult<()> {
        const UNIMPLEMENTED: &[patina_span::Symbol] = &[
            kw::STRUCT,
            kw::ENUM,
            kw::TRAIT,
            kw::IMPL,
            kw::MOD,
            kw::USE,
            kw::PUB,
            kw::TYPE,
            kw::EXTERN,
            kw::MACRO,
            kw::MACRO_RULES,
            kw::CRATE,
        ];
        for &keyword in UNIMPLEMENTED {
            if self.token.is_keyword(keyword) {
                let word = self.sess.interner.get(keyword);
                return Err(
                    self.not_implemented(self.token.span, &format!("`{word}` items"))
                );
            }
        }
        if self.token.is_keyword(kw::UNION) && self.look_ahead(1, |t| t.is_ident()) {
            return Err(self.not_implemented(self.token.span, "`union` items"));
        }
        Ok(())
    }

    /// A brace-delimited block. A missing `{` produces an empty block at
    /// the current token so callers always get a body.
    pub(crate) fn parse_block(&mut self) -> PResult<Box<Block>> {
        let lo = self.token.span;
        if !self.eat(TokenKind::OpenDelim(Delim::Brace))? {
            let message = self.expected_one_of_found();
            self.sess.error_span(self.token.span, message);
            return Ok(Box::new(Block {
                stmts: Vec::new(),
                id: DUMMY_NODE_ID,
                span: self.token.span,
            }));
        }
        self.with_depth(|p| {
            let mut stmts = Vec::new();
            while !p.check(TokenKind::CloseDelim(Delim::Brace)) && !p.token.is_eof() {
                let before = p.token.span;
                stmts.push(p.parse_full_stmt()?);
                // Recovery may have consumed nothing; skip a token rather
                // than loop forever.
                if p.token.span == before
                    && !p.token.is_eof()
                    && p.token.kind != TokenKind::CloseDelim(Delim::Brace)
                {
                    p.bump()?;
                }
            }
            if !p.eat(TokenKind::CloseDelim(Delim::Brace))? {
                let message = p.expected_one_of_found();
                p.sess.error_span(p.token.span, message);
            }
            Ok(Box::new(Block {
                stmts,
                id: DUMMY_NODE_ID,
                span: lo.to(p.prev_token.span),
            }))
        })
    }
}
