//! Expression grammar: precedence climbing over [`AssocOp`] plus the
//! prefix, postfix and bottom forms.

use patina_ast::assoc::{AssocOp, Fixity};
use patina_ast::ast::{AnonConst, Arm, Expr, ExprKind, Label, DUMMY_NODE_ID};
use patina_ast::op::{BinOpKind, BorrowKind, Mutability, RangeLimits, UnOpKind};
use patina_ast::token::{BinOpToken, Delim, Lit, LitKind, TokenKind};
use patina_diagnostic::PResult;
use patina_span::{kw, Ident, Span};

use crate::parser::{Parser, Restrictions};

impl Parser<'_> {
    pub fn parse_expr(&mut self) -> PResult<Box<Expr>> {
        self.parse_expr_res(Restrictions::empty())
    }

    pub(crate) fn parse_expr_res(&mut self, res: Restrictions) -> PResult<Box<Expr>> {
        self.with_res(res, |p| p.parse_assoc_expr(0))
    }

    /// Precedence climbing: parse a prefix expression, then fold in every
    /// following operator that binds at least as tightly as `min_prec`.
    fn parse_assoc_expr(&mut self, min_prec: u8) -> PResult<Box<Expr>> {
        self.with_depth(|p| {
            let lhs = p.parse_prefix_expr()?;
            p.parse_assoc_expr_rest(min_prec, lhs)
        })
    }

    fn parse_assoc_expr_rest(
        &mut self,
        min_prec: u8,
        mut lhs: Box<Expr>,
    ) -> PResult<Box<Expr>> {
        loop {
            // A trailing operator folds even a block-like expression into a
            // larger one; completeness alone does not end the climb.
            let Some(op) = AssocOp::from_token(&self.token) else {
                break;
            };
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            if op.is_comparison() {
                if let ExprKind::Binary(lhs_op, ..) = &lhs.kind {
                    if lhs_op.is_comparison() {
                        self.sess.error_span(
                            self.token.span,
                            "comparison operators cannot be chained",
                        );
                        // Keep the flat comparison; the rest of the chain is
                        // left for the caller.
                        return Ok(lhs);
                    }
                }
            }
            let op_span = self.token.span;
            self.bump()?;

            match op {
                AssocOp::As => {
                    let ty = self.parse_ty()?;
                    let span = lhs.span.to(ty.span);
                    lhs = Box::new(Expr::new(ExprKind::Cast(lhs, ty), span));
                    continue;
                }
                AssocOp::Colon => {
                    let ty = self.parse_ty()?;
                    let span = lhs.span.to(ty.span);
                    lhs = Box::new(Expr::new(ExprKind::Type(lhs, ty), span));
                    continue;
                }
                AssocOp::DotDot | AssocOp::DotDotEq => {
                    // Ranges do not chain; `a .. b .. c` stops after one.
                    let limits = if op == AssocOp::DotDot {
                        RangeLimits::HalfOpen
                    } else {
                        RangeLimits::Closed
                    };
                    let end = if self.token.can_begin_expr() {
                        Some(self.parse_assoc_expr(prec + 1)?)
                    } else {
                        None
                    };
                    let hi = end.as_ref().map_or(op_span, |e| e.span);
                    let span = lhs.span.to(hi);
                    lhs = Box::new(Expr::new(ExprKind::Range(Some(lhs), end, limits), span));
                    break;
                }
                _ => {}
            }

            let next_prec = match op.fixity() {
                Fixity::Right => prec,
                Fixity::Left | Fixity::None => prec + 1,
            };
            let rhs = self.parse_assoc_expr(next_prec)?;
            let span = lhs.span.to(rhs.span);
            let kind = match op {
                AssocOp::Assign => ExprKind::Assign(lhs, rhs, op_span),
                AssocOp::AssignOp(token) => {
                    ExprKind::AssignOp(BinOpKind::from_token(token), lhs, rhs)
                }
                _ => {
                    let Some(binop) = op.to_ast_binop() else {
                        // Every operator without a binary form was special-
                        // cased above; ending up here is a front-end bug.
                        return Err(self.sess.critical_span(
                            op_span,
                            "internal compiler error: unhandled associative operator",
                        ));
                    };
                    ExprKind::Binary(binop, lhs, rhs)
                }
            };
            lhs = Box::new(Expr::new(kind, span));
        }
        Ok(lhs)
    }

    /// Block-like expressions at a statement head are complete; a postfix
    /// form after one starts the next statement instead of attaching.
    fn expr_is_complete(&self, expr: &Expr) -> bool {
        self.restrictions.contains(Restrictions::STMT_EXPR)
            && !expr.requires_semi_to_be_stmt()
    }

    fn parse_prefix_expr(&mut self) -> PResult<Box<Expr>> {
        let lo = self.token.span;
        let kind = match self.token.kind {
            TokenKind::Not => {
                self.bump()?;
                ExprKind::Unary(UnOpKind::Not, self.parse_prefix_expr()?)
            }
            TokenKind::BinOp(BinOpToken::Minus) => {
                self.bump()?;
                ExprKind::Unary(UnOpKind::Neg, self.parse_prefix_expr()?)
            }
            TokenKind::BinOp(BinOpToken::Star) => {
                self.bump()?;
                ExprKind::Unary(UnOpKind::Deref, self.parse_prefix_expr()?)
            }
            TokenKind::BinOp(BinOpToken::And) => {
                self.bump()?;
                let mutbl = self.parse_mutability()?;
                ExprKind::AddrOf(BorrowKind::Ref, mutbl, self.parse_prefix_expr()?)
            }
            TokenKind::AndAnd => {
                // `&&x` borrows a borrow.
                self.bump()?;
                let mutbl = self.parse_mutability()?;
                let inner = self.parse_prefix_expr()?;
                let inner_span = lo.to(inner.span);
                let inner = Box::new(Expr::new(
                    ExprKind::AddrOf(BorrowKind::Ref, mutbl, inner),
                    inner_span,
                ));
                ExprKind::AddrOf(BorrowKind::Ref, Mutability::Not, inner)
            }
            _ => return self.parse_postfix_expr(),
        };
        Ok(Box::new(Expr::new(kind, lo.to(self.prev_token.span))))
    }

    fn parse_postfix_expr(&mut self) -> PResult<Box<Expr>> {
        let lo = self.token.span;
        let mut expr = self.parse_bottom_expr()?;
        loop {
            if self.expr_is_complete(&expr) {
                break;
            }
            let kind = match self.token.kind {
                TokenKind::OpenDelim(Delim::Paren) => {
                    ExprKind::Call(expr, self.parse_call_args()?)
                }
                TokenKind::OpenDelim(Delim::Bracket) => {
                    self.bump()?;
                    let index = self.parse_expr()?;
                    self.expect(TokenKind::CloseDelim(Delim::Bracket))?;
                    ExprKind::Index(expr, index)
                }
                TokenKind::Question => {
                    self.bump()?;
                    ExprKind::Try(expr)
                }
                TokenKind::Dot => {
                    return Err(
                        self.not_implemented(self.token.span, "field access and method calls")
                    );
                }
                _ => break,
            };
            expr = Box::new(Expr::new(kind, lo.to(self.prev_token.span)));
        }
        Ok(expr)
    }

    fn parse_call_args(&mut self) -> PResult<Vec<Expr>> {
        self.bump()?;
        let mut args = Vec::new();
        while !self.check(TokenKind::CloseDelim(Delim::Paren)) && !self.token.is_eof() {
            args.push(*self.parse_expr()?);
            if !self.eat(TokenKind::Comma)? {
                break;
            }
        }
        self.expect(TokenKind::CloseDelim(Delim::Paren))?;
        Ok(args)
    }

    fn parse_bottom_expr(&mut self) -> PResult<Box<Expr>> {
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
            TokenKind::OpenDelim(Delim::Paren) => return self.parse_paren_expr(),
            TokenKind::OpenDelim(Delim::Bracket) => return self.parse_array_expr(),
            TokenKind::OpenDelim(Delim::Brace) => {
                ExprKind::Block(self.parse_block()?, None)
            }
            TokenKind::DotDot | TokenKind::DotDotEq => return self.parse_prefix_range_expr(),
            TokenKind::Lifetime(_) => return self.parse_labeled_expr(),
            TokenKind::OrOr | TokenKind::BinOp(BinOpToken::Or) => {
                return Err(self.not_implemented(self.token.span, "closures"));
            }
            TokenKind::Lt => {
                return Err(self.not_implemented(self.token.span, "qualified paths"));
            }
            TokenKind::Ident(name) if name == kw::IF => return self.parse_if_expr(),
            TokenKind::Ident(name) if name == kw::WHILE => return self.parse_while_expr(None, lo),
            TokenKind::Ident(name) if name == kw::LOOP => return self.parse_loop_expr(None, lo),
            TokenKind::Ident(name) if name == kw::FOR => return self.parse_for_expr(None, lo),
            TokenKind::Ident(name) if name == kw::MATCH => return self.parse_match_expr(),
            TokenKind::Ident(name) if name == kw::RETURN => {
                self.bump()?;
                let value = if self.token.can_begin_expr() {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                ExprKind::Ret(value)
            }
            TokenKind::Ident(name) if name == kw::BREAK => {
                self.bump()?;
                let label = self.eat_label()?;
                let value = if self.token.can_begin_expr()
                    && !matches!(self.token.kind, TokenKind::OpenDelim(Delim::Brace))
                {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                ExprKind::Break(label, value)
            }
            TokenKind::Ident(name) if name == kw::CONTINUE => {
                self.bump()?;
                ExprKind::Continue(self.eat_label()?)
            }
            TokenKind::Ident(name) if name == kw::LET => return self.parse_let_expr(),
            TokenKind::Ident(name)
                if matches!(
                    name,
                    kw::MOVE | kw::ASYNC | kw::UNSAFE | kw::DO | kw::BOX | kw::YIELD
                ) =>
            {
                let word = self.sess.interner.get(name);
                return Err(
                    self.not_implemented(self.token.span, &format!("`{word}` expressions"))
                );
            }
            TokenKind::Ident(_) if self.token.can_begin_expr() => return self.parse_path_expr(),
            TokenKind::ModSep => return self.parse_path_expr(),
            _ => {
                let message = format!(
                    "expected expression, found {}",
                    self.describe_token(&self.token)
                );
                self.sess.error_span(self.token.span, message);
                return Ok(Box::new(Expr::new(ExprKind::Err, self.token.span)));
            }
        };
        Ok(Box::new(Expr::new(kind, lo.to(self.prev_token.span))))
    }

    fn parse_path_expr(&mut self) -> PResult<Box<Expr>> {
        let path = self.parse_path()?;
        if matches!(self.token.kind, TokenKind::OpenDelim(Delim::Brace))
            && !self.restrictions.contains(Restrictions::NO_STRUCT_LITERAL)
        {
            return Err(
                self.not_implemented(path.span.to(self.token.span), "struct literal expressions")
            );
        }
        let span = path.span;
        Ok(Box::new(Expr::new(ExprKind::Path(path), span)))
    }

    fn parse_paren_expr(&mut self) -> PResult<Box<Expr>> {
        let lo = self.token.span;
        self.bump()?;
        if self.check(TokenKind::CloseDelim(Delim::Paren)) {
            return Err(self.not_implemented(lo.to(self.token.span), "tuple expressions"));
        }
        let inner = self.parse_expr()?;
        if self.check(TokenKind::Comma) {
            return Err(self.not_implemented(lo.to(self.token.span), "tuple expressions"));
        }
        self.expect(TokenKind::CloseDelim(Delim::Paren))?;
        Ok(Box::new(Expr::new(
            ExprKind::Paren(inner),
            lo.to(self.prev_token.span),
        )))
    }

    /// `[a, b, c]` or `[elem; count]`.
    fn parse_array_expr(&mut self) -> PResult<Box<Expr>> {
        let lo = self.token.span;
        self.bump()?;
        if self.eat(TokenKind::CloseDelim(Delim::Bracket))? {
            return Ok(Box::new(Expr::new(
                ExprKind::Array(Vec::new()),
                lo.to(self.prev_token.span),
            )));
        }
        let first = self.parse_expr()?;
        let kind = if self.eat(TokenKind::Semi)? {
            let count = AnonConst {
                id: DUMMY_NODE_ID,
                value: self.parse_expr()?,
            };
            ExprKind::Repeat(first, count)
        } else {
            let mut elements = vec![*first];
            while self.eat(TokenKind::Comma)? {
                if self.check(TokenKind::CloseDelim(Delim::Bracket)) {
                    break;
                }
                elements.push(*self.parse_expr()?);
            }
            ExprKind::Array(elements)
        };
        self.expect(TokenKind::CloseDelim(Delim::Bracket))?;
        Ok(Box::new(Expr::new(kind, lo.to(self.prev_token.span))))
    }

    /// `..`, `..=end`, `..end` with no start operand.
    fn parse_prefix_range_expr(&mut self) -> PResult<Box<Expr>> {
        let lo = self.token.span;
        let limits = if self.token.kind == TokenKind::DotDot {
            RangeLimits::HalfOpen
        } else {
            RangeLimits::Closed
        };
        let prec = AssocOp::DotDot.precedence();
        self.bump()?;
        let end = if self.token.can_begin_expr() {
            Some(self.parse_assoc_expr(prec + 1)?)
        } else {
            None
        };
        let span = lo.to(self.prev_token.span);
        Ok(Box::new(Expr::new(ExprKind::Range(None, end, limits), span)))
    }

    fn eat_label(&mut self) -> PResult<Option<Label>> {
        match self.token.lifetime() {
            Some(name) => {
                let label = Label {
                    ident: Ident::new(name, self.token.span),
                };
                self.bump()?;
                Ok(Some(label))
            }
            None => Ok(None),
        }
    }

    fn parse_labeled_expr(&mut self) -> PResult<Box<Expr>> {
        let lo = self.token.span;
        let Some(label) = self.eat_label()? else {
            let message = format!(
                "expected expression, found {}",
                self.describe_token(&self.token)
            );
            self.sess.error_span(self.token.span, message);
            return Ok(Box::new(Expr::new(ExprKind::Err, self.token.span)));
        };
        self.expect(TokenKind::Colon)?;
        match self.token.kind {
            TokenKind::Ident(name) if name == kw::WHILE => self.parse_while_expr(Some(label), lo),
            TokenKind::Ident(name) if name == kw::LOOP => self.parse_loop_expr(Some(label), lo),
            TokenKind::Ident(name) if name == kw::FOR => self.parse_for_expr(Some(label), lo),
            TokenKind::OpenDelim(Delim::Brace) => {
                let block = self.parse_block()?;
                let span = lo.to(self.prev_token.span);
                Ok(Box::new(Expr::new(ExprKind::Block(block, Some(label)), span)))
            }
            _ => {
                self.sess.error_span(
                    self.token.span,
                    "expected `while`, `for`, `loop` or a block after a label",
                );
                self.parse_expr()
            }
        }
    }

    fn parse_if_expr(&mut self) -> PResult<Box<Expr>> {
        let lo = self.token.span;
        self.bump()?;
        let cond = self.parse_cond_expr()?;
        let then_block = self.parse_block()?;
        let else_expr = if self.eat_keyword(kw::ELSE)? {
            Some(self.parse_else_expr()?)
        } else {
            None
        };
        let span = lo.to(self.prev_token.span);
        Ok(Box::new(Expr::new(
            ExprKind::If(cond, then_block, else_expr),
            span,
        )))
    }

    fn parse_else_expr(&mut self) -> PResult<Box<Expr>> {
        if self.token.is_keyword(kw::IF) {
            return self.parse_if_expr();
        }
        let lo = self.token.span;
        let block = self.parse_block()?;
        let span = lo.to(self.prev_token.span);
        Ok(Box::new(Expr::new(ExprKind::Block(block, None), span)))
    }

    /// A loop or `if` condition: struct literals are off, `let` chains on.
    fn parse_cond_expr(&mut self) -> PResult<Box<Expr>> {
        if self.token.is_keyword(kw::LET) {
            return self.parse_let_expr();
        }
        self.parse_expr_res(Restrictions::NO_STRUCT_LITERAL)
    }

    /// `let pat = scrutinee`, in condition position.
    fn parse_let_expr(&mut self) -> PResult<Box<Expr>> {
        let lo = self.token.span;
        self.bump()?;
        let pat = self.parse_pat()?;
        self.expect(TokenKind::Eq)?;
        let scrutinee = self.parse_expr_res(Restrictions::NO_STRUCT_LITERAL)?;
        let span = lo.to(scrutinee.span);
        Ok(Box::new(Expr::new(
            ExprKind::Let(pat, scrutinee, span),
            span,
        )))
    }

    fn parse_while_expr(&mut self, label: Option<Label>, lo: Span) -> PResult<Box<Expr>> {
        self.bump()?;
        let cond = self.parse_cond_expr()?;
        let body = self.parse_block()?;
        let span = lo.to(self.prev_token.span);
        Ok(Box::new(Expr::new(
            ExprKind::While(cond, body, label),
            span,
        )))
    }

    fn parse_loop_expr(&mut self, label: Option<Label>, lo: Span) -> PResult<Box<Expr>> {
        self.bump()?;
        let body = self.parse_block()?;
        let span = lo.to(self.prev_token.span);
        Ok(Box::new(Expr::new(ExprKind::Loop(body, label), span)))
    }

    fn parse_for_expr(&mut self, label: Option<Label>, lo: Span) -> PResult<Box<Expr>> {
        self.bump()?;
        let pat = self.parse_pat()?;
        if !self.eat_keyword(kw::IN)? {
            let message = self.expected_one_of_found();
            self.sess.error_span(self.token.span, message);
        }
        let iter = self.parse_expr_res(Restrictions::NO_STRUCT_LITERAL)?;
        let body = self.parse_block()?;
        let span = lo.to(self.prev_token.span);
        Ok(Box::new(Expr::new(
            ExprKind::ForLoop(pat, iter, body, label),
            span,
        )))
    }

    fn parse_match_expr(&mut self) -> PResult<Box<Expr>> {
        let lo = self.token.span;
        self.bump()?;
        let scrutinee = self.parse_expr_res(Restrictions::NO_STRUCT_LITERAL)?;
        self.expect(TokenKind::OpenDelim(Delim::Brace))?;
        let mut arms = Vec::new();
        while !self.check(TokenKind::CloseDelim(Delim::Brace)) && !self.token.is_eof() {
            arms.push(self.parse_arm()?);
        }
        self.expect(TokenKind::CloseDelim(Delim::Brace))?;
        let span = lo.to(self.prev_token.span);
        Ok(Box::new(Expr::new(ExprKind::Match(scrutinee, arms), span)))
    }

    fn parse_arm(&mut self) -> PResult<Arm> {
        let lo = self.token.span;
        let pat = self.parse_pat()?;
        let guard = if self.eat_keyword(kw::IF)? {
            Some(self.parse_expr_res(Restrictions::NO_STRUCT_LITERAL)?)
        } else {
            None
        };
        self.expect(TokenKind::FatArrow)?;
        let body = self.parse_expr()?;
        // The comma is required after a non-block body, unless this is the
        // last arm.
        if body.requires_semi_to_be_stmt()
            && !self.check(TokenKind::CloseDelim(Delim::Brace))
        {
            self.expect(TokenKind::Comma)?;
        } else {
            self.eat(TokenKind::Comma)?;
        }
        Ok(Arm {
            pat,
            guard,
            body,
            id: DUMMY_NODE_ID,
            span: lo.to(self.prev_token.span),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patina_diagnostic::ParseSession;
    use patina_span::SourceFile;
    use pretty_assertions::assert_eq;

    fn parse(src: &str) -> (ParseSession, PResult<Box<Expr>>) {
        let sess = ParseSession::new(SourceFile::new("test.pat", src));
        let expr = patina_lexer::token_trees(&sess).and_then(|stream| {
            let mut parser = Parser::new(&sess, stream);
            parser.parse_expr()
        });
        (sess, expr)
    }

    fn expr_ok(src: &str) -> Box<Expr> {
        let (sess, expr) = parse(src);
        let Ok(expr) = expr else {
            panic!("fatal error parsing {src:?}");
        };
        assert!(!sess.handler.has_errors(), "unexpected errors in {src:?}");
        expr
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = expr_ok("1 + 2 * 3");
        let ExprKind::Binary(BinOpKind::Add, lhs, rhs) = &expr.kind else {
            panic!("expected addition at the root");
        };
        assert!(matches!(lhs.kind, ExprKind::Lit(_)));
        assert!(matches!(
            rhs.kind,
            ExprKind::Binary(BinOpKind::Mul, _, _)
        ));
        assert_eq!(expr.span, Span::new(0, 9));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = expr_ok("10 - 4 - 3");
        let ExprKind::Binary(BinOpKind::Sub, lhs, _) = &expr.kind else {
            panic!("expected subtraction at the root");
        };
        assert!(matches!(
            lhs.kind,
            ExprKind::Binary(BinOpKind::Sub, _, _)
        ));
    }

    #[test]
    fn assignment_is_right_associative() {
        let expr = expr_ok("a = b = c");
        let ExprKind::Assign(_, rhs, _) = &expr.kind else {
            panic!("expected assignment at the root");
        };
        assert!(matches!(rhs.kind, ExprKind::Assign(..)));
    }

    #[test]
    fn chained_comparison_reports_once_and_stays_flat() {
        let (sess, expr) = parse("a < b < c");
        let Ok(expr) = expr else {
            panic!("chained comparison should be recoverable");
        };
        let diags = sess.handler.take();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "comparison operators cannot be chained");
        // The chain is not grouped into a nested comparison; the second `<`
        // is left unconsumed.
        let ExprKind::Binary(BinOpKind::Lt, lhs, rhs) = &expr.kind else {
            panic!("expected a comparison at the root");
        };
        assert!(!matches!(lhs.kind, ExprKind::Binary(..)));
        assert!(matches!(rhs.kind, ExprKind::Path(_)));
    }

    #[test]
    fn operator_after_block_like_keeps_folding() {
        let sess = ParseSession::new(SourceFile::new("test.pat", "match x { _ => 1 } + 2"));
        let expr = patina_lexer::token_trees(&sess).and_then(|stream| {
            let mut parser = Parser::new(&sess, stream);
            parser.parse_expr_res(Restrictions::STMT_EXPR)
        });
        let Ok(expr) = expr else {
            panic!("expected an expression");
        };
        assert!(!sess.handler.has_errors());
        let ExprKind::Binary(BinOpKind::Add, lhs, _) = &expr.kind else {
            panic!("expected addition at the root");
        };
        assert!(matches!(lhs.kind, ExprKind::Match(..)));
    }

    #[test]
    fn cast_chains_onto_operators() {
        let expr = expr_ok("1 + 2 as i64");
        let ExprKind::Binary(BinOpKind::Add, _, rhs) = &expr.kind else {
            panic!("expected addition at the root");
        };
        assert!(matches!(rhs.kind, ExprKind::Cast(..)));
    }

    #[test]
    fn range_does_not_chain() {
        let (sess, expr) = parse("0 .. 4 .. 8");
        let Ok(expr) = expr else {
            panic!("expected an expression");
        };
        // The second `..` is left unconsumed; parse_expr stops after one
        // range. The statement layer would then complain.
        assert!(matches!(expr.kind, ExprKind::Range(Some(_), Some(_), RangeLimits::HalfOpen)));
        assert!(!sess.handler.has_errors());
    }

    #[test]
    fn postfix_binds_tighter_than_prefix() {
        let expr = expr_ok("-f(2)");
        let ExprKind::Unary(UnOpKind::Neg, operand) = &expr.kind else {
            panic!("expected negation at the root");
        };
        assert!(matches!(operand.kind, ExprKind::Call(..)));
    }

    #[test]
    fn try_operator_is_postfix() {
        let expr = expr_ok("f(x)?");
        let ExprKind::Try(inner) = &expr.kind else {
            panic!("expected try at the root");
        };
        assert!(matches!(inner.kind, ExprKind::Call(..)));
    }

    #[test]
    fn array_and_repeat_forms() {
        assert!(matches!(expr_ok("[1, 2, 3]").kind, ExprKind::Array(ref v) if v.len() == 3));
        assert!(matches!(expr_ok("[0; 8]").kind, ExprKind::Repeat(..)));
        assert!(matches!(expr_ok("[]").kind, ExprKind::Array(ref v) if v.is_empty()));
    }

    #[test]
    fn if_else_chain() {
        let expr = expr_ok("if a { 1 } else if b { 2 } else { 3 }");
        let ExprKind::If(_, _, Some(else_expr)) = &expr.kind else {
            panic!("expected if with an else");
        };
        assert!(matches!(else_expr.kind, ExprKind::If(..)));
    }

    #[test]
    fn struct_literal_position_is_fatal() {
        let (sess, expr) = parse("point { }");
        assert!(expr.is_err());
        let diags = sess.handler.take();
        assert_eq!(
            diags[0].message,
            "struct literal expressions are not implemented"
        );
    }

    #[test]
    fn method_call_is_fatal() {
        let (sess, expr) = parse("x.len()");
        assert!(expr.is_err());
        let diags = sess.handler.take();
        assert_eq!(
            diags[0].message,
            "field access and method calls are not implemented"
        );
    }

    #[test]
    fn expected_expression_recovers_with_error_node() {
        let (sess, expr) = parse("1 + ;");
        let Ok(expr) = expr else {
            panic!("should recover");
        };
        let ExprKind::Binary(BinOpKind::Add, _, rhs) = &expr.kind else {
            panic!("expected addition at the root");
        };
        assert!(matches!(rhs.kind, ExprKind::Err));
        assert_eq!(rhs.span, Span::new(4, 5));
        assert_eq!(sess.handler.err_count(), 1);
    }

    #[test]
    fn nesting_depth_is_limited() {
        let src = format!("{}1{}", "(".repeat(400), ")".repeat(400));
        let (sess, expr) = parse(&src);
        assert!(expr.is_err());
        let diags = sess.handler.take();
        assert_eq!(
            diags[0].message,
            "exceeded the nesting depth limit of 256 while parsing"
        );
    }
}
