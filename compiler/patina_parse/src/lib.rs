//! Recursive descent parser for the Patina front end.
//!
//! [`parse_source`] drives the whole pipeline: raw tokens are cooked and
//! grouped into token trees by `patina_lexer`, then the [`Parser`] walks
//! the flattened tree and builds `patina_ast` nodes by precedence climbing.
//!
//! Errors come in two severities. Recoverable problems are reported to the
//! session and parsing continues, leaving `Err` placeholder nodes where
//! needed; critical problems unwind to this entry point through
//! [`patina_diagnostic::PResult`].

mod cursor;
mod grammar;
mod parser;

use patina_ast::ast::Stmt;
use patina_diagnostic::{ParseSession, PResult};

pub use parser::{Parser, Restrictions};

/// Parse one source file as a statement sequence.
pub fn parse_source(sess: &ParseSession) -> PResult<Vec<Stmt>> {
    let stream = patina_lexer::token_trees(sess)?;
    let mut parser = Parser::new(sess, stream);
    let mut stmts = Vec::new();
    while !parser.token.is_eof() {
        let before = parser.token.span;
        stmts.push(parser.parse_full_stmt()?);
        // Statement recovery may consume nothing; force progress.
        if parser.token.span == before && !parser.token.is_eof() {
            parser.bump()?;
        }
    }
    tracing::debug!(
        statements = stmts.len(),
        errors = sess.handler.err_count(),
        "parsed {}",
        sess.source_file.name
    );
    Ok(stmts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use patina_ast::ast::{ExprKind, ItemKind, PatKind, StmtKind, TyKind};
    use patina_ast::op::BinOpKind;
    use patina_span::{SourceFile, Span};
    use pretty_assertions::assert_eq;

    fn parse(src: &str) -> (ParseSession, PResult<Vec<Stmt>>) {
        let sess = ParseSession::new(SourceFile::new("test.pat", src));
        let stmts = parse_source(&sess);
        (sess, stmts)
    }

    fn parse_ok(src: &str) -> Vec<Stmt> {
        let (sess, stmts) = parse(src);
        let Ok(stmts) = stmts else {
            panic!("fatal error parsing {src:?}");
        };
        assert!(
            !sess.handler.has_errors(),
            "unexpected errors parsing {src:?}: {:?}",
            sess.handler.take()
        );
        stmts
    }

    #[test]
    fn block_like_expression_ends_a_statement_without_a_semicolon() {
        let stmts = parse_ok("if true { 1 } else { 2 }\nlet x = 3;");
        assert_eq!(stmts.len(), 2);
        assert!(matches!(stmts[0].kind, StmtKind::Expr(_)));
        assert!(matches!(stmts[1].kind, StmtKind::Local(_)));
    }

    #[test]
    fn local_with_type_annotation() {
        let stmts = parse_ok("let x: [i64; 4] = [0; 4];");
        let StmtKind::Local(local) = &stmts[0].kind else {
            panic!("expected a local");
        };
        assert!(matches!(local.pat.kind, PatKind::Ident(..)));
        let Some(ty) = &local.ty else {
            panic!("expected a type annotation");
        };
        assert!(matches!(ty.kind, TyKind::Array(..)));
        assert!(matches!(
            local.init.as_deref(),
            Some(init) if matches!(init.kind, ExprKind::Repeat(..))
        ));
    }

    #[test]
    fn semicolon_reclassifies_an_expression_statement() {
        let stmts = parse_ok("a = b = c;");
        let StmtKind::Semi(expr) = &stmts[0].kind else {
            panic!("expected a terminated expression statement");
        };
        let ExprKind::Assign(_, rhs, _) = &expr.kind else {
            panic!("expected assignment");
        };
        assert!(matches!(rhs.kind, ExprKind::Assign(..)));
    }

    #[test]
    fn function_item() {
        let stmts = parse_ok("fn add(a: i64, b: i64) -> i64 { a + b }");
        let StmtKind::Item(item) = &stmts[0].kind else {
            panic!("expected an item");
        };
        let ItemKind::Fn(sig, Some(body)) = &item.kind else {
            panic!("expected a function with a body");
        };
        assert_eq!(sig.decl.inputs.len(), 2);
        assert_eq!(body.stmts.len(), 1);
        let StmtKind::Expr(tail) = &body.stmts[0].kind else {
            panic!("expected a tail expression");
        };
        assert!(matches!(tail.kind, ExprKind::Binary(BinOpKind::Add, ..)));
    }

    #[test]
    fn const_and_static_items() {
        let stmts = parse_ok("const LIMIT: i64 = 4;\nstatic mut COUNTER: i64 = 0;");
        assert_eq!(stmts.len(), 2);
        let StmtKind::Item(item) = &stmts[0].kind else {
            panic!("expected an item");
        };
        assert!(matches!(item.kind, ItemKind::Const(..)));
        let StmtKind::Item(item) = &stmts[1].kind else {
            panic!("expected an item");
        };
        assert!(matches!(
            item.kind,
            ItemKind::Static(patina_ast::op::Mutability::Mut, ..)
        ));
    }

    #[test]
    fn match_expression_with_literal_arms() {
        let stmts = parse_ok("match x { 0 => 1, _ => 2 }");
        let StmtKind::Expr(expr) = &stmts[0].kind else {
            panic!("expected an expression statement");
        };
        let ExprKind::Match(_, arms) = &expr.kind else {
            panic!("expected a match");
        };
        assert_eq!(arms.len(), 2);
        assert!(matches!(arms[0].pat.kind, PatKind::Lit(_)));
        assert!(matches!(arms[1].pat.kind, PatKind::Wild));
    }

    #[test]
    fn labeled_loop_with_break() {
        let stmts = parse_ok("'outer: loop { break 'outer; }");
        let StmtKind::Expr(expr) = &stmts[0].kind else {
            panic!("expected an expression statement");
        };
        let ExprKind::Loop(body, Some(_)) = &expr.kind else {
            panic!("expected a labeled loop");
        };
        let StmtKind::Semi(inner) = &body.stmts[0].kind else {
            panic!("expected a terminated break");
        };
        assert!(matches!(inner.kind, ExprKind::Break(Some(_), None)));
    }

    #[test]
    fn while_let_condition() {
        let stmts = parse_ok("while let ref item = next { }");
        let StmtKind::Expr(expr) = &stmts[0].kind else {
            panic!("expected an expression statement");
        };
        let ExprKind::While(cond, ..) = &expr.kind else {
            panic!("expected a while loop");
        };
        assert!(matches!(cond.kind, ExprKind::Let(..)));
    }

    #[test]
    fn declaration_typo_is_recovered_as_a_local() {
        let (sess, stmts) = parse("auto x = 1;");
        let Ok(stmts) = stmts else {
            panic!("typo recovery should not be fatal");
        };
        assert!(matches!(stmts[0].kind, StmtKind::Local(_)));
        let diags = sess.handler.take();
        assert_eq!(
            diags[0].message,
            "invalid variable declaration: write `let` instead of `auto`"
        );
    }

    #[test]
    fn mut_without_let_keeps_the_mutable_binding() {
        let (sess, stmts) = parse("mut x = 1;");
        let Ok(stmts) = stmts else {
            panic!("typo recovery should not be fatal");
        };
        let StmtKind::Local(local) = &stmts[0].kind else {
            panic!("expected a local");
        };
        assert!(matches!(
            local.pat.kind,
            PatKind::Ident(
                patina_ast::op::BindingMode::ByValue(patina_ast::op::Mutability::Mut),
                ..
            )
        ));
        assert_eq!(sess.handler.err_count(), 1);
    }

    #[test]
    fn invalid_binary_digit_is_recoverable() {
        let (sess, stmts) = parse("let x = 0b123;");
        let Ok(stmts) = stmts else {
            panic!("invalid digits should be recoverable");
        };
        assert_eq!(stmts.len(), 1);
        assert!(sess.handler.has_errors());
    }

    #[test]
    fn unterminated_string_is_fatal() {
        let (sess, stmts) = parse("let s = \"abc;");
        assert!(stmts.is_err());
        assert!(sess.handler.has_errors());
    }

    #[test]
    fn unclosed_delimiter_is_fatal() {
        let (sess, stmts) = parse("fn broken( {");
        assert!(stmts.is_err());
        let diags = sess.handler.take();
        assert_eq!(diags[0].message, "this file contains an unclosed delimiter");
    }

    #[test]
    fn unimplemented_item_is_fatal() {
        let (sess, stmts) = parse("struct Point { x: i64 }");
        assert!(stmts.is_err());
        let diags = sess.handler.take();
        assert_eq!(diags[0].message, "`struct` items are not implemented");
    }

    #[test]
    fn error_nodes_carry_real_spans() {
        let (sess, stmts) = parse("let x = ;");
        let Ok(stmts) = stmts else {
            panic!("should recover");
        };
        let StmtKind::Local(local) = &stmts[0].kind else {
            panic!("expected a local");
        };
        let Some(init) = &local.init else {
            panic!("expected an initializer");
        };
        assert!(matches!(init.kind, ExprKind::Err));
        assert!(!init.span.is_dummy());
        assert_eq!(init.span, Span::new(8, 9));
        assert_eq!(sess.handler.err_count(), 1);
    }

    #[test]
    fn block_hitting_end_of_input_reports_the_missing_brace() {
        use patina_ast::token::{Delim, Lit, LitKind, Token, TokenKind};
        use patina_ast::token_stream::{Spacing, TokenStream, TokenTree};

        // Delimiter balancing normally shields this; feed the parser a bare
        // `{` token so the block runs out of input before any `}`.
        let sess = ParseSession::new(SourceFile::new("test.pat", "{ 1"));
        let mut stream = TokenStream::new();
        stream.push(
            TokenTree::Token(Token::new(
                TokenKind::OpenDelim(Delim::Brace),
                Span::new(0, 1),
            )),
            Spacing::Alone,
        );
        stream.push(
            TokenTree::Token(Token::new(
                TokenKind::Literal(Lit::new(
                    LitKind::Integer,
                    sess.interner.intern("1"),
                    None,
                )),
                Span::new(2, 3),
            )),
            Spacing::Alone,
        );

        let mut parser = Parser::new(&sess, stream);
        let Ok(block) = parser.parse_block() else {
            panic!("a missing `}}` should be recoverable");
        };
        assert_eq!(block.stmts.len(), 1);
        let diags = sess.handler.take();
        assert_eq!(
            diags[0].message,
            "expected one of `;`, `}`, found end of file"
        );
    }

    #[test]
    fn recovery_makes_progress_on_stray_tokens() {
        let (sess, stmts) = parse("# #\nlet x = 1;");
        let Ok(stmts) = stmts else {
            panic!("stray tokens should be recoverable");
        };
        assert!(stmts
            .iter()
            .any(|stmt| matches!(stmt.kind, StmtKind::Local(_))));
        assert!(sess.handler.has_errors());
    }
}
