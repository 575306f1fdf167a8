//! Cooked token definitions.
//!
//! Unlike raw tokens, cooked tokens carry interned payloads and compound
//! operator kinds. Compound operators come out of the token-tree builder's
//! gluing pass; the tokenizer only ever emits the single-character forms.

use patina_span::{kw, Ident, Interner, Span, Symbol};

/// Delimiter kind.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Delim {
    /// A round parenthesis: `(` or `)`.
    Paren,
    /// A square bracket: `[` or `]`.
    Bracket,
    /// A curly brace: `{` or `}`.
    Brace,
    /// An invisible delimiter for the top-level stream.
    NoDelim,
}

impl Delim {
    pub fn as_str(self, open: bool) -> &'static str {
        match (self, open) {
            (Delim::Paren, true) => "(",
            (Delim::Paren, false) => ")",
            (Delim::Bracket, true) => "[",
            (Delim::Bracket, false) => "]",
            (Delim::Brace, true) => "{",
            (Delim::Brace, false) => "}",
            (Delim::NoDelim, _) => "",
        }
    }
}

/// Single-character binary operator kinds, shared by `BinOp` and `BinOpEq`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BinOpToken {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    And,
    Or,
    Shl,
    Shr,
}

impl BinOpToken {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOpToken::Plus => "+",
            BinOpToken::Minus => "-",
            BinOpToken::Star => "*",
            BinOpToken::Slash => "/",
            BinOpToken::Percent => "%",
            BinOpToken::Caret => "^",
            BinOpToken::And => "&",
            BinOpToken::Or => "|",
            BinOpToken::Shl => "<<",
            BinOpToken::Shr => ">>",
        }
    }
}

/// Literal classification carried by a literal token.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum LitKind {
    /// AST only; produced from `true`/`false` identifiers, never by the
    /// cooker.
    Bool,
    Char,
    Integer,
    Float,
    Str,
    /// A literal the cooker rejected; keeps the raw text for recovery.
    Err,
}

impl LitKind {
    pub fn descr(self) -> &'static str {
        match self {
            LitKind::Bool => "boolean",
            LitKind::Char => "char",
            LitKind::Integer => "integer",
            LitKind::Float => "float",
            LitKind::Str => "string",
            LitKind::Err => "invalid",
        }
    }
}

/// A literal token: kind, interned text, optional interned suffix.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Lit {
    pub kind: LitKind,
    pub symbol: Symbol,
    pub suffix: Option<Symbol>,
}

impl Lit {
    pub const fn new(kind: LitKind, symbol: Symbol, suffix: Option<Symbol>) -> Self {
        Lit {
            kind,
            symbol,
            suffix,
        }
    }
}

/// Cooked token kind, payloads included.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TokenKind {
    // Expression-operator symbols.
    /// `=`
    Eq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `==`
    EqEq,
    /// `!=`
    Ne,
    /// `>=`
    Ge,
    /// `>`
    Gt,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `!`
    Not,
    /// `~`
    Tilde,
    /// `+`, `<<`, ...
    BinOp(BinOpToken),
    /// `+=`, `<<=`, ...
    BinOpEq(BinOpToken),

    // Structural symbols.
    /// `@`
    At,
    /// `.`
    Dot,
    /// `..`
    DotDot,
    /// `..=`
    DotDotEq,
    /// `,`
    Comma,
    /// `;`
    Semi,
    /// `:`
    Colon,
    /// `::`
    ModSep,
    /// `->`
    RArrow,
    /// `=>`
    FatArrow,
    /// `#`
    Pound,
    /// `$`
    Dollar,
    /// `?`
    Question,
    /// An opening delimiter, e.g. `{`.
    OpenDelim(Delim),
    /// A closing delimiter, e.g. `}`.
    CloseDelim(Delim),

    /// A literal with its payload.
    Literal(Lit),
    /// An identifier, keywords included.
    Ident(Symbol),
    /// A lifetime, e.g. `'a`. The symbol includes the leading quote.
    Lifetime(Symbol),

    /// A completely invalid token. The cooker reports it; the tree reader
    /// skips it.
    Unknown,

    Eof,
}

/// One cooked token.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Placeholder before the first bump.
    pub const fn dummy() -> Self {
        Token {
            kind: TokenKind::Unknown,
            span: Span::DUMMY,
        }
    }

    /// Operator-class tokens participate in joint gluing.
    pub fn is_op(&self) -> bool {
        !matches!(
            self.kind,
            TokenKind::OpenDelim(_)
                | TokenKind::CloseDelim(_)
                | TokenKind::Literal(_)
                | TokenKind::Ident(_)
                | TokenKind::Lifetime(_)
                | TokenKind::Unknown
                | TokenKind::Eof
        )
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, TokenKind::Literal(_))
    }

    /// The identifier, if this is an identifier token.
    pub fn ident(&self) -> Option<Ident> {
        match self.kind {
            TokenKind::Ident(name) => Some(Ident::new(name, self.span)),
            _ => None,
        }
    }

    pub fn is_ident(&self) -> bool {
        matches!(self.kind, TokenKind::Ident(_))
    }

    pub fn lifetime(&self) -> Option<Symbol> {
        match self.kind {
            TokenKind::Lifetime(name) => Some(name),
            _ => None,
        }
    }

    /// Is this the given keyword?
    pub fn is_keyword(&self, keyword: Symbol) -> bool {
        matches!(self.kind, TokenKind::Ident(name) if name == keyword)
    }

    pub fn is_reserved_ident(&self) -> bool {
        matches!(self.kind, TokenKind::Ident(name) if name.is_reserved())
    }

    pub fn is_bool_lit(&self) -> bool {
        matches!(self.kind, TokenKind::Ident(name) if name.is_bool_lit())
    }

    /// `mut` or `const`, as in reference/pointer mutability position.
    pub fn is_mutability(&self) -> bool {
        self.is_keyword(kw::MUT) || self.is_keyword(kw::CONST)
    }

    pub fn is_range_kind(&self) -> bool {
        matches!(self.kind, TokenKind::DotDot | TokenKind::DotDotEq)
    }

    /// Returns `true` if the token can appear at the start of an expression.
    pub fn can_begin_expr(&self) -> bool {
        match self.kind {
            // Value name or keyword.
            TokenKind::Ident(name) => ident_can_begin_expr(name),
            TokenKind::OpenDelim(_)     // tuple, array or block
            | TokenKind::Literal(_)     // literal
            | TokenKind::Not            // operator not
            | TokenKind::OrOr           // closure
            | TokenKind::AndAnd         // double reference
            | TokenKind::DotDot         // range notation
            | TokenKind::DotDotEq       // range notation
            | TokenKind::Lt             // associated path
            | TokenKind::ModSep         // global path
            | TokenKind::Lifetime(_)    // labeled loop
            | TokenKind::Pound => true, // expression attributes
            TokenKind::BinOp(op) => matches!(
                op,
                BinOpToken::Minus   // unary minus
                | BinOpToken::Star  // dereference
                | BinOpToken::Or    // closure
                | BinOpToken::And   // reference
                | BinOpToken::Shl   // associated path
            ),
            _ => false,
        }
    }

    /// Returns `true` if the token can appear at the start of a type.
    pub fn can_begin_type(&self) -> bool {
        match self.kind {
            // Type name or keyword.
            TokenKind::Ident(name) => ident_can_begin_type(name),
            TokenKind::OpenDelim(Delim::Paren)      // tuple
            | TokenKind::OpenDelim(Delim::Bracket)  // array
            | TokenKind::AndAnd                     // double reference
            | TokenKind::Not                        // never type
            | TokenKind::Question                   // question
            | TokenKind::Lifetime(_)                // lifetime bound
            | TokenKind::Lt                         // associated path
            | TokenKind::ModSep => true,            // global path
            TokenKind::BinOp(op) => matches!(
                op,
                BinOpToken::Star    // raw pointer
                | BinOpToken::And   // reference
                | BinOpToken::Shl   // associated path
            ),
            _ => false,
        }
    }

    /// Glue `self` and an immediately-following `joint` token into one
    /// compound operator, when the pair forms one.
    pub fn glue(&self, joint: &Token) -> Option<Token> {
        let kind = match self.kind {
            TokenKind::Eq => match joint.kind {
                TokenKind::Eq => TokenKind::EqEq,
                TokenKind::Gt => TokenKind::FatArrow,
                _ => return None,
            },
            TokenKind::Lt => match joint.kind {
                TokenKind::Eq => TokenKind::Le,
                TokenKind::Lt => TokenKind::BinOp(BinOpToken::Shl),
                TokenKind::Le => TokenKind::BinOpEq(BinOpToken::Shl),
                _ => return None,
            },
            TokenKind::Gt => match joint.kind {
                TokenKind::Eq => TokenKind::Ge,
                TokenKind::Gt => TokenKind::BinOp(BinOpToken::Shr),
                TokenKind::Ge => TokenKind::BinOpEq(BinOpToken::Shr),
                _ => return None,
            },
            TokenKind::Not => match joint.kind {
                TokenKind::Eq => TokenKind::Ne,
                _ => return None,
            },
            TokenKind::BinOp(op) => match joint.kind {
                TokenKind::Eq => TokenKind::BinOpEq(op),
                TokenKind::BinOp(other) if op == other && op == BinOpToken::And => {
                    TokenKind::AndAnd
                }
                TokenKind::BinOp(other) if op == other && op == BinOpToken::Or => TokenKind::OrOr,
                TokenKind::Gt if op == BinOpToken::Minus => TokenKind::RArrow,
                _ => return None,
            },
            TokenKind::Dot => match joint.kind {
                TokenKind::Dot => TokenKind::DotDot,
                _ => return None,
            },
            TokenKind::DotDot => match joint.kind {
                TokenKind::Eq => TokenKind::DotDotEq,
                _ => return None,
            },
            TokenKind::Colon => match joint.kind {
                TokenKind::Colon => TokenKind::ModSep,
                _ => return None,
            },
            _ => return None,
        };
        Some(Token::new(kind, self.span.to(joint.span)))
    }

    /// Human-readable rendering for diagnostics.
    pub fn printable(&self, interner: &Interner) -> String {
        match self.kind {
            TokenKind::Eq => "=".into(),
            TokenKind::Lt => "<".into(),
            TokenKind::Le => "<=".into(),
            TokenKind::EqEq => "==".into(),
            TokenKind::Ne => "!=".into(),
            TokenKind::Ge => ">=".into(),
            TokenKind::Gt => ">".into(),
            TokenKind::AndAnd => "&&".into(),
            TokenKind::OrOr => "||".into(),
            TokenKind::Not => "!".into(),
            TokenKind::Tilde => "~".into(),
            TokenKind::BinOp(op) => op.as_str().into(),
            TokenKind::BinOpEq(op) => format!("{}=", op.as_str()),
            TokenKind::At => "@".into(),
            TokenKind::Dot => ".".into(),
            TokenKind::DotDot => "..".into(),
            TokenKind::DotDotEq => "..=".into(),
            TokenKind::Comma => ",".into(),
            TokenKind::Semi => ";".into(),
            TokenKind::Colon => ":".into(),
            TokenKind::ModSep => "::".into(),
            TokenKind::RArrow => "->".into(),
            TokenKind::FatArrow => "=>".into(),
            TokenKind::Pound => "#".into(),
            TokenKind::Dollar => "$".into(),
            TokenKind::Question => "?".into(),
            TokenKind::OpenDelim(delim) => delim.as_str(true).into(),
            TokenKind::CloseDelim(delim) => delim.as_str(false).into(),
            TokenKind::Literal(lit) => match lit.suffix {
                Some(suffix) => format!("{}{}", interner.get(lit.symbol), interner.get(suffix)),
                None => interner.get(lit.symbol).into(),
            },
            TokenKind::Ident(name) => interner.get(name).into(),
            TokenKind::Lifetime(name) => interner.get(name).into(),
            TokenKind::Unknown => "<unknown>".into(),
            TokenKind::Eof => "<eof>".into(),
        }
    }
}

/// Keywords that may begin an expression, besides non-reserved names.
fn ident_can_begin_expr(name: Symbol) -> bool {
    !name.is_reserved()
        || name.is_path_segment_keyword()
        || [
            kw::ASYNC,
            kw::DO,
            kw::BOX,
            kw::BREAK,
            kw::CONTINUE,
            kw::FALSE,
            kw::FOR,
            kw::IF,
            kw::LET,
            kw::LOOP,
            kw::MATCH,
            kw::MOVE,
            kw::RETURN,
            kw::TRUE,
            kw::UNSAFE,
            kw::WHILE,
            kw::YIELD,
        ]
        .contains(&name)
}

/// Keywords that may begin a type, besides non-reserved names.
fn ident_can_begin_type(name: Symbol) -> bool {
    !name.is_reserved()
        || name.is_path_segment_keyword()
        || [
            kw::UNDERSCORE,
            kw::FOR,
            kw::IMPL,
            kw::FN,
            kw::UNSAFE,
            kw::EXTERN,
            kw::TYPEOF,
            kw::DYN,
        ]
        .contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use patina_span::sym;
    use pretty_assertions::assert_eq;

    fn tok(kind: TokenKind, lo: u32, hi: u32) -> Token {
        Token::new(kind, Span::new(lo, hi))
    }

    #[test]
    fn glue_table() {
        let cases: &[(TokenKind, TokenKind, TokenKind)] = &[
            (TokenKind::Eq, TokenKind::Eq, TokenKind::EqEq),
            (TokenKind::Eq, TokenKind::Gt, TokenKind::FatArrow),
            (TokenKind::Lt, TokenKind::Eq, TokenKind::Le),
            (TokenKind::Lt, TokenKind::Lt, TokenKind::BinOp(BinOpToken::Shl)),
            (TokenKind::Gt, TokenKind::Eq, TokenKind::Ge),
            (TokenKind::Gt, TokenKind::Gt, TokenKind::BinOp(BinOpToken::Shr)),
            (TokenKind::Not, TokenKind::Eq, TokenKind::Ne),
            (
                TokenKind::BinOp(BinOpToken::Plus),
                TokenKind::Eq,
                TokenKind::BinOpEq(BinOpToken::Plus),
            ),
            (
                TokenKind::BinOp(BinOpToken::And),
                TokenKind::BinOp(BinOpToken::And),
                TokenKind::AndAnd,
            ),
            (
                TokenKind::BinOp(BinOpToken::Or),
                TokenKind::BinOp(BinOpToken::Or),
                TokenKind::OrOr,
            ),
            (
                TokenKind::BinOp(BinOpToken::Minus),
                TokenKind::Gt,
                TokenKind::RArrow,
            ),
            (TokenKind::Dot, TokenKind::Dot, TokenKind::DotDot),
            (TokenKind::DotDot, TokenKind::Eq, TokenKind::DotDotEq),
            (TokenKind::Colon, TokenKind::Colon, TokenKind::ModSep),
        ];
        for &(first, second, expected) in cases {
            let glued = tok(first, 0, 1).glue(&tok(second, 1, 2));
            let Some(glued) = glued else {
                panic!("expected {first:?} + {second:?} to glue");
            };
            assert_eq!(glued.kind, expected);
            assert_eq!(glued.span, Span::new(0, 2));
        }
    }

    #[test]
    fn glue_rejects_unrelated_pairs() {
        assert!(tok(TokenKind::Eq, 0, 1).glue(&tok(TokenKind::Semi, 1, 2)).is_none());
        assert!(tok(TokenKind::BinOp(BinOpToken::Plus), 0, 1)
            .glue(&tok(TokenKind::BinOp(BinOpToken::Minus), 1, 2))
            .is_none());
        // `<<=` comes from `<` + `<=`, not `<<` + `=`... both work.
        let shl_eq = tok(TokenKind::Lt, 0, 1).glue(&tok(TokenKind::Le, 1, 3));
        assert_eq!(
            shl_eq.map(|t| t.kind),
            Some(TokenKind::BinOpEq(BinOpToken::Shl))
        );
    }

    #[test]
    fn op_classification() {
        assert!(tok(TokenKind::Eq, 0, 1).is_op());
        assert!(tok(TokenKind::Question, 0, 1).is_op());
        assert!(!tok(TokenKind::Ident(kw::LET), 0, 3).is_op());
        assert!(!tok(TokenKind::OpenDelim(Delim::Brace), 0, 1).is_op());
        assert!(!tok(TokenKind::Eof, 0, 0).is_op());
    }

    #[test]
    fn expr_start_classification() {
        assert!(tok(TokenKind::Ident(kw::IF), 0, 2).can_begin_expr());
        assert!(tok(TokenKind::Ident(kw::TRUE), 0, 4).can_begin_expr());
        assert!(!tok(TokenKind::Ident(kw::ELSE), 0, 4).can_begin_expr());
        assert!(tok(TokenKind::BinOp(BinOpToken::Minus), 0, 1).can_begin_expr());
        assert!(!tok(TokenKind::Semi, 0, 1).can_begin_expr());
    }

    #[test]
    fn type_start_classification() {
        assert!(tok(TokenKind::Ident(sym::I32), 0, 3).can_begin_type());
        assert!(tok(TokenKind::OpenDelim(Delim::Bracket), 0, 1).can_begin_type());
        assert!(!tok(TokenKind::OpenDelim(Delim::Brace), 0, 1).can_begin_type());
        assert!(!tok(TokenKind::Ident(kw::LET), 0, 3).can_begin_type());
    }

    #[test]
    fn keyword_checks() {
        let token = tok(TokenKind::Ident(kw::MUT), 0, 3);
        assert!(token.is_keyword(kw::MUT));
        assert!(token.is_mutability());
        assert!(token.is_reserved_ident());
        assert!(!token.is_bool_lit());
    }
}
