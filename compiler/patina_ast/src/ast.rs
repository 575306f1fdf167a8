//! Syntax tree definitions.
//!
//! Nodes own their children exclusively through `Box` and `Vec`; the tree is
//! a tree, not a graph. Every node carries a [`NodeId`] slot for later
//! phases and the source [`Span`] it was parsed from.

use patina_span::{kw, Ident, Span};

use crate::assoc::ExprPrecedence;
use crate::op::{BindingMode, BinOpKind, BorrowKind, Mutability, RangeLimits, UnOpKind};
use crate::token::Lit;

/// Identifies a node for later phases. The parser always assigns
/// [`DUMMY_NODE_ID`]; numbering happens after parsing.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeId(pub u32);

pub const DUMMY_NODE_ID: NodeId = NodeId(u32::MAX);

/// A loop or block label, e.g. `'outer` in `'outer: loop { .. }`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Label {
    pub ident: Ident,
}

/// One segment of a path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathSegment {
    pub ident: Ident,
    pub id: NodeId,
}

impl PathSegment {
    pub fn from_ident(ident: Ident) -> Self {
        PathSegment {
            ident,
            id: DUMMY_NODE_ID,
        }
    }

    /// The synthetic leading segment of a `::`-prefixed path.
    pub fn path_root(span: Span) -> Self {
        PathSegment::from_ident(Ident::new(kw::PATH_ROOT, span))
    }
}

/// A simple path: `a::b::c`, optionally `::`-prefixed.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub segments: Vec<PathSegment>,
    pub span: Span,
}

impl Path {
    pub fn from_ident(ident: Ident) -> Self {
        Path {
            segments: vec![PathSegment::from_ident(ident)],
            span: ident.span,
        }
    }

    pub fn is_global(&self) -> bool {
        matches!(self.segments.first(), Some(seg) if seg.ident.name == kw::PATH_ROOT)
    }
}

/// A brace-delimited sequence of statements.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub id: NodeId,
    pub span: Span,
}

/// A constant in a position that is syntactically an expression, such as an
/// array length.
#[derive(Clone, Debug, PartialEq)]
pub struct AnonConst {
    pub id: NodeId,
    pub value: Box<Expr>,
}

/// One `pat => expr` arm of a `match`.
#[derive(Clone, Debug, PartialEq)]
pub struct Arm {
    pub pat: Box<Pat>,
    pub guard: Option<Box<Expr>>,
    pub body: Box<Expr>,
    pub id: NodeId,
    pub span: Span,
}

/// A `let` binding statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Local {
    pub pat: Box<Pat>,
    pub ty: Option<Box<Ty>>,
    pub init: Option<Box<Expr>>,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub id: NodeId,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            id: DUMMY_NODE_ID,
            span,
        }
    }

    pub fn precedence(&self) -> i8 {
        ExprPrecedence::order(&self.kind)
    }

    /// Block-like expressions stand as statements without a trailing
    /// semicolon; everything else needs one.
    pub fn requires_semi_to_be_stmt(&self) -> bool {
        !matches!(
            self.kind,
            ExprKind::If(..)
                | ExprKind::Match(..)
                | ExprKind::Block(..)
                | ExprKind::While(..)
                | ExprKind::Loop(..)
                | ExprKind::ForLoop(..)
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// `[a, b, c]`
    Array(Vec<Expr>),
    /// `[elem; count]`
    Repeat(Box<Expr>, AnonConst),
    /// `callee(a, b)`
    Call(Box<Expr>, Vec<Expr>),
    /// `lhs op rhs`
    Binary(BinOpKind, Box<Expr>, Box<Expr>),
    /// `op operand`
    Unary(UnOpKind, Box<Expr>),
    /// A literal token, uninterpreted.
    Lit(Lit),
    /// `expr as ty`
    Cast(Box<Expr>, Box<Ty>),
    /// `expr: ty`, type ascription.
    Type(Box<Expr>, Box<Ty>),
    /// `let pat = expr` in condition position; the span covers the whole
    /// form.
    Let(Box<Pat>, Box<Expr>, Span),
    /// `if cond { .. }` with an optional `else` that is either a block or a
    /// chained `if`.
    If(Box<Expr>, Box<Block>, Option<Box<Expr>>),
    /// `while cond { .. }`, optionally labeled.
    While(Box<Expr>, Box<Block>, Option<Label>),
    /// `for pat in iter { .. }`, optionally labeled.
    ForLoop(Box<Pat>, Box<Expr>, Box<Block>, Option<Label>),
    /// `loop { .. }`, optionally labeled.
    Loop(Box<Block>, Option<Label>),
    /// `match scrutinee { arms }`
    Match(Box<Expr>, Vec<Arm>),
    /// A block in expression position, optionally labeled.
    Block(Box<Block>, Option<Label>),
    /// `lhs = rhs`; the span is the `=` token, for diagnostics.
    Assign(Box<Expr>, Box<Expr>, Span),
    /// `lhs op= rhs`
    AssignOp(BinOpKind, Box<Expr>, Box<Expr>),
    /// `base[index]`
    Index(Box<Expr>, Box<Expr>),
    /// `start..end`, `start..=end`, with either side optional.
    Range(Option<Box<Expr>>, Option<Box<Expr>>, RangeLimits),
    /// A path used as a value.
    Path(Path),
    /// `&expr`, `&mut expr`
    AddrOf(BorrowKind, Mutability, Box<Expr>),
    /// `break`, `break 'label`, `break value`
    Break(Option<Label>, Option<Box<Expr>>),
    /// `continue`, `continue 'label`
    Continue(Option<Label>),
    /// `return`, `return value`
    Ret(Option<Box<Expr>>),
    /// `expr?`
    Try(Box<Expr>),
    /// `(expr)`
    Paren(Box<Expr>),
    /// Placeholder for an expression that failed to parse. Its span points
    /// at the offending source.
    Err,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub id: NodeId,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt {
            kind,
            id: DUMMY_NODE_ID,
            span,
        }
    }

    /// Reclassify an expression statement once its trailing semicolon is
    /// seen.
    pub fn add_trailing_semicolon(mut self) -> Stmt {
        self.kind = match self.kind {
            StmtKind::Expr(expr) => StmtKind::Semi(expr),
            kind @ (StmtKind::Local(_) | StmtKind::Item(_) | StmtKind::Semi(_) | StmtKind::Empty) => {
                kind
            }
        };
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    /// `let pat = init;`
    Local(Box<Local>),
    /// A nested item declaration.
    Item(Box<Item>),
    /// An expression without a trailing semicolon.
    Expr(Box<Expr>),
    /// An expression with a trailing semicolon.
    Semi(Box<Expr>),
    /// A lone `;`.
    Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pat {
    pub kind: PatKind,
    pub id: NodeId,
    pub span: Span,
}

impl Pat {
    pub fn new(kind: PatKind, span: Span) -> Self {
        Pat {
            kind,
            id: DUMMY_NODE_ID,
            span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PatKind {
    /// `_`
    Wild,
    /// A binding, possibly with a sub-pattern: `mut x`, `ref y @ sub`.
    Ident(BindingMode, Ident, Option<Box<Pat>>),
    /// `&pat`, `&mut pat`
    Ref(Box<Pat>, Mutability),
    /// A literal pattern, possibly negated.
    Lit(Box<Expr>),
    /// A path pattern, e.g. an enum variant name.
    Path(Path),
    /// `(pat)`
    Paren(Box<Pat>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ty {
    pub kind: TyKind,
    pub id: NodeId,
    pub span: Span,
}

impl Ty {
    pub fn new(kind: TyKind, span: Span) -> Self {
        Ty {
            kind,
            id: DUMMY_NODE_ID,
            span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TyKind {
    /// A type path, e.g. `i32` or `vec::Vec`.
    Path(Path),
    /// `&ty`, `&mut ty`
    Ref(Mutability, Box<Ty>),
    /// `[ty; count]`
    Array(Box<Ty>, AnonConst),
    /// `(ty)`
    Paren(Box<Ty>),
    /// `_`
    Infer,
    /// Placeholder for a type that failed to parse.
    Err,
}

/// One `pat: ty` function parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub pat: Box<Pat>,
    pub ty: Box<Ty>,
    pub id: NodeId,
    pub span: Span,
}

/// `-> ty`, or nothing.
#[derive(Clone, Debug, PartialEq)]
pub enum FnRetTy {
    /// No `->`; the span points where one would go.
    Default(Span),
    Ty(Box<Ty>),
}

impl FnRetTy {
    pub fn span(&self) -> Span {
        match self {
            FnRetTy::Default(span) => *span,
            FnRetTy::Ty(ty) => ty.span,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FnDecl {
    pub inputs: Vec<Param>,
    pub output: FnRetTy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FnSig {
    pub decl: Box<FnDecl>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub ident: Ident,
    pub kind: ItemKind,
    pub id: NodeId,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ItemKind {
    /// `const NAME: ty = value;`
    Const(Box<Ty>, Option<Box<Expr>>),
    /// `static NAME: ty = value;`
    Static(Mutability, Box<Ty>, Option<Box<Expr>>),
    /// `fn name(params) -> ret { body }`
    Fn(FnSig, Option<Box<Block>>),
}
