//! Binary-operator association: precedence, fixity, and the mapping from
//! tokens to tree operators. The expression parser climbs these tables.

use crate::ast::ExprKind;
use crate::op::{BinOpKind, RangeLimits};
use crate::token::{BinOpToken, Token, TokenKind};
use patina_span::kw;

/// Associative operator as seen by the precedence climber. This is wider
/// than [`BinOpKind`]: it also covers assignment, casts, type ascription
/// and ranges, which parse infix but do not produce `Binary` nodes.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum AssocOp {
    /// `=`
    Assign,
    /// `+=`, `<<=`, ... carrying the underlying operator token.
    AssignOp(BinOpToken),
    /// `as`
    As,
    /// `:`
    Colon,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulus,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `<<`
    ShiftLeft,
    /// `>>`
    ShiftRight,
    /// `&`
    BitAnd,
    /// `^`
    BitXor,
    /// `|`
    BitOr,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `&&`
    LAnd,
    /// `||`
    LOr,
    /// `..`
    DotDot,
    /// `..=`
    DotDotEq,
}

/// How an operator of one precedence level chains with itself.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Fixity {
    /// `a - b - c` is `(a - b) - c`.
    Left,
    /// `a = b = c` is `a = (b = c)`.
    Right,
    /// `a .. b .. c` is an error.
    None,
}

impl AssocOp {
    /// The associative operator starting at `token`, if any.
    pub fn from_token(token: &Token) -> Option<AssocOp> {
        match token.kind {
            TokenKind::Eq => Some(AssocOp::Assign),
            TokenKind::BinOpEq(op) => Some(AssocOp::AssignOp(op)),
            TokenKind::BinOp(BinOpToken::Star) => Some(AssocOp::Multiply),
            TokenKind::BinOp(BinOpToken::Slash) => Some(AssocOp::Divide),
            TokenKind::BinOp(BinOpToken::Percent) => Some(AssocOp::Modulus),
            TokenKind::BinOp(BinOpToken::Plus) => Some(AssocOp::Add),
            TokenKind::BinOp(BinOpToken::Minus) => Some(AssocOp::Subtract),
            TokenKind::BinOp(BinOpToken::Shl) => Some(AssocOp::ShiftLeft),
            TokenKind::BinOp(BinOpToken::Shr) => Some(AssocOp::ShiftRight),
            TokenKind::BinOp(BinOpToken::And) => Some(AssocOp::BitAnd),
            TokenKind::BinOp(BinOpToken::Caret) => Some(AssocOp::BitXor),
            TokenKind::BinOp(BinOpToken::Or) => Some(AssocOp::BitOr),
            TokenKind::Lt => Some(AssocOp::Less),
            TokenKind::Gt => Some(AssocOp::Greater),
            TokenKind::Le => Some(AssocOp::LessEqual),
            TokenKind::Ge => Some(AssocOp::GreaterEqual),
            TokenKind::EqEq => Some(AssocOp::Equal),
            TokenKind::Ne => Some(AssocOp::NotEqual),
            TokenKind::AndAnd => Some(AssocOp::LAnd),
            TokenKind::OrOr => Some(AssocOp::LOr),
            TokenKind::DotDot => Some(AssocOp::DotDot),
            TokenKind::DotDotEq => Some(AssocOp::DotDotEq),
            TokenKind::Ident(name) if name == kw::AS => Some(AssocOp::As),
            TokenKind::Colon => Some(AssocOp::Colon),
            _ => None,
        }
    }

    /// Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            AssocOp::As | AssocOp::Colon => 14,
            AssocOp::Multiply | AssocOp::Divide | AssocOp::Modulus => 13,
            AssocOp::Add | AssocOp::Subtract => 12,
            AssocOp::ShiftLeft | AssocOp::ShiftRight => 11,
            AssocOp::BitAnd => 10,
            AssocOp::BitXor => 9,
            AssocOp::BitOr => 8,
            AssocOp::Less
            | AssocOp::Greater
            | AssocOp::LessEqual
            | AssocOp::GreaterEqual
            | AssocOp::Equal
            | AssocOp::NotEqual => 7,
            AssocOp::LAnd => 6,
            AssocOp::LOr => 5,
            AssocOp::DotDot | AssocOp::DotDotEq => 4,
            AssocOp::Assign | AssocOp::AssignOp(_) => 2,
        }
    }

    pub fn fixity(self) -> Fixity {
        match self {
            AssocOp::Assign | AssocOp::AssignOp(_) => Fixity::Right,
            AssocOp::As
            | AssocOp::Colon
            | AssocOp::Multiply
            | AssocOp::Divide
            | AssocOp::Modulus
            | AssocOp::Add
            | AssocOp::Subtract
            | AssocOp::ShiftLeft
            | AssocOp::ShiftRight
            | AssocOp::BitAnd
            | AssocOp::BitXor
            | AssocOp::BitOr
            | AssocOp::Less
            | AssocOp::Greater
            | AssocOp::LessEqual
            | AssocOp::GreaterEqual
            | AssocOp::Equal
            | AssocOp::NotEqual
            | AssocOp::LAnd
            | AssocOp::LOr => Fixity::Left,
            AssocOp::DotDot | AssocOp::DotDotEq => Fixity::None,
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            AssocOp::Less
                | AssocOp::Greater
                | AssocOp::LessEqual
                | AssocOp::GreaterEqual
                | AssocOp::Equal
                | AssocOp::NotEqual
        )
    }

    pub fn is_assign_like(self) -> bool {
        matches!(self, AssocOp::Assign | AssocOp::AssignOp(_))
    }

    /// The tree operator this produces, for the operators that build a
    /// `Binary` node.
    pub fn to_ast_binop(self) -> Option<BinOpKind> {
        match self {
            AssocOp::Less => Some(BinOpKind::Lt),
            AssocOp::Greater => Some(BinOpKind::Gt),
            AssocOp::LessEqual => Some(BinOpKind::Le),
            AssocOp::GreaterEqual => Some(BinOpKind::Ge),
            AssocOp::Equal => Some(BinOpKind::Eq),
            AssocOp::NotEqual => Some(BinOpKind::Ne),
            AssocOp::Multiply => Some(BinOpKind::Mul),
            AssocOp::Divide => Some(BinOpKind::Div),
            AssocOp::Modulus => Some(BinOpKind::Rem),
            AssocOp::Add => Some(BinOpKind::Add),
            AssocOp::Subtract => Some(BinOpKind::Sub),
            AssocOp::ShiftLeft => Some(BinOpKind::Shl),
            AssocOp::ShiftRight => Some(BinOpKind::Shr),
            AssocOp::BitAnd => Some(BinOpKind::BitAnd),
            AssocOp::BitXor => Some(BinOpKind::BitXor),
            AssocOp::BitOr => Some(BinOpKind::BitOr),
            AssocOp::LAnd => Some(BinOpKind::And),
            AssocOp::LOr => Some(BinOpKind::Or),
            AssocOp::Assign
            | AssocOp::AssignOp(_)
            | AssocOp::As
            | AssocOp::Colon
            | AssocOp::DotDot
            | AssocOp::DotDotEq => None,
        }
    }

    /// The range limits, for the two range operators.
    pub fn to_range_limits(self) -> Option<RangeLimits> {
        match self {
            AssocOp::DotDot => Some(RangeLimits::HalfOpen),
            AssocOp::DotDotEq => Some(RangeLimits::Closed),
            _ => None,
        }
    }
}

pub const PREC_JUMP: i8 = -30;
pub const PREC_RANGE: i8 = -10;
// The range 2..=14 is reserved for AssocOp binary operator precedences.
pub const PREC_PREFIX: i8 = 50;
pub const PREC_POSTFIX: i8 = 60;
pub const PREC_PAREN: i8 = 99;

/// Precedence class of a built expression, used when deciding whether an
/// operand needs parentheses and whether it may stand as a statement head.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ExprPrecedence;

impl ExprPrecedence {
    pub fn order(expr: &ExprKind) -> i8 {
        match expr {
            ExprKind::Break(..) | ExprKind::Continue(_) | ExprKind::Ret(_) => PREC_JUMP,

            // `..` weaker than any binary operator: `x .. y + 1` ranges over
            // the sum.
            ExprKind::Range(..) => PREC_RANGE,

            ExprKind::Binary(op, ..) => binop_precedence(*op) as i8,
            ExprKind::Cast(..) => AssocOp::As.precedence() as i8,
            ExprKind::Type(..) => AssocOp::Colon.precedence() as i8,
            ExprKind::Assign(..) | ExprKind::AssignOp(..) => AssocOp::Assign.precedence() as i8,

            ExprKind::AddrOf(..) | ExprKind::Let(..) | ExprKind::Unary(..) => PREC_PREFIX,

            ExprKind::Call(..) | ExprKind::Index(..) | ExprKind::Try(_) => PREC_POSTFIX,

            ExprKind::Array(_)
            | ExprKind::Repeat(..)
            | ExprKind::Block(..)
            | ExprKind::If(..)
            | ExprKind::While(..)
            | ExprKind::ForLoop(..)
            | ExprKind::Loop(..)
            | ExprKind::Match(..)
            | ExprKind::Lit(_)
            | ExprKind::Paren(_)
            | ExprKind::Path(_)
            | ExprKind::Err => PREC_PAREN,
        }
    }
}

fn binop_precedence(op: BinOpKind) -> u8 {
    let assoc = match op {
        BinOpKind::Mul => AssocOp::Multiply,
        BinOpKind::Div => AssocOp::Divide,
        BinOpKind::Rem => AssocOp::Modulus,
        BinOpKind::Add => AssocOp::Add,
        BinOpKind::Sub => AssocOp::Subtract,
        BinOpKind::Shl => AssocOp::ShiftLeft,
        BinOpKind::Shr => AssocOp::ShiftRight,
        BinOpKind::BitAnd => AssocOp::BitAnd,
        BinOpKind::BitXor => AssocOp::BitXor,
        BinOpKind::BitOr => AssocOp::BitOr,
        BinOpKind::Lt => AssocOp::Less,
        BinOpKind::Gt => AssocOp::Greater,
        BinOpKind::Le => AssocOp::LessEqual,
        BinOpKind::Ge => AssocOp::GreaterEqual,
        BinOpKind::Eq => AssocOp::Equal,
        BinOpKind::Ne => AssocOp::NotEqual,
        BinOpKind::And => AssocOp::LAnd,
        BinOpKind::Or => AssocOp::LOr,
    };
    assoc.precedence()
}

#[cfg(test)]
mod tests {
    use super::*;
    use patina_span::Span;
    use pretty_assertions::assert_eq;

    fn tok(kind: TokenKind) -> Token {
        Token::new(kind, Span::new(0, 1))
    }

    #[test]
    fn token_mapping() {
        assert_eq!(tok(TokenKind::Eq).kind, TokenKind::Eq);
        assert_eq!(AssocOp::from_token(&tok(TokenKind::Eq)), Some(AssocOp::Assign));
        assert_eq!(
            AssocOp::from_token(&tok(TokenKind::BinOpEq(BinOpToken::Shl))),
            Some(AssocOp::AssignOp(BinOpToken::Shl))
        );
        assert_eq!(
            AssocOp::from_token(&tok(TokenKind::Ident(kw::AS))),
            Some(AssocOp::As)
        );
        assert_eq!(AssocOp::from_token(&tok(TokenKind::Semi)), None);
        assert_eq!(
            AssocOp::from_token(&tok(TokenKind::Ident(kw::IF))),
            None
        );
    }

    #[test]
    fn precedence_ordering() {
        assert!(AssocOp::Multiply.precedence() > AssocOp::Add.precedence());
        assert!(AssocOp::Add.precedence() > AssocOp::ShiftLeft.precedence());
        assert!(AssocOp::Less.precedence() > AssocOp::LAnd.precedence());
        assert!(AssocOp::LAnd.precedence() > AssocOp::LOr.precedence());
        assert!(AssocOp::LOr.precedence() > AssocOp::DotDot.precedence());
        assert!(AssocOp::DotDot.precedence() > AssocOp::Assign.precedence());
        assert_eq!(AssocOp::As.precedence(), AssocOp::Colon.precedence());
    }

    #[test]
    fn fixity_classes() {
        assert_eq!(AssocOp::Assign.fixity(), Fixity::Right);
        assert_eq!(AssocOp::AssignOp(BinOpToken::Plus).fixity(), Fixity::Right);
        assert_eq!(AssocOp::Add.fixity(), Fixity::Left);
        assert_eq!(AssocOp::DotDot.fixity(), Fixity::None);
        assert_eq!(AssocOp::DotDotEq.fixity(), Fixity::None);
    }

    #[test]
    fn binop_lowering() {
        assert_eq!(AssocOp::BitAnd.to_ast_binop(), Some(BinOpKind::BitAnd));
        assert_eq!(AssocOp::LAnd.to_ast_binop(), Some(BinOpKind::And));
        assert_eq!(AssocOp::Assign.to_ast_binop(), None);
        assert_eq!(AssocOp::DotDot.to_ast_binop(), None);
        assert_eq!(AssocOp::DotDot.to_range_limits(), Some(RangeLimits::HalfOpen));
        assert_eq!(AssocOp::DotDotEq.to_range_limits(), Some(RangeLimits::Closed));
    }

    #[test]
    fn every_generic_operator_has_a_binary_form() {
        // The climber special-cases assignment, casts, ascription and
        // ranges; everything else must lower to a `Binary` node.
        let generic = [
            AssocOp::Multiply,
            AssocOp::Divide,
            AssocOp::Modulus,
            AssocOp::Add,
            AssocOp::Subtract,
            AssocOp::ShiftLeft,
            AssocOp::ShiftRight,
            AssocOp::BitAnd,
            AssocOp::BitXor,
            AssocOp::BitOr,
            AssocOp::Less,
            AssocOp::Greater,
            AssocOp::LessEqual,
            AssocOp::GreaterEqual,
            AssocOp::Equal,
            AssocOp::NotEqual,
            AssocOp::LAnd,
            AssocOp::LOr,
        ];
        for op in generic {
            assert!(op.to_ast_binop().is_some(), "{op:?} has no binary form");
        }
    }
}
