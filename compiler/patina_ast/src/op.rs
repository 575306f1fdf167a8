//! Operator kinds shared across expressions, patterns and types.

use crate::token::BinOpToken;

/// Binary operator in the syntax tree.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BinOpKind {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `^`
    BitXor,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `==`
    Eq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `!=`
    Ne,
    /// `>=`
    Ge,
    /// `>`
    Gt,
}

impl BinOpKind {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Rem => "%",
            BinOpKind::And => "&&",
            BinOpKind::Or => "||",
            BinOpKind::BitXor => "^",
            BinOpKind::BitAnd => "&",
            BinOpKind::BitOr => "|",
            BinOpKind::Shl => "<<",
            BinOpKind::Shr => ">>",
            BinOpKind::Eq => "==",
            BinOpKind::Lt => "<",
            BinOpKind::Le => "<=",
            BinOpKind::Ne => "!=",
            BinOpKind::Ge => ">=",
            BinOpKind::Gt => ">",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinOpKind::Eq
                | BinOpKind::Lt
                | BinOpKind::Le
                | BinOpKind::Ne
                | BinOpKind::Ge
                | BinOpKind::Gt
        )
    }

    /// Short-circuiting operators.
    pub fn is_lazy(self) -> bool {
        matches!(self, BinOpKind::And | BinOpKind::Or)
    }

    /// The tree operator for a single-character operator token, as used by
    /// compound assignment.
    pub fn from_token(op: BinOpToken) -> Self {
        match op {
            BinOpToken::Plus => BinOpKind::Add,
            BinOpToken::Minus => BinOpKind::Sub,
            BinOpToken::Star => BinOpKind::Mul,
            BinOpToken::Slash => BinOpKind::Div,
            BinOpToken::Percent => BinOpKind::Rem,
            BinOpToken::Caret => BinOpKind::BitXor,
            BinOpToken::And => BinOpKind::BitAnd,
            BinOpToken::Or => BinOpKind::BitOr,
            BinOpToken::Shl => BinOpKind::Shl,
            BinOpToken::Shr => BinOpKind::Shr,
        }
    }
}

/// Unary operator.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum UnOpKind {
    /// `*expr`
    Deref,
    /// `!expr`
    Not,
    /// `-expr`
    Neg,
}

impl UnOpKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UnOpKind::Deref => "*",
            UnOpKind::Not => "!",
            UnOpKind::Neg => "-",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Mutability {
    Not,
    Mut,
}

impl Mutability {
    pub fn prefix_str(self) -> &'static str {
        match self {
            Mutability::Not => "",
            Mutability::Mut => "mut ",
        }
    }
}

/// `&expr` vs `&raw const expr`. Only the shared form is parsed; it is kept
/// as a kind so borrow expressions carry their flavor explicitly.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BorrowKind {
    Ref,
}

/// Binding mode of a pattern binding: `x`, `mut x`, `ref x`, `ref mut x`.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum BindingMode {
    ByValue(Mutability),
    ByRef(Mutability),
}

/// `..` vs `..=` in range expressions.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum RangeLimits {
    /// `..`, excluding the end.
    HalfOpen,
    /// `..=`, including the end.
    Closed,
}

impl RangeLimits {
    pub fn as_str(self) -> &'static str {
        match self {
            RangeLimits::HalfOpen => "..",
            RangeLimits::Closed => "..=",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn comparison_and_lazy_split() {
        assert!(BinOpKind::Lt.is_comparison());
        assert!(BinOpKind::Ne.is_comparison());
        assert!(!BinOpKind::And.is_comparison());
        assert!(BinOpKind::And.is_lazy());
        assert!(BinOpKind::Or.is_lazy());
        assert!(!BinOpKind::BitOr.is_lazy());
    }

    #[test]
    fn token_to_tree_operator() {
        assert_eq!(BinOpKind::from_token(BinOpToken::And), BinOpKind::BitAnd);
        assert_eq!(BinOpKind::from_token(BinOpToken::Caret), BinOpKind::BitXor);
        assert_eq!(BinOpKind::from_token(BinOpToken::Shl), BinOpKind::Shl);
    }
}
