//! Token and syntax tree definitions for the Patina compiler.
//!
//! The lexer produces [`token::Token`]s, the tree reader groups them into
//! [`token_stream::TokenStream`]s, and the parser builds the [`ast`] nodes.
//! Nothing here performs analysis; this crate is pure data plus the small
//! classification helpers the parser leans on.

pub mod assoc;
pub mod ast;
pub mod op;
pub mod token;
pub mod token_stream;

pub use assoc::{AssocOp, ExprPrecedence, Fixity};
pub use op::{BindingMode, BinOpKind, BorrowKind, Mutability, RangeLimits, UnOpKind};
pub use token::{BinOpToken, Delim, Lit, LitKind, Token, TokenKind};
pub use token_stream::{DelimSpan, Spacing, TokenStream, TokenTree, TreeCursor};
