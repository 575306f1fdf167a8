//! Low-level tokenizer for the Patina compiler.
//!
//! This crate is standalone: no `patina_*` dependencies, no interner, no
//! diagnostics. It classifies raw bytes into [`RawToken`]s carrying a kind
//! and a consumed length; every anomaly is data, not an error. Highlighters
//! and formatters can use it without pulling in the compiler.
//!
//! Pipeline position: source text -> **raw tokens** -> cooked tokens ->
//! token trees -> parser.

mod cursor;
mod scanner;
mod token;

pub use cursor::{Cursor, EOF_BYTE};
pub use scanner::{is_ident_continue, is_ident_start, is_whitespace, tokenize, Tokenizer};
pub use token::{Base, RawLiteralKind, RawToken, RawTokenKind};
