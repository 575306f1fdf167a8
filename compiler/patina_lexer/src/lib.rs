//! Lexing proper: cooking raw tokens and building token trees.
//!
//! [`StringReader`] turns the raw token sequence into cooked tokens with
//! interned payloads, reporting malformed literals as it goes.
//! [`token_trees`] then groups the cooked tokens by delimiter and glues
//! adjacent operators into their compound forms. The parser consumes the
//! resulting stream; it never sees raw tokens or trivia.

mod cooker;
mod token_trees;

pub use cooker::StringReader;
pub use token_trees::token_trees;
