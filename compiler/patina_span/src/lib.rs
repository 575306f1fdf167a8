//! Source-location substrate for the Patina compiler.
//!
//! This crate contains the leaf types everything else builds on:
//! - `Span`: half-open byte ranges into a source file
//! - `Symbol` / `Interner`: interned identifier text with a pre-seeded
//!   keyword table
//! - `Ident`: a name occurrence, `(Symbol, Span)`
//! - `SourceFile`: source text plus a line-start offset table

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod source_file;
mod span;
mod symbol;

pub use source_file::SourceFile;
pub use span::Span;
pub use symbol::{kw, sym, Ident, Interner, Symbol};
