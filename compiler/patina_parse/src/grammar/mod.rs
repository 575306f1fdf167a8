//! The grammar proper, one module per syntactic category.

mod expr;
mod item;
mod pat;
mod path;
mod stmt;
mod ty;
