//! Interned identifier symbols and the per-session interner.
//!
//! The interner is seeded with every keyword and built-in type name in a
//! fixed order, so keyword classification is a range compare on the raw
//! symbol index rather than a string lookup.

use std::cell::RefCell;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::Span;

/// An interned string, represented as an index into the session interner.
///
/// Symbols compare with `<`/`>` by raw index; the pre-seeded table keeps
/// keywords in a contiguous, known range so those comparisons are meaningful
/// for classification.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Symbol(u32);

impl Symbol {
    #[inline]
    pub const fn new(index: u32) -> Self {
        Symbol(index)
    }

    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Reserved identifiers used internally (`""`, path root, `_`).
    #[inline]
    pub fn is_special(self) -> bool {
        self <= kw::UNDERSCORE
    }

    /// Keywords with meaning in the current grammar.
    #[inline]
    pub fn is_used_keyword(self) -> bool {
        kw::AS <= self && self <= kw::WHILE
    }

    /// Keywords reserved for future use, including edition keywords.
    #[inline]
    pub fn is_unused_keyword(self) -> bool {
        kw::ABSTRACT <= self && self <= kw::TRY
    }

    /// Any identifier that may not be used as a plain name.
    #[inline]
    pub fn is_reserved(self) -> bool {
        self.is_special() || self.is_used_keyword() || self.is_unused_keyword()
    }

    /// Keywords that only have meaning in specific contexts.
    #[inline]
    pub fn is_weak_keyword(self) -> bool {
        kw::AUTO <= self && self <= kw::UNION
    }

    /// Built-in primitive type names (`bool`, `i32`, ...).
    #[inline]
    pub fn is_primitive_type_name(self) -> bool {
        sym::BOOL <= self && self <= sym::USIZE
    }

    /// Keywords permitted as path segments (`self`, `Self`, `super`, ...).
    #[inline]
    pub fn is_path_segment_keyword(self) -> bool {
        self == kw::SUPER
            || self == kw::SELF_LOWER
            || self == kw::SELF_UPPER
            || self == kw::CRATE
            || self == kw::DOLLAR_CRATE
            || self == kw::PATH_ROOT
    }

    #[inline]
    pub fn is_bool_lit(self) -> bool {
        self == kw::TRUE || self == kw::FALSE
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

macro_rules! predefined_symbols {
    ($($name:ident : $text:literal),* $(,)?) => {
        /// Pre-seeded symbols, in interner order.
        ///
        /// The split between the `kw` and `sym` namespaces mirrors how the
        /// constants are used; both index the same table.
        pub mod predefined {
            use super::Symbol;

            predefined_symbols!(@consts 0u32; $($name : $text),*);

            /// Seed strings in index order.
            pub(crate) const PREFILL: &[&str] = &[$($text),*];
        }
    };
    (@consts $idx:expr; $name:ident : $text:literal) => {
        pub const $name: Symbol = Symbol::new($idx);
    };
    (@consts $idx:expr; $name:ident : $text:literal, $($rest:ident : $rtext:literal),+) => {
        pub const $name: Symbol = Symbol::new($idx);
        predefined_symbols!(@consts $idx + 1; $($rest : $rtext),+);
    };
}

predefined_symbols! {
    // Special reserved identifiers used internally for error recovery,
    // the crate root and wildcard bindings.
    INVALID: "",
    PATH_ROOT: "{{root}}",
    DOLLAR_CRATE: "$crate",
    UNDERSCORE: "_",
    // Keywords used in the stable grammar.
    AS: "as",
    BREAK: "break",
    CONST: "const",
    CONTINUE: "continue",
    CRATE: "crate",
    ELSE: "else",
    ENUM: "enum",
    EXTERN: "extern",
    FALSE: "false",
    FN: "fn",
    FOR: "for",
    IF: "if",
    IMPL: "impl",
    IN: "in",
    LET: "let",
    LOOP: "loop",
    MATCH: "match",
    MOD: "mod",
    MOVE: "move",
    MUT: "mut",
    PUB: "pub",
    REF: "ref",
    RETURN: "return",
    SELF_LOWER: "self",
    SELF_UPPER: "Self",
    STATIC: "static",
    STRUCT: "struct",
    SUPER: "super",
    TRAIT: "trait",
    TRUE: "true",
    TYPE: "type",
    UNSAFE: "unsafe",
    USE: "use",
    WHERE: "where",
    WHILE: "while",
    // Keywords reserved for future use.
    ABSTRACT: "abstract",
    BECOME: "become",
    BOX: "box",
    DO: "do",
    FINAL: "final",
    MACRO: "macro",
    OVERRIDE: "override",
    PRIV: "priv",
    TYPEOF: "typeof",
    UNSIZED: "unsized",
    VIRTUAL: "virtual",
    YIELD: "yield",
    // Edition-specific keywords.
    ASYNC: "async",
    AWAIT: "await",
    DYN: "dyn",
    TRY: "try",
    // Special lifetime names.
    UNDERSCORE_LIFETIME: "'_",
    STATIC_LIFETIME: "'static",
    // Weak keywords, meaningful only in specific contexts.
    AUTO: "auto",
    CATCH: "catch",
    DEFAULT: "default",
    MACRO_RULES: "macro_rules",
    RAW: "raw",
    UNION: "union",
    // Built-in primitive type names.
    BOOL: "bool",
    CHAR: "char",
    STR: "str",
    UINT: "uint",
    INT: "int",
    ISIZE: "isize",
    U8: "u8",
    I8: "i8",
    U16: "u16",
    I16: "i16",
    U32: "u32",
    I32: "i32",
    U64: "u64",
    I64: "i64",
    U128: "u128",
    I128: "i128",
    F32: "f32",
    F64: "f64",
    USIZE: "usize",
}

/// Keyword symbols.
pub mod kw {
    pub use super::predefined::{
        ABSTRACT, AS, ASYNC, AUTO, AWAIT, BECOME, BOX, BREAK, CATCH, CONST, CONTINUE, CRATE,
        DEFAULT, DO, DOLLAR_CRATE, DYN, ELSE, ENUM, EXTERN, FALSE, FINAL, FN, FOR, IF, IMPL, IN,
        INVALID, LET, LOOP, MACRO, MACRO_RULES, MATCH, MOD, MOVE, MUT, OVERRIDE, PATH_ROOT, PRIV,
        PUB, RAW, REF, RETURN, SELF_LOWER, SELF_UPPER, STATIC, STATIC_LIFETIME, STRUCT, SUPER,
        TRAIT, TRUE, TRY, TYPE, TYPEOF, UNDERSCORE, UNDERSCORE_LIFETIME, UNION, UNSAFE, UNSIZED,
        USE, VIRTUAL, WHERE, WHILE, YIELD,
    };
}

/// Built-in type name symbols.
pub mod sym {
    pub use super::predefined::{
        BOOL, CHAR, F32, F64, I128, I16, I32, I64, I8, INT, ISIZE, STR, U128, U16, U32, U64, U8,
        UINT, USIZE,
    };
}

/// Per-session string interner.
///
/// Append-only; interned text is leaked so lookups hand out `&'static str`.
/// One interner serves one parse session, so interior mutability is a plain
/// `RefCell` rather than a lock.
pub struct Interner {
    inner: RefCell<InternerInner>,
}

struct InternerInner {
    names: FxHashMap<&'static str, Symbol>,
    strings: Vec<&'static str>,
}

impl Interner {
    /// Create an interner seeded with the keyword and builtin-type table.
    pub fn fresh() -> Self {
        let mut inner = InternerInner {
            names: FxHashMap::default(),
            strings: Vec::with_capacity(predefined::PREFILL.len() + 256),
        };
        for (index, text) in predefined::PREFILL.iter().enumerate() {
            // Lossless: PREFILL is tiny and index order defines the constants.
            inner.strings.push(text);
            inner.names.insert(text, Symbol::new(index as u32));
        }
        Interner {
            inner: RefCell::new(inner),
        }
    }

    /// Intern a string, returning the existing symbol if already present.
    pub fn intern(&self, string: &str) -> Symbol {
        let mut inner = self.inner.borrow_mut();
        if let Some(&sym) = inner.names.get(string) {
            return sym;
        }
        let leaked: &'static str = Box::leak(string.to_owned().into_boxed_str());
        let sym = Symbol::new(u32::try_from(inner.strings.len()).unwrap_or(u32::MAX));
        inner.strings.push(leaked);
        inner.names.insert(leaked, sym);
        sym
    }

    /// Resolve a symbol back to its text.
    pub fn get(&self, symbol: Symbol) -> &'static str {
        let inner = self.inner.borrow();
        inner
            .strings
            .get(symbol.as_u32() as usize)
            .copied()
            .unwrap_or("")
    }

    /// Number of interned strings, including the seeded table.
    pub fn len(&self) -> usize {
        self.inner.borrow().strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Interner {
    fn default() -> Self {
        Interner::fresh()
    }
}

/// A name occurrence: an interned symbol plus its source span.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Ident {
    pub name: Symbol,
    pub span: Span,
}

impl Ident {
    #[inline]
    pub const fn new(name: Symbol, span: Span) -> Self {
        Ident { name, span }
    }

    /// Placeholder identifier produced during error recovery.
    pub const INVALID: Ident = Ident::new(kw::INVALID, Span::DUMMY);

    #[inline]
    pub fn is_reserved(&self) -> bool {
        self.name.is_reserved()
    }

    #[inline]
    pub fn is_path_segment_keyword(&self) -> bool {
        self.name.is_path_segment_keyword()
    }
}
