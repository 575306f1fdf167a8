//! Raw token definitions.
//!
//! Raw tokens carry a kind and a consumed length, never text. Anomalies
//! (unterminated literals, missing digits) are encoded as fields for the
//! cooking stage to turn into diagnostics; this layer never reports errors.

/// Numeric literal base.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Base {
    /// Literal starts with `0b`.
    Binary,
    /// Literal starts with `0o`.
    Octal,
    /// Literal starts with `0x`.
    Hexadecimal,
    /// No base prefix.
    Decimal,
}

impl Base {
    /// The radix, for diagnostics ("invalid digit for base 2 literal").
    pub fn radix(self) -> u32 {
        match self {
            Base::Binary => 2,
            Base::Octal => 8,
            Base::Hexadecimal => 16,
            Base::Decimal => 10,
        }
    }
}

/// Literal payload of a raw token.
///
/// `suffix_start` is the offset, relative to the token start, where a
/// trailing identifier suffix begins (`12u8`, `1.0f32`); equal to the token
/// length when there is no suffix.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum RawLiteralKind {
    /// `12_u8`, `0o100`, `0b120i99`
    Int {
        base: Base,
        empty_int: bool,
        suffix_start: u32,
    },
    /// `12.34f32`, `0b100.100`, `1e9`
    Float {
        base: Base,
        empty_exponent: bool,
        suffix_start: u32,
    },
    /// `'a'`, `'\\'`, `';`
    Char { terminated: bool, suffix_start: u32 },
    /// `"abc"`, `"abc`
    Str { terminated: bool, suffix_start: u32 },
}

/// Classification of one raw token.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum RawTokenKind {
    /// `// comment`
    LineComment,
    /// `/* block comment */`
    ///
    /// Block comments nest, so `/* /* */` is unterminated.
    BlockComment { terminated: bool },
    /// Any whitespace character sequence.
    Whitespace,
    /// `ident` or `continue`; keywords are identifiers at this stage.
    Ident,
    /// `r#ident`
    RawIdent,
    /// Literals; see [`RawLiteralKind`].
    Literal { kind: RawLiteralKind },
    /// `'a`
    Lifetime { starts_with_number: bool },

    // One-char tokens.
    /// `;`
    Semi,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `@`
    At,
    /// `#`
    Pound,
    /// `~`
    Tilde,
    /// `?`
    Question,
    /// `:`
    Colon,
    /// `$`
    Dollar,
    /// `=`
    Eq,
    /// `!`
    Not,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `-`
    Minus,
    /// `&`
    And,
    /// `|`
    Or,
    /// `+`
    Plus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `%`
    Percent,

    /// A byte the tokenizer does not expect, e.g. `№`.
    Unknown,
}

/// One raw token: a classification plus the number of bytes consumed.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct RawToken {
    pub kind: RawTokenKind,
    pub len: u32,
}

impl RawToken {
    pub const fn new(kind: RawTokenKind, len: u32) -> Self {
        RawToken { kind, len }
    }

    /// Trivia is skipped by the cooker and never reaches the parser.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            RawTokenKind::Whitespace
                | RawTokenKind::LineComment
                | RawTokenKind::BlockComment { .. }
        )
    }
}
