//! Source location spans.

use std::fmt;

/// Half-open byte range `[lo, hi)` into a source file.
///
/// Layout: 8 bytes total
/// - lo: u32 - byte offset from file start
/// - hi: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub lo: u32,
    pub hi: u32,
}

impl Span {
    /// Dummy span for absent or synthesized locations.
    pub const DUMMY: Span = Span { lo: 0, hi: 0 };

    /// Create a new span. Swapped bounds are normalized.
    #[inline]
    pub const fn new(lo: u32, hi: u32) -> Self {
        if lo > hi {
            Span { lo: hi, hi: lo }
        } else {
            Span { lo, hi }
        }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.hi - self.lo
    }

    /// Check if span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.lo == self.hi
    }

    /// The `0..0` span that marks "no location".
    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Check if an offset is within this span.
    #[inline]
    pub fn contains_offset(&self, offset: u32) -> bool {
        offset >= self.lo && offset < self.hi
    }

    /// Check if another span is fully contained within this span.
    #[inline]
    pub fn contains(&self, other: Span) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }

    /// Union of two spans: the smallest span covering both.
    #[inline]
    #[must_use]
    pub fn to(self, other: Span) -> Span {
        Span {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    /// Create a point span (zero-length).
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span {
            lo: offset,
            hi: offset,
        }
    }

    /// Convert to a `std::ops::Range` for slicing source text.
    #[inline]
    pub fn to_range(&self) -> std::ops::Range<usize> {
        self.lo as usize..self.hi as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.lo, self.hi)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.lo, self.hi)
    }
}

// Size assertions to prevent accidental regressions
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Span;
    crate::static_assert_size!(Span, 8);
}
