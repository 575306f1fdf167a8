//! Byte cursor over source text.
//!
//! The cursor advances byte-by-byte with 1-3 bytes of lookahead. Peeks past
//! the end of the buffer return `EOF_BYTE` (`0x00`), so scanning code never
//! needs explicit bounds checks before a peek.

use memchr::memchr;

/// Returned by peeks past the end of input.
pub const EOF_BYTE: u8 = 0x00;

/// Byte cursor with bounded lookahead.
///
/// The cursor is [`Copy`], enabling cheap state snapshots. `consumed()`
/// reports how many bytes have been taken since construction; the scanner
/// derives token lengths from it.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: u32,
}

// Fat pointer (16) + u32 keeps snapshots register-friendly.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0.
    ///
    /// # Contract
    ///
    /// `src` must be at most `u32::MAX` bytes; offsets are 32-bit.
    pub fn new(src: &'a str) -> Self {
        debug_assert!(src.len() <= u32::MAX as usize);
        Cursor {
            buf: src.as_bytes(),
            pos: 0,
        }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn consumed(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos as usize >= self.buf.len()
    }

    /// Peek at the next byte without consuming it.
    #[inline]
    pub fn first(&self) -> u8 {
        self.peek_at(0)
    }

    /// Peek one byte past `first`.
    #[inline]
    pub fn second(&self) -> u8 {
        self.peek_at(1)
    }

    /// Peek two bytes past `first`.
    #[inline]
    pub fn third(&self) -> u8 {
        self.peek_at(2)
    }

    #[inline]
    fn peek_at(&self, n: u32) -> u8 {
        self.buf
            .get((self.pos + n) as usize)
            .copied()
            .unwrap_or(EOF_BYTE)
    }

    /// Consume and return the next byte, or `None` at EOF.
    #[inline]
    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.buf.get(self.pos as usize).copied()?;
        self.pos += 1;
        Some(byte)
    }

    /// Consume bytes while the predicate holds.
    #[inline]
    pub fn eat_while(&mut self, mut predicate: impl FnMut(u8) -> bool) {
        while !self.is_eof() && predicate(self.first()) {
            self.pos += 1;
        }
    }

    /// Skip to the next newline (exclusive), or EOF.
    ///
    /// memchr-accelerated; line comments are the hottest skip path.
    #[inline]
    pub fn eat_until_newline(&mut self) {
        let rest = &self.buf[self.pos as usize..];
        match memchr(b'\n', rest) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.buf.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn peeks_and_bump() {
        let mut cursor = Cursor::new("abc");
        assert_eq!(cursor.first(), b'a');
        assert_eq!(cursor.second(), b'b');
        assert_eq!(cursor.third(), b'c');
        assert_eq!(cursor.bump(), Some(b'a'));
        assert_eq!(cursor.consumed(), 1);
        assert_eq!(cursor.first(), b'b');
    }

    #[test]
    fn eof_peeks_are_nul() {
        let mut cursor = Cursor::new("x");
        assert_eq!(cursor.second(), EOF_BYTE);
        assert_eq!(cursor.bump(), Some(b'x'));
        assert!(cursor.is_eof());
        assert_eq!(cursor.first(), EOF_BYTE);
        assert_eq!(cursor.bump(), None);
        assert_eq!(cursor.consumed(), 1);
    }

    #[test]
    fn eat_while_stops_at_eof() {
        let mut cursor = Cursor::new("aaab");
        cursor.eat_while(|b| b == b'a');
        assert_eq!(cursor.consumed(), 3);
        cursor.eat_while(|_| true);
        assert_eq!(cursor.consumed(), 4);
        assert!(cursor.is_eof());
    }

    #[test]
    fn eat_until_newline() {
        let mut cursor = Cursor::new("// hi\nnext");
        cursor.eat_until_newline();
        assert_eq!(cursor.first(), b'\n');

        let mut cursor = Cursor::new("// no newline");
        cursor.eat_until_newline();
        assert!(cursor.is_eof());
    }

    #[test]
    fn snapshot_restore() {
        let mut cursor = Cursor::new("hello");
        let saved = cursor;
        let _ = cursor.bump();
        let _ = cursor.bump();
        assert_eq!(cursor.consumed(), 2);
        assert_eq!(saved.consumed(), 0);
    }
}
