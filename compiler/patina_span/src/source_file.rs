//! In-memory source files with byte-to-line lookup.

use memchr::memchr_iter;

use crate::Span;

/// One compilation unit's source text.
///
/// The loader reads the file; this type never touches the filesystem. The
/// line-start table is built once at construction so span-to-line lookup is
/// a binary search.
pub struct SourceFile {
    /// Display name, usually the path the loader read.
    pub name: String,
    /// Full source text.
    pub src: String,
    /// Byte offset of the first character of every line.
    lines: Vec<u32>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, src: impl Into<String>) -> Self {
        let src = src.into();
        let mut lines = Vec::with_capacity(64);
        lines.push(0);
        for newline in memchr_iter(b'\n', src.as_bytes()) {
            lines.push(newline as u32 + 1);
        }
        SourceFile {
            name: name.into(),
            src,
            lines,
        }
    }

    /// Number of lines, counting a trailing newline-less fragment.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Zero-based line index containing the byte offset.
    ///
    /// Offsets past the end of the text map to the last line.
    pub fn line_index(&self, offset: u32) -> usize {
        match self.lines.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line - 1,
        }
    }

    /// Span of one line's text, excluding the newline.
    pub fn line_span(&self, line: usize) -> Span {
        let lo = self.lines.get(line).copied().unwrap_or(0);
        let hi = match self.lines.get(line + 1) {
            Some(&next) => next - 1,
            None => self.src.len() as u32,
        };
        Span::new(lo, hi)
    }

    /// One line's text, excluding the newline.
    pub fn line_text(&self, line: usize) -> &str {
        &self.src[self.line_span(line).to_range()]
    }

    /// Slice of the source covered by a span.
    ///
    /// Out-of-range spans yield the empty string rather than panicking;
    /// diagnostics must never crash the session.
    pub fn span_text(&self, span: Span) -> &str {
        self.src.get(span.to_range()).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_table() {
        let file = SourceFile::new("test.pat", "let a = 1;\nlet b = 2;\n");
        assert_eq!(file.line_count(), 3);
        assert_eq!(file.line_index(0), 0);
        assert_eq!(file.line_index(10), 0);
        assert_eq!(file.line_index(11), 1);
        assert_eq!(file.line_text(0), "let a = 1;");
        assert_eq!(file.line_text(1), "let b = 2;");
        assert_eq!(file.line_text(2), "");
    }

    #[test]
    fn no_trailing_newline() {
        let file = SourceFile::new("test.pat", "fn main() {}");
        assert_eq!(file.line_count(), 1);
        assert_eq!(file.line_index(5), 0);
        assert_eq!(file.line_text(0), "fn main() {}");
    }

    #[test]
    fn empty_file() {
        let file = SourceFile::new("empty.pat", "");
        assert_eq!(file.line_count(), 1);
        assert_eq!(file.line_index(0), 0);
        assert_eq!(file.line_text(0), "");
    }

    #[test]
    fn span_text() {
        let file = SourceFile::new("test.pat", "let a = 1;");
        assert_eq!(file.span_text(Span::new(0, 3)), "let");
        assert_eq!(file.span_text(Span::new(4, 5)), "a");
        assert_eq!(file.span_text(Span::new(0, 999)), "");
    }

    #[test]
    fn line_index_past_end() {
        let file = SourceFile::new("test.pat", "a\nb");
        assert_eq!(file.line_index(999), 1);
    }
}
