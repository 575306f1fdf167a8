//! Per-parse shared state.

use patina_span::{Interner, SourceFile, Span};

use crate::diagnostic::{Diagnostic, FatalError, Severity};
use crate::handler::Handler;

/// Everything a single parse shares: the source, the interner and the
/// diagnostic handler. Threaded explicitly through the lexer and parser; no
/// global state.
pub struct ParseSession {
    pub source_file: SourceFile,
    pub interner: Interner,
    pub handler: Handler,
}

impl ParseSession {
    pub fn new(source_file: SourceFile) -> Self {
        ParseSession {
            source_file,
            interner: Interner::fresh(),
            handler: Handler::new(),
        }
    }

    pub fn emit_span(&self, severity: Severity, span: Span, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(severity, message, span);
        let rendered = self.render(&diagnostic);
        self.handler.emit(diagnostic, &rendered);
    }

    /// Recoverable error; parsing continues.
    pub fn error_span(&self, span: Span, message: impl Into<String>) {
        self.emit_span(Severity::Error, span, message);
    }

    pub fn warn_span(&self, span: Span, message: impl Into<String>) {
        self.emit_span(Severity::Warning, span, message);
    }

    /// Unrecoverable error; the returned token aborts the parse through `?`.
    pub fn critical_span(&self, span: Span, message: impl Into<String>) -> FatalError {
        self.emit_span(Severity::Critical, span, message);
        FatalError
    }

    /// Render a diagnostic with its source line and a caret underline.
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let line = self.source_file.line_index(diagnostic.span.lo);
        let line_span = self.source_file.line_span(line);
        let text = self.source_file.line_text(line);
        let number = line + 1;

        let offset = diagnostic.span.lo.saturating_sub(line_span.lo) as usize;
        let offset = offset.min(text.len());
        let width = (diagnostic.span.len() as usize).clamp(1, text.len() - offset + 1);

        let gutter = format!(" {number} | ");
        let padding = " ".repeat(gutter.len() + offset);
        let carets = "^".repeat(width);
        format!(
            "{severity}: {message}\n  --> {name}:{number}:{column}\n{gutter}{text}\n{padding}{carets}",
            severity = diagnostic.severity,
            message = diagnostic.message,
            name = self.source_file.name,
            column = offset + 1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_points_at_span() {
        let sess = ParseSession::new(SourceFile::new("demo.pat", "let x = ;\n"));
        let diag = Diagnostic::new(Severity::Error, "expected expression", Span::new(8, 9));
        assert_eq!(
            sess.render(&diag),
            "error: expected expression\n  --> demo.pat:1:9\n 1 | let x = ;\n             ^"
        );
    }

    #[test]
    fn critical_counts_as_error() {
        let sess = ParseSession::new(SourceFile::new("demo.pat", "\"oops"));
        let fatal = sess.critical_span(Span::new(0, 5), "unterminated string literal");
        assert_eq!(fatal, FatalError);
        assert!(sess.handler.has_errors());
    }

    #[test]
    fn render_clamps_to_line_end() {
        let sess = ParseSession::new(SourceFile::new("demo.pat", "ab\ncd"));
        let diag = Diagnostic::new(Severity::Warning, "w", Span::new(0, 40));
        let rendered = sess.render(&diag);
        assert!(rendered.ends_with(" 1 | ab\n     ^^^"));
    }

    #[test]
    fn emitted_events_carry_the_rendered_excerpt() {
        use std::io;
        use std::sync::{Arc, Mutex};

        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Capture {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                let mut sink = self
                    .0
                    .lock()
                    .map_err(|_| io::Error::new(io::ErrorKind::Other, "poisoned"))?;
                sink.extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = Arc::clone(&buffer);
        let subscriber = tracing_subscriber::fmt()
            .without_time()
            .with_writer(move || Capture(Arc::clone(&writer)))
            .finish();

        let sess = ParseSession::new(SourceFile::new("demo.pat", "let x = ;\n"));
        tracing::subscriber::with_default(subscriber, || {
            sess.error_span(Span::new(8, 9), "expected expression");
        });

        let Ok(captured) = buffer.lock() else {
            panic!("capture buffer poisoned");
        };
        let output = String::from_utf8_lossy(&captured);
        assert!(output.contains("expected expression"));
        assert!(output.contains(" 1 | let x = ;"));
        assert!(output.contains("--> demo.pat:1:9"));
    }
}
