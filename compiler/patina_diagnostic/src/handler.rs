//! Diagnostic collection.

use std::cell::{Cell, RefCell};

use crate::diagnostic::{Diagnostic, Severity};

/// Collects diagnostics and tracks error counts for one compilation.
///
/// Interior mutability keeps emission possible through shared references;
/// the parser holds the session immutably while its token state is borrowed
/// mutably.
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
    err_count: Cell<usize>,
}

impl Handler {
    pub fn new() -> Self {
        Handler::default()
    }

    /// Record a diagnostic and emit its rendered form as a single tracing
    /// event at the matching level.
    pub fn emit(&self, diagnostic: Diagnostic, rendered: &str) {
        if diagnostic.severity.is_error() {
            self.err_count.set(self.err_count.get() + 1);
        }
        match diagnostic.severity {
            Severity::Info => tracing::info!("{rendered}"),
            Severity::Warning => tracing::warn!("{rendered}"),
            Severity::Error | Severity::Critical => tracing::error!("{rendered}"),
        }
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn err_count(&self) -> usize {
        self.err_count.get()
    }

    pub fn has_errors(&self) -> bool {
        self.err_count.get() > 0
    }

    /// Drain everything collected so far, in emission order.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patina_span::Span;
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_errors_only() {
        let handler = Handler::new();
        handler.emit(Diagnostic::new(Severity::Warning, "w", Span::new(0, 1)), "w");
        assert!(!handler.has_errors());
        handler.emit(Diagnostic::new(Severity::Error, "e", Span::new(0, 1)), "e");
        handler.emit(Diagnostic::new(Severity::Critical, "c", Span::new(0, 1)), "c");
        assert_eq!(handler.err_count(), 2);
        assert_eq!(handler.take().len(), 3);
        assert_eq!(handler.take().len(), 0);
        assert_eq!(handler.err_count(), 2);
    }
}
