use std::fmt;

use patina_span::Span;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Info,
    Warning,
    Error,
    /// Unrecoverable; emitting one aborts the current parse.
    Critical,
}

impl Severity {
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error | Severity::Critical)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Critical => write!(f, "error"),
        }
    }
}

/// One reported problem: what went wrong and where.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            span,
        }
    }
}

/// Marker for an unrecoverable front-end failure. The diagnostic itself has
/// already been emitted by the time one of these is returned.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct FatalError;

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fatal error")
    }
}

impl std::error::Error for FatalError {}

/// Result of a parsing operation. `Err` means a critical diagnostic was
/// emitted and the caller should unwind to the entry point.
pub type PResult<T> = Result<T, FatalError>;
