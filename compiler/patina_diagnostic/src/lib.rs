//! Diagnostic reporting for the Patina front end.
//!
//! Diagnostics are data first: the [`Handler`] collects them and counts
//! errors, [`ParseSession::render`] turns one into the familiar
//! caret-underlined display, and every emission goes out as a single
//! `tracing` event carrying the rendered excerpt, so a subscriber sees
//! problems as they happen.
//!
//! Severities `Info`, `Warning` and `Error` are recoverable; `Critical`
//! means the front end cannot continue and surfaces as a [`FatalError`]
//! propagated with `?` through [`PResult`].

mod diagnostic;
mod handler;
mod session;

pub use diagnostic::{Diagnostic, FatalError, PResult, Severity};
pub use handler::Handler;
pub use session::ParseSession;
