//! Unhandled-verification detection.
//!
//! A tracked verifier remembers where it was created. If it is dropped
//! before any terminal query (`result`, `into_result`, `panic_on_error`)
//! consulted it, a diagnostic is written to the process-wide sink:
//!
//! ```text
//! [ERROR] found unhandled verification: verification failure: <message>
//! verification was created here:
//! <function>
//! \t<file>:<line>
//! ```
//!
//! Detection is best-effort and runs on a background reporter thread, so it
//! is never a substitute for consulting the result. Strict verifiers also
//! terminate the process once the diagnostic is written.

mod context;
mod reporter;

pub use reporter::flush_unhandled_reports;

pub(crate) use context::{CreationContext, DEFAULT_MAX_FRAMES};
pub(crate) use reporter::{submit, Unhandled};

/// How a verifier reacts to being dropped unconsulted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tracking {
    /// Never reports.
    Silent,
    /// Writes a diagnostic to the sink.
    #[default]
    Tracked,
    /// Writes a diagnostic, then exits the process with status 1.
    Strict,
}

impl Tracking {
    /// Whether a creation context is captured and drops are checked.
    pub fn is_tracked(self) -> bool {
        !matches!(self, Tracking::Silent)
    }

    /// Whether an unconsulted drop terminates the process.
    pub fn terminates(self) -> bool {
        matches!(self, Tracking::Strict)
    }
}

/// Build the diagnostic text for an unconsulted verifier.
pub(crate) fn format_report(description: &str, rendered_context: &str) -> String {
    format!(
        "[ERROR] found unhandled verification: {description}\n\
         verification was created here:\n\
         {rendered_context}"
    )
}

#[cfg(test)]
mod tests;
