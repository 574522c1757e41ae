//! Defensive-programming verification accumulator.
//!
//! A [`Verify`] collects a sequence of boolean checks, keeps the first
//! failure, and skips everything after it (predicates included). The outcome
//! is retrieved with a terminal query:
//! - `result` / `into_result`: the first failure as an error value
//! - `panic_on_error`: escalates the failure to a panic
//!
//! # Unhandled Verifications
//!
//! Forgetting to consult a verification is a silent bug. Verifiers built with
//! [`Verify::new`] remember their creation site and, if dropped unconsulted,
//! write a diagnostic to a process-wide sink (stdout unless replaced with
//! [`set_unhandled_verifications_sink`]). [`Verify::strict`] also exits the
//! process after the diagnostic. [`Verify::silent`] opts out of tracking.
//!
//! ```text
//! fn sell_alcohol(person: &Person) -> Result<(), VerificationError> {
//!     let mut verify = Verify::new();
//!     verify_that!(verify, person.age >= 21, "customer age should be 21 or higher, but yours: {}", person.age);
//!     verify_that!(verify, person.has_license, "customer should have license");
//!     verify.into_result()
//! }
//! ```
//!
//! Detection runs on a background reporter thread and is best-effort; call
//! [`flush_unhandled_reports`] to wait for reports already queued.

mod error;
mod macros;
mod sink;
mod tracker;
mod verify;

pub use error::{ErrorFactory, InvalidHandle, VerificationError, INVALID_HANDLE_MESSAGE};
pub use sink::{
    buffer_sink, current_sink, set_unhandled_verifications_sink, stderr_sink, stdout_sink,
    writer_sink, BufferSink, SharedSink, Sink,
};
pub use tracker::{flush_unhandled_reports, Tracking};
pub use verify::{Verify, VerifyBuilder};
