//! The verification accumulator.
//!
//! A [`Verify`] records the first failed check and ignores every check after
//! it. Predicates registered after a failure are never invoked, so cheap
//! conditions should come before expensive ones:
//!
//! ```text
//! let mut verify = Verify::new();
//! verify
//!     .not_none(&customer, format_args!("customer can't be missing"))
//!     .that(age >= 21, format_args!("customer age should be 21 or higher, but is {age}"))
//!     .predicate(|| registry.has_license(id), format_args!("customer should have a license"));
//! verify.into_result()?;
//! ```
//!
//! Checks are inert data until a terminal query (`result`, `into_result`,
//! `panic_on_error`) consults them. Tracked verifiers that are dropped
//! without being consulted are reported by the reporter thread.

mod builder;

use std::fmt;

pub use builder::VerifyBuilder;

use crate::error::{ErrorFactory, InvalidHandle, VerificationError, INVALID_HANDLE_MESSAGE};
use crate::tracker::{self, CreationContext, Tracking, Unhandled};

/// Description of a verifier with no recorded failure.
const SUCCESS: &str = "verification success";

/// Prefix of every failure description and `panic_on_error` message.
const FAILURE_PREFIX: &str = "verification failure: ";

/// Mutable state of a constructed verifier.
struct State<E> {
    /// First failure; never overwritten once set.
    error: Option<E>,
    /// Set by terminal queries, cleared by every check.
    consulted: bool,
    tracking: Tracking,
    /// Present for tracked and strict verifiers until reported.
    context: Option<CreationContext>,
    factory: ErrorFactory<E>,
}

impl<E> State<E> {
    /// Reopen the consult obligation and return the state if checks still count.
    fn open(&mut self) -> Option<&mut Self> {
        self.consulted = false;
        if self.error.is_some() {
            None
        } else {
            Some(self)
        }
    }
}

enum Handle<E> {
    /// Never constructed through a tracking mode. Holds the sentinel error
    /// until a consuming query takes it.
    Invalid(Option<E>),
    Live(State<E>),
}

/// Short-circuiting accumulator of boolean verifications.
///
/// Check methods return `&mut Self` so several checks can be chained in one
/// expression; the chain is evaluated left to right.
pub struct Verify<E: fmt::Display = VerificationError> {
    handle: Handle<E>,
}

impl Verify {
    /// Create a tracked verifier (recommended).
    ///
    /// If it is dropped before its result is consulted, a diagnostic naming
    /// the creation site is written to the unhandled-verifications sink.
    #[track_caller]
    pub fn new() -> Self {
        VerifyBuilder::new().build()
    }

    /// Create a strict verifier.
    ///
    /// Like [`Verify::new`], but the process exits with status 1 after the
    /// diagnostic for an unconsulted drop has been written. Meant for
    /// offensive programming; use it wisely.
    #[track_caller]
    pub fn strict() -> Self {
        VerifyBuilder::new().tracking(Tracking::Strict).build()
    }

    /// Alias of [`Verify::strict`].
    #[track_caller]
    pub fn offensive() -> Self {
        Self::strict()
    }

    /// Create an untracked verifier that never reports.
    pub fn silent() -> Self {
        VerifyBuilder::new().tracking(Tracking::Silent).build()
    }

    /// Start configuring a verifier.
    pub fn builder() -> VerifyBuilder<VerificationError> {
        VerifyBuilder::new()
    }
}

impl<E: fmt::Display + From<InvalidHandle>> Verify<E> {
    /// Create an invalid handle.
    ///
    /// Every check is skipped, `result` returns the [`InvalidHandle`]
    /// sentinel, and `panic_on_error` panics with its message.
    pub fn invalid() -> Self {
        Verify {
            handle: Handle::Invalid(Some(E::from(InvalidHandle))),
        }
    }
}

/// The zero value is an invalid handle, so forgetting to construct a
/// verifier fails fast instead of silently passing.
impl<E: fmt::Display + From<InvalidHandle>> Default for Verify<E> {
    fn default() -> Self {
        Self::invalid()
    }
}

impl<E: fmt::Display> Verify<E> {
    pub(crate) fn from_parts(
        tracking: Tracking,
        context: Option<CreationContext>,
        factory: ErrorFactory<E>,
    ) -> Self {
        Verify {
            handle: Handle::Live(State {
                error: None,
                consulted: false,
                tracking,
                context,
                factory,
            }),
        }
    }

    fn open(&mut self) -> Option<&mut State<E>> {
        match &mut self.handle {
            Handle::Invalid(_) => None,
            Handle::Live(state) => state.open(),
        }
    }

    /// Record a failure built from `message` unless `condition` holds.
    pub fn that(&mut self, condition: bool, message: fmt::Arguments<'_>) -> &mut Self {
        if let Some(state) = self.open() {
            if !condition {
                state.error = Some((state.factory)(message));
            }
        }
        self
    }

    /// Like [`that`](Self::that), but evaluates `predicate` lazily.
    ///
    /// The predicate is not invoked at all once a previous check failed.
    pub fn predicate(
        &mut self,
        predicate: impl FnOnce() -> bool,
        message: fmt::Arguments<'_>,
    ) -> &mut Self {
        if let Some(state) = self.open() {
            if !predicate() {
                state.error = Some((state.factory)(message));
            }
        }
        self
    }

    /// Record `error` as-is unless `condition` holds.
    pub fn with_error(&mut self, condition: bool, error: E) -> &mut Self {
        if let Some(state) = self.open() {
            if !condition {
                state.error = Some(error);
            }
        }
        self
    }

    /// Record a failure built from `message` if `value` is `None`.
    pub fn not_none<T>(&mut self, value: &Option<T>, message: fmt::Arguments<'_>) -> &mut Self {
        self.that(value.is_some(), message)
    }

    /// Consume the verifier and return its outcome.
    pub fn into_result(mut self) -> Result<(), E> {
        let error = match &mut self.handle {
            Handle::Invalid(sentinel) => sentinel.take(),
            Handle::Live(state) => {
                state.consulted = true;
                state.error.take()
            }
        };
        error.map_or(Ok(()), Err)
    }

    /// Panic if a check failed.
    ///
    /// The panic message is `"verification failure: "` followed by the
    /// recorded error. On an invalid handle the message is the sentinel.
    pub fn panic_on_error(&mut self) {
        match &mut self.handle {
            Handle::Invalid(_) => panic!("{INVALID_HANDLE_MESSAGE}"),
            Handle::Live(state) => {
                state.consulted = true;
                if let Some(error) = &state.error {
                    panic!("{FAILURE_PREFIX}{error}");
                }
            }
        }
    }

    /// Human-readable status. Does not count as consulting the result.
    pub fn describe(&self) -> String {
        match &self.handle {
            Handle::Invalid(_) => format!("{FAILURE_PREFIX}{INVALID_HANDLE_MESSAGE}"),
            Handle::Live(state) => match &state.error {
                None => SUCCESS.to_string(),
                Some(error) => format!("{FAILURE_PREFIX}{error}"),
            },
        }
    }

    /// Whether a failure has been recorded. Does not consult the result.
    pub fn has_failed(&self) -> bool {
        match &self.handle {
            Handle::Invalid(_) => true,
            Handle::Live(state) => state.error.is_some(),
        }
    }

    /// Whether the result was consulted since the last check.
    ///
    /// Invalid handles carry no obligation and always count as consulted.
    pub fn is_consulted(&self) -> bool {
        match &self.handle {
            Handle::Invalid(_) => true,
            Handle::Live(state) => state.consulted,
        }
    }

    /// How this verifier reacts to an unconsulted drop.
    pub fn tracking(&self) -> Tracking {
        match &self.handle {
            Handle::Invalid(_) => Tracking::Silent,
            Handle::Live(state) => state.tracking,
        }
    }
}

impl<E: fmt::Display + Clone> Verify<E> {
    /// Return the recorded failure, marking the result as consulted.
    ///
    /// Idempotent: repeated calls return the same outcome.
    pub fn result(&mut self) -> Result<(), E> {
        match &mut self.handle {
            Handle::Invalid(sentinel) => sentinel.clone().map_or(Ok(()), Err),
            Handle::Live(state) => {
                state.consulted = true;
                state.error.clone().map_or(Ok(()), Err)
            }
        }
    }
}

impl<E: fmt::Display> fmt::Display for Verify<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl<E: fmt::Display> fmt::Debug for Verify<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verify")
            .field("status", &self.describe())
            .field("tracking", &self.tracking())
            .field("consulted", &self.is_consulted())
            .finish()
    }
}

impl<E: fmt::Display> Drop for Verify<E> {
    fn drop(&mut self) {
        if self.is_consulted() || !self.tracking().is_tracked() {
            return;
        }
        let description = self.describe();
        let Handle::Live(state) = &mut self.handle else {
            return;
        };
        let Some(context) = state.context.take() else {
            return;
        };
        tracker::submit(
            Unhandled {
                description,
                context,
            },
            state.tracking.terminates(),
        );
    }
}
