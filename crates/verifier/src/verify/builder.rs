//! Configuration for constructing a [`Verify`].

use std::fmt;
use std::panic::Location;

use crate::error::{ErrorFactory, VerificationError};
use crate::tracker::{CreationContext, Tracking, DEFAULT_MAX_FRAMES};

use super::Verify;

/// Builder for verifiers with a custom tracking mode or error type.
///
/// # Example
///
/// ```text
/// let mut verify = Verify::builder()
///     .tracking(Tracking::Strict)
///     .error_factory(OrderError::from_args)
///     .build();
/// ```
pub struct VerifyBuilder<E> {
    tracking: Tracking,
    factory: ErrorFactory<E>,
    max_frames: usize,
}

impl VerifyBuilder<VerificationError> {
    /// Tracked verifier producing [`VerificationError`]s.
    pub fn new() -> Self {
        VerifyBuilder {
            tracking: Tracking::Tracked,
            factory: VerificationError::from_args,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

impl Default for VerifyBuilder<VerificationError> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> VerifyBuilder<E> {
    /// Set how an unconsulted drop is handled.
    #[must_use]
    pub fn tracking(mut self, tracking: Tracking) -> Self {
        self.tracking = tracking;
        self
    }

    /// Limit the number of frames rendered for the creation site.
    #[must_use]
    pub fn max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Replace the function that turns a failed check's message into an error.
    ///
    /// Errors passed to [`Verify::with_error`] are stored as-is and never go
    /// through the factory.
    #[must_use]
    pub fn error_factory<F>(self, factory: ErrorFactory<F>) -> VerifyBuilder<F> {
        VerifyBuilder {
            tracking: self.tracking,
            factory,
            max_frames: self.max_frames,
        }
    }

    /// Construct the verifier, capturing the call site if it is tracked.
    #[track_caller]
    pub fn build(self) -> Verify<E>
    where
        E: fmt::Display,
    {
        let location = Location::caller();
        let context = self
            .tracking
            .is_tracked()
            .then(|| CreationContext::capture(location, self.max_frames));
        Verify::from_parts(self.tracking, context, self.factory)
    }
}
