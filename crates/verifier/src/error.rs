//! Error taxonomy for verifications.
//!
//! A failed check stores an error of the accumulator's error type `E`.
//! The default is [`VerificationError`], built from the check's format
//! arguments by the default [`ErrorFactory`].

use std::fmt;

use thiserror::Error;

/// Message carried by every error that reports an invalid verifier handle.
pub const INVALID_HANDLE_MESSAGE: &str = "verifier instance is invalid";

/// Builds the error recorded by a failed check from its format arguments.
///
/// The arguments are only formatted when the check actually fails.
pub type ErrorFactory<E> = fn(fmt::Arguments<'_>) -> E;

/// Default error type recorded by a failed verification.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VerificationError {
    /// A caller-supplied condition evaluated to `false`.
    #[error("{0}")]
    Failed(String),

    /// The verifier was never constructed through a tracking mode.
    #[error("{}", INVALID_HANDLE_MESSAGE)]
    InvalidHandle,
}

impl VerificationError {
    /// Default [`ErrorFactory`]: formats the arguments into a `Failed` error.
    pub fn from_args(args: fmt::Arguments<'_>) -> Self {
        VerificationError::Failed(args.to_string())
    }

    /// The message this error displays.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Sentinel raised by operations on an invalid verifier handle.
///
/// Custom error types used with [`Verify::invalid`](crate::Verify::invalid)
/// must be constructible from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Error)]
#[error("{}", INVALID_HANDLE_MESSAGE)]
pub struct InvalidHandle;

impl From<InvalidHandle> for VerificationError {
    fn from(_: InvalidHandle) -> Self {
        VerificationError::InvalidHandle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_args_formats_message() {
        let err = VerificationError::from_args(format_args!("age {} is below {}", 17, 21));
        assert_eq!(err, VerificationError::Failed("age 17 is below 21".to_string()));
        assert_eq!(err.to_string(), "age 17 is below 21");
    }

    #[test]
    fn invalid_handle_displays_sentinel() {
        assert_eq!(InvalidHandle.to_string(), INVALID_HANDLE_MESSAGE);
        assert_eq!(
            VerificationError::from(InvalidHandle).message(),
            INVALID_HANDLE_MESSAGE
        );
    }
}
