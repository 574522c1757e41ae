//! Format-string shorthands for checks.

/// Check a condition with a `format!`-style message.
///
/// `verify_that!(v, cond, "fmt", args..)` expands to
/// `v.that(cond, format_args!("fmt", args..))`; the message is only
/// formatted if the check fails.
#[macro_export]
macro_rules! verify_that {
    ($verify:expr, $condition:expr, $($message:tt)+) => {
        $verify.that($condition, ::core::format_args!($($message)+))
    };
}

/// Check a lazily evaluated predicate with a `format!`-style message.
///
/// The predicate is skipped if an earlier check already failed.
#[macro_export]
macro_rules! verify_predicate {
    ($verify:expr, $predicate:expr, $($message:tt)+) => {
        $verify.predicate($predicate, ::core::format_args!($($message)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::{VerificationError, Verify};
    use pretty_assertions::assert_eq;

    #[test]
    fn verify_that_formats_on_failure() {
        let mut verify = Verify::silent();
        let age = 17;
        verify_that!(verify, age >= 21, "age should be 21 or higher, but is {}", age);
        assert_eq!(
            verify.into_result(),
            Err(VerificationError::Failed(
                "age should be 21 or higher, but is 17".to_string()
            ))
        );
    }

    #[test]
    fn verify_predicate_skips_after_failure() {
        let mut verify = Verify::silent();
        let mut calls = 0;
        verify_that!(verify, false, "first");
        verify_predicate!(
            verify,
            || {
                calls += 1;
                true
            },
            "second"
        );
        assert_eq!(calls, 0);
        assert_eq!(
            verify.into_result(),
            Err(VerificationError::Failed("first".to_string()))
        );
    }
}
