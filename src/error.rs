//! Error types raised by the narrowing accessors.

use std::error::Error as StdError;
use std::fmt;

use crate::either::Side;
use crate::failure::Failure;

/// Returned when an [`Either`](crate::Either) is narrowed to the case it does
/// not hold.
///
/// # Examples
///
/// ```rust
/// use eitherway::{CaseAbsent, Either, Side};
///
/// let either: Either<i32, &str> = Either::right("hello");
/// let err = either.try_left().unwrap_err();
///
/// assert_eq!(err, CaseAbsent::new(Side::Left, Side::Right));
/// assert_eq!(err.to_string(), "expected a Left value but the Either holds Right");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseAbsent {
    /// The case the caller asked for.
    pub expected: Side,
    /// The case the value actually holds.
    pub found: Side,
}

impl CaseAbsent {
    /// Create a new `CaseAbsent` error.
    pub fn new(expected: Side, found: Side) -> Self {
        Self { expected, found }
    }
}

impl fmt::Display for CaseAbsent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected a {} value but the Either holds {}",
            self.expected, self.found
        )
    }
}

impl StdError for CaseAbsent {}

/// Returned when reading the value of a [`Failable`](crate::Failable) whose
/// computation failed.
///
/// The captured failure is available through [`FailedValueAccess::cause`] and
/// as the error's `source()`.
///
/// # Examples
///
/// ```rust
/// use eitherway::{Failable, Failure};
/// use std::error::Error;
///
/// let failable = Failable::<i32>::failure(Failure::msg("no connection"));
/// let err = failable.value().unwrap_err();
///
/// assert_eq!(err.cause().to_string(), "no connection");
/// assert_eq!(err.source().map(|e| e.to_string()), Some("no connection".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedValueAccess {
    cause: Failure,
}

impl FailedValueAccess {
    /// Create a new `FailedValueAccess` wrapping the captured failure.
    pub fn new(cause: Failure) -> Self {
        Self { cause }
    }

    /// The failure captured during resolution.
    pub fn cause(&self) -> &Failure {
        &self.cause
    }

    /// Extract the captured failure.
    pub fn into_cause(self) -> Failure {
        self.cause
    }
}

impl fmt::Display for FailedValueAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            "trying to access failed value - test whether the value has failed before accessing it",
        )
    }
}

impl StdError for FailedValueAccess {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.cause.as_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_absent_display() {
        let err = CaseAbsent::new(Side::Right, Side::Left);
        assert_eq!(
            err.to_string(),
            "expected a Right value but the Either holds Left"
        );
    }

    #[test]
    fn test_failed_value_access_keeps_cause_identity() {
        let cause = Failure::msg("timeout");
        let err = FailedValueAccess::new(cause.clone());

        assert!(err.cause().ptr_eq(&cause));
        assert!(err.into_cause().ptr_eq(&cause));
    }

    #[test]
    fn test_failed_value_access_converts_into_failure() {
        let err = FailedValueAccess::new(Failure::msg("timeout"));
        let failure: Failure = err.into();

        assert!(failure.is::<FailedValueAccess>());
        assert_eq!(failure.root_cause().to_string(), "timeout");
    }
}
