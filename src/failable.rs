//! Deferred computations that keep their failure as a value.
//!
//! A [`Failable<T>`] either holds a value or failure right away, or holds a
//! computation that has not run yet. The computation runs the first time the
//! `Failable` is observed through [`Failable::value`], [`Failable::failed`] or
//! [`Failable::exception`]. Its outcome is cached, so later observations never
//! run it again.
//!
//! # Examples
//!
//! ```rust
//! use eitherway::{Failable, Failure};
//!
//! fn divide(a: i32, b: i32) -> Failable<i32> {
//!     Failable::deferred(move || a.checked_div(b).ok_or_else(|| Failure::msg("division by zero")))
//! }
//!
//! let results: Vec<String> = (1..=4)
//!     .map(|n| divide(100, n - 2))
//!     .map(|x| match x.value() {
//!         Ok(v) => format!("result is {}", v),
//!         Err(_) => "result is undefined".to_string(),
//!     })
//!     .collect();
//!
//! assert_eq!(results, vec!["result is -100", "result is undefined", "result is 100", "result is 50"]);
//! ```
//!
//! # Threading
//!
//! `Failable` resolves through interior mutability without locking and is
//! therefore `!Sync`: a value that has not been resolved yet cannot be
//! observed from two threads at once.

use std::cell::{Cell, OnceCell};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::either::Either;
use crate::error::FailedValueAccess;
use crate::failure::{Failure, Panicked};

type Thunk<T> = Box<dyn FnOnce() -> Result<T, Failure>>;

/// A value, a failure, or a computation that produces one of the two.
pub struct Failable<T> {
    pending: Cell<Option<Thunk<T>>>,
    outcome: OnceCell<Result<T, Failure>>,
}

impl<T> Failable<T> {
    /// A `Failable` that already holds `value`.
    pub fn new(value: T) -> Self {
        Self::resolved(Ok(value))
    }

    /// A `Failable` that already holds a failure.
    pub fn failure(failure: impl Into<Failure>) -> Self {
        Self::resolved(Err(failure.into()))
    }

    /// A `Failable` whose value comes from `thunk`, run on first observation.
    ///
    /// ```rust
    /// use eitherway::Failable;
    /// use std::num::ParseIntError;
    ///
    /// let parsed = Failable::deferred(|| "12".parse::<i32>());
    /// assert!(!parsed.is_resolved());
    /// assert_eq!(parsed.value().ok(), Some(&12));
    /// assert!(parsed.is_resolved());
    ///
    /// let broken = Failable::deferred(|| "twelve".parse::<i32>());
    /// assert!(broken.failed());
    /// assert!(broken.exception().is_some_and(|f| f.is::<ParseIntError>()));
    /// ```
    pub fn deferred<F, X>(compute: F) -> Self
    where
        F: FnOnce() -> Result<T, X> + 'static,
        X: Into<Failure>,
    {
        let thunk: Thunk<T> = Box::new(move || compute().map_err(Into::<Failure>::into));
        Self {
            pending: Cell::new(Some(thunk)),
            outcome: OnceCell::new(),
        }
    }

    /// Like [`Failable::deferred`], for a computation that signals failure by
    /// panicking.
    ///
    /// A panic is captured as a [`Panicked`] failure. The panic hook still
    /// runs, so the message is printed as usual.
    pub fn catching<F>(thunk: F) -> Self
    where
        F: FnOnce() -> T + 'static,
    {
        Self::deferred(move || {
            panic::catch_unwind(AssertUnwindSafe(thunk)).map_err(|payload| {
                let panicked = Panicked::from_payload(payload);
                #[cfg(feature = "tracing")]
                tracing::warn!("captured panic in deferred computation: {}", panicked.message());
                panicked
            })
        })
    }

    fn resolved(outcome: Result<T, Failure>) -> Self {
        Self {
            pending: Cell::new(None),
            outcome: OnceCell::from(outcome),
        }
    }

    fn resolve(&self) -> &Result<T, Failure> {
        self.outcome
            .get_or_init(|| run_pending(self.pending.take()))
    }

    /// Returns `true` once the outcome is known. Does not run the computation.
    pub fn is_resolved(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// The value, running the computation if needed.
    ///
    /// # Errors
    ///
    /// Returns [`FailedValueAccess`], carrying the captured failure, if the
    /// computation failed.
    pub fn value(&self) -> Result<&T, FailedValueAccess> {
        self.resolve()
            .as_ref()
            .map_err(|failure| FailedValueAccess::new(failure.clone()))
    }

    /// Returns `true` if the computation failed, running it if needed.
    pub fn failed(&self) -> bool {
        self.resolve().is_err()
    }

    /// The captured failure, running the computation if needed.
    pub fn exception(&self) -> Option<&Failure> {
        self.resolve().as_ref().err()
    }

    /// Consume into a `Result`, running the computation if needed.
    pub fn into_result(self) -> Result<T, Failure> {
        match self.outcome.into_inner() {
            Some(outcome) => outcome,
            None => run_pending(self.pending.into_inner()),
        }
    }

    /// Consume into the value.
    ///
    /// # Errors
    ///
    /// Returns [`FailedValueAccess`] if the computation failed.
    pub fn into_value(self) -> Result<T, FailedValueAccess> {
        self.into_result().map_err(FailedValueAccess::new)
    }

    /// Resolve and split by outcome: `Left` holds a resolved `Failable` with
    /// the value, `Right` holds the failure.
    ///
    /// ```rust
    /// use eitherway::{Failable, Failure};
    ///
    /// let ok = Failable::new(5).into_either();
    /// assert_eq!(ok.left_ref().ok().and_then(|f| f.value().ok()), Some(&5));
    ///
    /// let failed = Failable::<i32>::failure(Failure::msg("no")).into_either();
    /// assert!(failed.is_right());
    /// ```
    pub fn into_either(self) -> Either<Failable<T>, Failure> {
        match self.into_result() {
            Ok(value) => Either::Left(Failable::new(value)),
            Err(failure) => Either::Right(failure),
        }
    }

    /// Transform the value without running the computation now.
    ///
    /// ```rust
    /// use eitherway::Failable;
    ///
    /// let doubled = Failable::deferred(|| "21".parse::<i32>()).map(|n| n * 2);
    /// assert!(!doubled.is_resolved());
    /// assert_eq!(doubled.into_value().ok(), Some(42));
    /// ```
    pub fn map<U, F>(self, f: F) -> Failable<U>
    where
        T: 'static,
        F: FnOnce(T) -> U + 'static,
    {
        Failable::deferred(move || self.into_result().map(f))
    }
}

fn run_pending<T>(pending: Option<Thunk<T>>) -> Result<T, Failure> {
    // A missing thunk means an earlier resolution unwound out of it.
    let Some(thunk) = pending else {
        return Err(Failure::msg("deferred computation did not complete"));
    };
    let outcome = thunk();
    #[cfg(feature = "tracing")]
    if let Err(failure) = &outcome {
        tracing::debug!("deferred computation failed: {:#}", failure);
    }
    outcome
}

impl<T> From<T> for Failable<T> {
    fn from(value: T) -> Self {
        Failable::new(value)
    }
}

impl<T> From<Failable<T>> for Either<Failable<T>, Failure> {
    fn from(failable: Failable<T>) -> Self {
        failable.into_either()
    }
}

impl<T: fmt::Debug> fmt::Debug for Failable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.outcome.get() {
            Some(Ok(value)) => f.debug_tuple("Failable::Value").field(value).finish(),
            Some(Err(failure)) => f.debug_tuple("Failable::Failed").field(failure).finish(),
            None => f.write_str("Failable::Pending"),
        }
    }
}
