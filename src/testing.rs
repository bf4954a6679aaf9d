//! Testing utilities for code built on `Either`, `Failable` and layered calls.
//!
//! This module provides assertion macros, a [`CallCounter`] for checking how
//! often layers and computations run, and property-based testing support.
//!
//! # Examples
//!
//! ## Assertion Macros
//!
//! ```rust
//! use eitherway::{assert_failed, assert_left, assert_right, Either, Failable, Failure};
//!
//! let ok: Either<String, i32> = Either::right(42);
//! assert_right!(ok, 42);
//!
//! let err: Either<String, i32> = Either::left("boom".to_string());
//! assert_left!(err);
//!
//! let failed: Failable<i32> = Failable::failure(Failure::msg("no value"));
//! assert_failed!(failed);
//! ```
//!
//! ## Counting Layers
//!
//! ```rust
//! use eitherway::testing::CallCounter;
//! use eitherway::Deferred;
//!
//! let counter = CallCounter::new();
//! let call = Deferred::with_layer(2, counter.layer());
//!
//! assert_eq!(call.execute(|v| v * 3), 6);
//! assert_eq!(counter.count(), 1);
//! ```

use std::cell::Cell;
use std::rc::Rc;

use crate::deferred::{layer, Layer};

/// Shared counter for observing how many times something runs.
///
/// Clones share the same count, so one clone can be moved into a closure
/// while the test keeps another.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    count: Rc<Cell<usize>>,
}

impl CallCounter {
    /// Create a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded calls.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Record one call.
    pub fn tick(&self) {
        self.count.set(self.count.get() + 1);
    }

    /// Reset the count to zero.
    pub fn reset(&self) {
        self.count.set(0);
    }

    /// A layer that records one call each time it is entered.
    pub fn layer<V: 'static, R: 'static>(&self) -> Layer<V, R> {
        let counter = self.clone();
        layer(move |next, value| {
            counter.tick();
            next(value)
        })
    }

    /// Wrap `f` so every call is recorded.
    pub fn wrap<A, B, F>(&self, mut f: F) -> impl FnMut(A) -> B
    where
        F: FnMut(A) -> B,
    {
        let counter = self.clone();
        move |arg| {
            counter.tick();
            f(arg)
        }
    }
}

/// Assert that an `Either` holds a left value, optionally equal to `expected`.
///
/// # Example
///
/// ```rust
/// use eitherway::{assert_left, Either};
///
/// let e: Either<&str, i32> = Either::left("error");
/// assert_left!(e);
/// assert_left!(e, "error");
/// ```
#[macro_export]
macro_rules! assert_left {
    ($either:expr) => {
        match &$either {
            $crate::Either::Left(_) => {}
            $crate::Either::Right(v) => {
                panic!("Expected Left, got Right: {:?}", v);
            }
        }
    };
    ($either:expr, $expected:expr) => {
        match &$either {
            $crate::Either::Left(v) => {
                assert_eq!(*v, $expected);
            }
            $crate::Either::Right(v) => {
                panic!("Expected Left({:?}), got Right: {:?}", $expected, v);
            }
        }
    };
}

/// Assert that an `Either` holds a right value, optionally equal to `expected`.
///
/// # Example
///
/// ```rust
/// use eitherway::{assert_right, Either};
///
/// let e: Either<String, i32> = Either::right(7);
/// assert_right!(e);
/// assert_right!(e, 7);
/// ```
#[macro_export]
macro_rules! assert_right {
    ($either:expr) => {
        match &$either {
            $crate::Either::Right(_) => {}
            $crate::Either::Left(v) => {
                panic!("Expected Right, got Left: {:?}", v);
            }
        }
    };
    ($either:expr, $expected:expr) => {
        match &$either {
            $crate::Either::Right(v) => {
                assert_eq!(*v, $expected);
            }
            $crate::Either::Left(v) => {
                panic!("Expected Right({:?}), got Left: {:?}", $expected, v);
            }
        }
    };
}

/// Assert that a `Failable` resolves to a failure, optionally with a cause of
/// type `$error`.
///
/// # Example
///
/// ```rust
/// use eitherway::{assert_failed, Failable};
///
/// let parsed = Failable::deferred(|| "x".parse::<i32>());
/// assert_failed!(parsed);
/// assert_failed!(parsed, std::num::ParseIntError);
/// ```
#[macro_export]
macro_rules! assert_failed {
    ($failable:expr) => {
        match $failable.exception() {
            Some(_) => {}
            None => {
                panic!("Expected failed Failable, got a value");
            }
        }
    };
    ($failable:expr, $error:ty) => {
        match $failable.exception() {
            Some(failure) => {
                assert!(
                    failure.is::<$error>(),
                    "Expected failure caused by {}, got: {}",
                    stringify!($error),
                    failure
                );
            }
            None => {
                panic!(
                    "Expected failure caused by {}, got a value",
                    stringify!($error)
                );
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<L, R> Arbitrary for crate::Either<L, R>
where
    L: Arbitrary + 'static,
    R: Arbitrary + 'static,
{
    type Parameters = (L::Parameters, R::Parameters);
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        let (l_params, r_params) = args;
        prop_oneof![
            any_with::<L>(l_params).prop_map(crate::Either::left),
            any_with::<R>(r_params).prop_map(crate::Either::right),
        ]
        .boxed()
    }
}
