//! # Eitherway
//!
//! Two-case values and lazily evaluated failable computations.
//!
//! ## Overview
//!
//! - [`Either<L, R>`] holds exactly one of two values. By convention `Left`
//!   carries an error and `Right` a success.
//! - [`Failable<T>`] runs a computation at most once, on first inspection,
//!   and remembers either the value or the [`Failure`] it produced.
//! - [`Deferred<V, R>`] binds an argument to an ordered list of observer
//!   layers that wrap the function finally applied to it.
//! - The [`combinators`] turn iterators of plain values into iterators of
//!   `Either` results, and run type-directed side effects over them.
//!
//! ## Quick Example
//!
//! ```rust
//! use eitherway::prelude::*;
//! use std::fmt;
//!
//! #[derive(Debug)]
//! struct DivisionByZero;
//!
//! impl fmt::Display for DivisionByZero {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str("division by zero")
//!     }
//! }
//!
//! impl std::error::Error for DivisionByZero {}
//!
//! fn divide(n: i32) -> Result<i32, DivisionByZero> {
//!     if n == 2 {
//!         Err(DivisionByZero)
//!     } else {
//!         Ok(100 / (n - 2))
//!     }
//! }
//!
//! let mut errors = 0;
//! let results: Vec<Either<Failure, i32>> = (1..=6)
//!     .try_each(divide)
//!     .when_is(|_: &DivisionByZero| errors += 1)
//!     .collect();
//!
//! assert_eq!(errors, 1);
//! assert_eq!(results[0], Either::right(-100));
//! assert!(results[1].is_left());
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod combinators;
pub mod deferred;
pub mod dispatch;
pub mod either;
pub mod error;
pub mod ext;
pub mod failable;
pub mod failure;
pub mod testing;

// Re-exports
pub use deferred::{Deferred, Layer};
pub use dispatch::Dispatch;
pub use either::{Either, Side};
pub use error::{CaseAbsent, FailedValueAccess};
pub use failable::Failable;
pub use failure::{Failure, Panicked};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::deferred::{layer, observe, Deferred, Layer};
    pub use crate::dispatch::Dispatch;
    pub use crate::either::{Either, Side};
    pub use crate::error::{CaseAbsent, FailedValueAccess};
    pub use crate::ext::{DeferredIterExt, EitherIterExt, IteratorExt, TryDeferredIterExt};
    pub use crate::failable::Failable;
    pub use crate::failure::Failure;
}
