//! Iterator extension traits for the combinators.
//!
//! Each method forwards to the free function of the same name in
//! [`crate::combinators`], so pipelines read left to right:
//!
//! ```rust
//! use eitherway::prelude::*;
//! use std::num::ParseIntError;
//!
//! let mut rejected = Vec::new();
//! let total: i32 = ["4", "x", "6"]
//!     .into_iter()
//!     .try_each(|s| s.parse::<i32>())
//!     .when_is(|e: &ParseIntError| rejected.push(e.to_string()))
//!     .filter_map(Either::into_right)
//!     .sum();
//!
//! assert_eq!(total, 10);
//! assert_eq!(rejected, vec!["invalid digit found in string"]);
//! ```

use std::error::Error as StdError;

use crate::combinators;
use crate::deferred::{Deferred, Layer};
use crate::dispatch::Dispatch;
use crate::either::Either;
use crate::failure::Failure;

/// Combinators available on every iterator.
pub trait IteratorExt: Iterator + Sized {
    /// See [`combinators::try_each`].
    fn try_each<R, X, F>(self, f: F) -> impl Iterator<Item = Either<Failure, R>>
    where
        F: FnMut(Self::Item) -> Result<R, X>,
        X: Into<Failure>,
    {
        combinators::try_each(self, f)
    }

    /// See [`combinators::try_each_as`].
    fn try_each_as<E, R, X, F>(self, f: F) -> impl Iterator<Item = Result<Either<Failure, R>, Failure>>
    where
        E: StdError + Send + Sync + 'static,
        F: FnMut(Self::Item) -> Result<R, X>,
        X: Into<Failure>,
    {
        combinators::try_each_as::<E, Self, R, X, F>(self, f)
    }

    /// See [`combinators::with_layer`].
    fn with_layer<R>(self, layer: Layer<Self::Item, R>) -> impl Iterator<Item = Deferred<Self::Item, R>> {
        combinators::with_layer(self, layer)
    }

    /// See [`combinators::with_layers`].
    fn with_layers<R, Ls>(self, layers: Ls) -> impl Iterator<Item = Deferred<Self::Item, R>>
    where
        Ls: IntoIterator<Item = Layer<Self::Item, R>>,
    {
        combinators::with_layers(self, layers)
    }

    /// See [`combinators::when_is`].
    fn when_is<T, F>(self, f: F) -> impl Iterator<Item = Self::Item>
    where
        T: 'static,
        Self::Item: Dispatch,
        F: FnMut(&T),
    {
        combinators::when_is(self, f)
    }
}

impl<I: Iterator> IteratorExt for I {}

/// Combinators for iterators of [`Either`] values.
pub trait EitherIterExt<L, R>: Iterator<Item = Either<L, R>> + Sized {
    /// See [`combinators::when_left`].
    fn when_left<F>(self, f: F) -> impl Iterator<Item = Either<L, R>>
    where
        F: FnMut(&L),
    {
        combinators::when_left(self, f)
    }

    /// See [`combinators::when_right`].
    fn when_right<F>(self, f: F) -> impl Iterator<Item = Either<L, R>>
    where
        F: FnMut(&R),
    {
        combinators::when_right(self, f)
    }

    /// See [`either::partition`](crate::either::partition).
    fn partition_either(self) -> (Vec<L>, Vec<R>) {
        crate::either::partition(self)
    }
}

impl<I, L, R> EitherIterExt<L, R> for I where I: Iterator<Item = Either<L, R>> {}

/// Combinators for iterators of [`Deferred`] calls.
pub trait DeferredIterExt<V, R>: Iterator<Item = Deferred<V, R>> + Sized {
    /// See [`combinators::add_layer`].
    fn add_layer(self, layer: Layer<V, R>) -> impl Iterator<Item = Deferred<V, R>> {
        combinators::add_layer(self, layer)
    }

    /// See [`combinators::add_layers`].
    fn add_layers<Ls>(self, layers: Ls) -> impl Iterator<Item = Deferred<V, R>>
    where
        Ls: IntoIterator<Item = Layer<V, R>>,
    {
        combinators::add_layers(self, layers)
    }
}

impl<I, V, R> DeferredIterExt<V, R> for I where I: Iterator<Item = Deferred<V, R>> {}

/// Execution of [`Deferred`] calls whose result is a `Result`.
pub trait TryDeferredIterExt<V, T, X>: Iterator<Item = Deferred<V, Result<T, X>>> + Sized {
    /// See [`combinators::try_deferred`].
    fn try_deferred<F>(self, f: F) -> impl Iterator<Item = Either<Failure, T>>
    where
        F: FnMut(V) -> Result<T, X>,
        X: Into<Failure>,
    {
        combinators::try_deferred(self, f)
    }
}

impl<I, V, T, X> TryDeferredIterExt<V, T, X> for I where I: Iterator<Item = Deferred<V, Result<T, X>>> {}
