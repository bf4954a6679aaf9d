//! A tagged union holding exactly one of two values.
//!
//! `Either<L, R>` is a plain enum: the case is fixed when the value is built
//! and every accessor is a pattern match. There is no third "neither" state,
//! and a value of an unrelated type cannot be turned into an `Either` at all.
//!
//! # Construction
//!
//! Use [`Either::left`] and [`Either::right`]. The case never depends on the
//! payload, so `Option` payloads are unambiguous:
//!
//! ```rust
//! use eitherway::Either;
//!
//! let missing_name: Either<Option<String>, Option<u32>> = Either::left(None);
//! assert!(missing_name.is_left());
//! ```
//!
//! # Narrowing
//!
//! [`Either::try_left`] and [`Either::try_right`] return a [`CaseAbsent`]
//! error instead of panicking, so callers can branch on the result:
//!
//! ```rust
//! use eitherway::Either;
//!
//! let parsed: Either<String, i32> = Either::right(42);
//! assert_eq!(parsed.clone().try_right(), Ok(42));
//! assert!(parsed.try_left().is_err());
//! ```
//!
//! # Dispatching on type
//!
//! [`Either::when_is`] runs a handler when the active value has the requested
//! type and hands the `Either` back unchanged. A [`Failure`](crate::Failure)
//! also matches the concrete error it captured:
//!
//! ```rust
//! use eitherway::{Either, Failure};
//! use std::num::ParseIntError;
//!
//! let parsed: Either<Failure, i32> = match "x".parse::<i32>() {
//!     Ok(n) => Either::right(n),
//!     Err(e) => Either::left(e.into()),
//! };
//!
//! let mut seen = Vec::new();
//! let parsed = parsed
//!     .when_is(|e: &ParseIntError| seen.push(e.to_string()))
//!     .when_is(|n: &i32| seen.push(n.to_string()));
//!
//! assert!(parsed.is_left());
//! assert_eq!(seen, vec!["invalid digit found in string"]);
//! ```

use std::any::{Any, TypeId};
use std::fmt;

use crate::dispatch;
use crate::error::CaseAbsent;

/// Which case of an [`Either`] is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The `Left` case.
    Left,
    /// The `Right` case.
    Right,
}

impl Side {
    /// The opposite side.
    pub fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("Left"),
            Side::Right => f.write_str("Right"),
        }
    }
}

/// A value that is either `Left(L)` or `Right(R)`.
///
/// Equality, ordering and hashing are derived: two values are equal when
/// they hold the same case and equal payloads. Payloads whose equality is
/// identity (such as [`Failure`](crate::Failure) or `Arc` compared with
/// `Arc::ptr_eq`) therefore keep that meaning through the `Either`.
///
/// When the `Left` case carries the failure of a computation (as produced by
/// [`try_each`](crate::combinators::try_each)), `Right` is the successful
/// result; methods like [`Either::map`] follow that convention and act on
/// `Right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The left value.
    Left(L),
    /// The right value.
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Create a `Left` value.
    #[inline]
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    /// Create a `Right` value.
    #[inline]
    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// The active case.
    #[inline]
    pub fn side(&self) -> Side {
        match self {
            Either::Left(_) => Side::Left,
            Either::Right(_) => Side::Right,
        }
    }

    /// Narrow to the `Left` value.
    ///
    /// # Errors
    ///
    /// Returns [`CaseAbsent`] if the value is `Right`.
    pub fn try_left(self) -> Result<L, CaseAbsent> {
        match self {
            Either::Left(l) => Ok(l),
            Either::Right(_) => Err(CaseAbsent::new(Side::Left, Side::Right)),
        }
    }

    /// Narrow to the `Right` value.
    ///
    /// # Errors
    ///
    /// Returns [`CaseAbsent`] if the value is `Left`.
    pub fn try_right(self) -> Result<R, CaseAbsent> {
        match self {
            Either::Left(_) => Err(CaseAbsent::new(Side::Right, Side::Left)),
            Either::Right(r) => Ok(r),
        }
    }

    /// Borrow the `Left` value, failing with [`CaseAbsent`] on `Right`.
    pub fn left_ref(&self) -> Result<&L, CaseAbsent> {
        self.as_ref().try_left()
    }

    /// Borrow the `Right` value, failing with [`CaseAbsent`] on `Left`.
    pub fn right_ref(&self) -> Result<&R, CaseAbsent> {
        self.as_ref().try_right()
    }

    /// Convert into `Option<L>`, discarding a `Right` value.
    #[inline]
    pub fn into_left(self) -> Option<L> {
        self.try_left().ok()
    }

    /// Convert into `Option<R>`, discarding a `Left` value.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        self.try_right().ok()
    }

    /// Convert from `&Either<L, R>` to `Either<&L, &R>`.
    #[inline]
    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Move the value to the opposite case.
    ///
    /// The payload is moved, not rebuilt, so `Left(x)` in `Either<L, R>`
    /// becomes `Right(x)` in `Either<R, L>` with `x` untouched.
    ///
    /// ```rust
    /// use eitherway::Either;
    /// use std::sync::Arc;
    ///
    /// let shared = Arc::new(String::from("token"));
    /// let swapped: Either<i32, Arc<String>> = Either::<Arc<String>, i32>::left(Arc::clone(&shared)).swap();
    ///
    /// assert!(Arc::ptr_eq(&swapped.try_right().unwrap(), &shared));
    /// ```
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Either::Left(l) => Either::Right(l),
            Either::Right(r) => Either::Left(r),
        }
    }

    /// Compare with an `Either` whose type parameters are swapped.
    ///
    /// `Left(x)` in `Either<L, R>` equals `Right(y)` in `Either<R, L>` when
    /// `x == y`, and symmetrically for `Right`.
    ///
    /// ```rust
    /// use eitherway::Either;
    ///
    /// let a: Either<i32, &str> = Either::left(7);
    /// let b: Either<&str, i32> = Either::right(7);
    /// assert!(a.eq_swapped(&b));
    /// assert!(!a.eq_swapped(&Either::left("7")));
    /// ```
    pub fn eq_swapped(&self, other: &Either<R, L>) -> bool
    where
        L: PartialEq,
        R: PartialEq,
    {
        match (self, other) {
            (Either::Left(a), Either::Right(b)) => a == b,
            (Either::Right(a), Either::Left(b)) => a == b,
            _ => false,
        }
    }

    /// Run `f` on the `Left` value, if any, and return `self` unchanged.
    pub fn when_left<F>(self, f: F) -> Self
    where
        F: FnOnce(&L),
    {
        if let Either::Left(l) = &self {
            f(l);
        }
        self
    }

    /// Run `f` on the `Right` value, if any, and return `self` unchanged.
    pub fn when_right<F>(self, f: F) -> Self
    where
        F: FnOnce(&R),
    {
        if let Either::Right(r) = &self {
            f(r);
        }
        self
    }

    /// Apply `f` to the `Left` value, leaving `Right` untouched.
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Apply `f` to the `Right` value, leaving `Left` untouched.
    #[inline]
    pub fn map_right<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Alias for [`Either::map_right`].
    #[inline]
    pub fn map<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        self.map_right(f)
    }

    /// Map both cases at once.
    #[inline]
    pub fn bimap<L2, R2, F, G>(self, f: F, g: G) -> Either<L2, R2>
    where
        F: FnOnce(L) -> L2,
        G: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(g(r)),
        }
    }

    /// Collapse both cases into one value.
    #[inline]
    pub fn fold<T, F, G>(self, left_fn: F, right_fn: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => left_fn(l),
            Either::Right(r) => right_fn(r),
        }
    }

    /// Chain a computation on the `Right` value.
    #[inline]
    pub fn and_then<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> Either<L, R2>,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => f(r),
        }
    }

    /// Chain a computation on the `Left` value.
    #[inline]
    pub fn or_else<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> Either<L2, R>,
    {
        match self {
            Either::Left(l) => f(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// The `Left` value, or `default`.
    #[inline]
    pub fn left_or(self, default: L) -> L {
        self.into_left().unwrap_or(default)
    }

    /// The `Right` value, or `default`.
    #[inline]
    pub fn right_or(self, default: R) -> R {
        self.into_right().unwrap_or(default)
    }

    /// The `Left` value.
    ///
    /// # Panics
    ///
    /// Panics if the value is `Right`. Prefer [`Either::try_left`].
    #[inline]
    pub fn unwrap_left(self) -> L {
        match self {
            Either::Left(l) => l,
            Either::Right(_) => panic!("called `Either::unwrap_left()` on a `Right` value"),
        }
    }

    /// The `Right` value.
    ///
    /// # Panics
    ///
    /// Panics if the value is `Left`. Prefer [`Either::try_right`].
    #[inline]
    pub fn unwrap_right(self) -> R {
        match self {
            Either::Left(_) => panic!("called `Either::unwrap_right()` on a `Left` value"),
            Either::Right(r) => r,
        }
    }

    /// Convert to `Result`, with `Right` as `Ok`.
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }

    /// Convert from `Result`, with `Ok` as `Right`.
    #[inline]
    pub fn from_result(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }
}

impl<L: 'static, R: 'static> Either<L, R> {
    /// The active value as `&dyn Any`.
    pub fn value(&self) -> &dyn Any {
        match self {
            Either::Left(l) => l,
            Either::Right(r) => r,
        }
    }

    /// Returns `true` if the active value is a `T`.
    ///
    /// Besides an exact type match, a [`Failure`](crate::Failure) payload
    /// is also a `T` when the error it captured is a `T`.
    ///
    /// ```rust
    /// use eitherway::Either;
    ///
    /// let e: Either<i32, String> = Either::left(3);
    /// assert!(e.is::<i32>());
    /// assert!(!e.is::<String>());
    /// ```
    pub fn is<T: 'static>(&self) -> bool {
        dispatch::probe(self.value(), TypeId::of::<T>()).is_some()
    }

    /// Run `f` if the active value is a `T`, then return `self` unchanged.
    ///
    /// Matching follows [`Either::is`].
    pub fn when_is<T, F>(self, f: F) -> Self
    where
        T: 'static,
        F: FnOnce(&T),
    {
        if let Some(value) = dispatch::probe_as::<T>(self.value()) {
            f(value);
        }
        self
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        Either::from_result(result)
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    fn from(either: Either<L, R>) -> Self {
        either.into_result()
    }
}

impl<L, R> fmt::Display for Either<L, R>
where
    L: fmt::Display,
    R: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Either::Left(l) => l.fmt(f),
            Either::Right(r) => r.fmt(f),
        }
    }
}

/// Split an iterator of `Either` values into lefts and rights, keeping order.
///
/// ```rust
/// use eitherway::either::partition;
/// use eitherway::Either;
///
/// let (evens, odds): (Vec<i32>, Vec<i32>) = partition(
///     (1..=5).map(|n| if n % 2 == 0 { Either::left(n) } else { Either::right(n) }),
/// );
/// assert_eq!(evens, vec![2, 4]);
/// assert_eq!(odds, vec![1, 3, 5]);
/// ```
pub fn partition<L, R, I>(iter: I) -> (Vec<L>, Vec<R>)
where
    I: IntoIterator<Item = Either<L, R>>,
{
    let mut lefts = Vec::new();
    let mut rights = Vec::new();

    for item in iter {
        match item {
            Either::Left(l) => lefts.push(l),
            Either::Right(r) => rights.push(r),
        }
    }

    (lefts, rights)
}

/// The `Left` values of an iterator of `Either` values.
pub fn lefts<L, R, I>(iter: I) -> impl Iterator<Item = L>
where
    I: IntoIterator<Item = Either<L, R>>,
{
    iter.into_iter().filter_map(Either::into_left)
}

/// The `Right` values of an iterator of `Either` values.
pub fn rights<L, R, I>(iter: I) -> impl Iterator<Item = R>
where
    I: IntoIterator<Item = Either<L, R>>,
{
    iter.into_iter().filter_map(Either::into_right)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;

    proptest! {
        #[test]
        fn prop_left_is_left_only(x: i32) {
            let e: Either<i32, String> = Either::left(x);
            prop_assert!(e.is::<i32>());
            prop_assert!(!e.is::<String>());
            prop_assert_eq!(e.clone().try_left(), Ok(x));
            prop_assert_eq!(e.try_right(), Err(CaseAbsent::new(Side::Right, Side::Left)));
        }

        #[test]
        fn prop_swap_involution(x: i32, left: bool) {
            let e: Either<i32, i32> = if left { Either::left(x) } else { Either::right(x) };
            prop_assert_eq!(e.swap().swap(), e);
        }

        #[test]
        fn prop_swap_keeps_identity(s: String) {
            let shared = Arc::new(s);
            let e: Either<Arc<String>, u8> = Either::left(Arc::clone(&shared));
            let swapped = e.swap();
            prop_assert!(swapped.is_right());
            prop_assert!(Arc::ptr_eq(&swapped.try_right().unwrap(), &shared));
        }

        #[test]
        fn prop_eq_swapped_agrees_with_swap(x: i32, y: i32, left: bool) {
            let a: Either<i32, i32> = if left { Either::left(x) } else { Either::right(x) };
            let b: Either<i32, i32> = if left { Either::right(y) } else { Either::left(y) };
            prop_assert_eq!(a.eq_swapped(&b), a.swap() == b);
        }

        #[test]
        fn prop_result_roundtrip(x: i32) {
            let either: Either<(), i32> = Either::right(x);
            let result: Result<i32, ()> = either.into();
            let back: Either<(), i32> = result.into();
            prop_assert_eq!(back, Either::right(x));
        }
    }
}
