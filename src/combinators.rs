//! Free functions that build and process sequences of `Either` values.
//!
//! All combinators are lazy iterator adaptors: nothing runs until the
//! returned iterator is pulled, and each element is processed once per pull.
//! Because the functions passed in usually have side effects, collect the
//! result once instead of iterating it again; an adaptor is only `Clone`
//! when its source and closures are, and a clone repeats every side effect.
//!
//! The same operations are available as iterator methods through the
//! extension traits in [`crate::ext`].
//!
//! # Examples
//!
//! ```rust
//! use eitherway::combinators::{try_each, when_left, when_right};
//! use eitherway::Failure;
//!
//! fn hundred_over(n: i32) -> Result<i32, Failure> {
//!     100_i32.checked_div(n - 2).ok_or_else(|| Failure::msg("division by zero"))
//! }
//!
//! let mut failures = Vec::new();
//! let mut values = Vec::new();
//!
//! let results: Vec<_> = when_right(
//!     when_left(try_each(1..=6, hundred_over), |e| failures.push(e.to_string())),
//!     |v| values.push(*v),
//! )
//! .collect();
//!
//! assert_eq!(results.len(), 6);
//! assert_eq!(failures, vec!["division by zero"]);
//! assert_eq!(values, vec![-100, 100, 50, 33, 25]);
//! ```

use std::any::{Any, TypeId};
use std::error::Error as StdError;
use std::rc::Rc;

use crate::deferred::{Deferred, Layer};
use crate::dispatch::Dispatch;
use crate::either::Either;
use crate::failure::Failure;

/// Wrap `f` so that its failures of type `E` become `Left` values.
///
/// The returned function maps a success to `Ok(Right(value))` and a failure
/// whose captured error is an `E` to `Ok(Left(failure))`. Any other failure
/// is not handled and comes back as `Err`. The `Left` failure still answers
/// [`Either::is::<E>`](Either::is) and [`Failure::downcast_ref::<E>`](Failure::downcast_ref).
///
/// ```rust
/// use eitherway::combinators::attempt;
/// use eitherway::Failure;
/// use std::num::ParseIntError;
///
/// let mut parse = attempt::<ParseIntError, _, _, _, _>(|s: &str| -> Result<i32, Failure> {
///     if s.is_empty() {
///         return Err(Failure::msg("empty input"));
///     }
///     Ok(s.parse::<i32>()?)
/// });
///
/// assert!(parse("12").is_ok_and(|e| e.is_right()));
/// assert!(parse("x").is_ok_and(|e| e.is::<ParseIntError>()));
/// assert!(parse("").is_err());
/// ```
pub fn attempt<E, V, R, X, F>(mut f: F) -> impl FnMut(V) -> Result<Either<Failure, R>, Failure>
where
    E: StdError + Send + Sync + 'static,
    F: FnMut(V) -> Result<R, X>,
    X: Into<Failure>,
{
    move |value| match f(value) {
        Ok(result) => Ok(Either::Right(result)),
        Err(err) => narrow::<E>(err.into()).map(Either::Left),
    }
}

fn narrow<E>(failure: Failure) -> Result<Failure, Failure>
where
    E: StdError + Send + Sync + 'static,
{
    if failure.is::<E>() {
        #[cfg(feature = "tracing")]
        tracing::trace!("captured failure as Left: {:#}", failure);
        Ok(failure)
    } else {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            "failure not handled by {}: {:#}",
            std::any::type_name::<E>(),
            failure
        );
        Err(failure)
    }
}

fn capture<R, X: Into<Failure>>(outcome: Result<R, X>) -> Either<Failure, R> {
    match outcome {
        Ok(result) => Either::Right(result),
        Err(err) => {
            let failure: Failure = err.into();
            #[cfg(feature = "tracing")]
            tracing::trace!("captured failure as Left: {:#}", failure);
            Either::Left(failure)
        }
    }
}

/// Apply `f` to every element, turning each failure into a `Left` value.
pub fn try_each<I, R, X, F>(source: I, mut f: F) -> impl Iterator<Item = Either<Failure, R>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Result<R, X>,
    X: Into<Failure>,
{
    source.into_iter().map(move |value| capture(f(value)))
}

/// Apply `f` to every element, turning failures of type `E` into `Left`
/// values.
///
/// Other failures are yielded as `Err`, so collecting into
/// `Result<Vec<_>, Failure>` stops at the first one.
///
/// ```rust
/// use eitherway::combinators::try_each_as;
/// use eitherway::Failure;
/// use std::num::ParseIntError;
///
/// let parsed: Result<Vec<_>, Failure> =
///     try_each_as::<ParseIntError, _, _, _, _>(["1", "x"], |s| s.parse::<u8>()).collect();
/// assert!(parsed.is_ok_and(|items| items[1].is_left()));
/// ```
pub fn try_each_as<E, I, R, X, F>(
    source: I,
    f: F,
) -> impl Iterator<Item = Result<Either<Failure, R>, Failure>>
where
    E: StdError + Send + Sync + 'static,
    I: IntoIterator,
    F: FnMut(I::Item) -> Result<R, X>,
    X: Into<Failure>,
{
    source.into_iter().map(attempt::<E, I::Item, R, X, F>(f))
}

/// Execute every deferred call around `f`, turning each failure into a
/// `Left` value.
///
/// The layers of each element run exactly once, when the element is pulled.
/// Elements that are never pulled run no layer and never call `f`.
pub fn try_deferred<I, V, R, X, F>(source: I, mut f: F) -> impl Iterator<Item = Either<Failure, R>>
where
    I: IntoIterator<Item = Deferred<V, Result<R, X>>>,
    F: FnMut(V) -> Result<R, X>,
    X: Into<Failure>,
{
    source
        .into_iter()
        .map(move |call| capture(call.execute(&mut f)))
}

/// Run `f` on every `Left` value, passing all elements through unchanged.
pub fn when_left<I, L, R, F>(source: I, mut f: F) -> impl Iterator<Item = Either<L, R>>
where
    I: IntoIterator<Item = Either<L, R>>,
    F: FnMut(&L),
{
    source.into_iter().map(move |either| either.when_left(&mut f))
}

/// Run `f` on every `Right` value, passing all elements through unchanged.
pub fn when_right<I, L, R, F>(source: I, mut f: F) -> impl Iterator<Item = Either<L, R>>
where
    I: IntoIterator<Item = Either<L, R>>,
    F: FnMut(&R),
{
    source.into_iter().map(move |either| either.when_right(&mut f))
}

/// Run `f` on every active value of type `T`, passing all elements through
/// unchanged.
///
/// Works on any sequence of [`Dispatch`] values, including sequences of
/// Eithers with different type parameters. Matching follows
/// [`dispatch::probe`](crate::dispatch::probe).
///
/// ```rust
/// use eitherway::combinators::when_is;
/// use eitherway::dispatch::Dispatch;
/// use eitherway::Either;
///
/// let mixed: Vec<Box<dyn Dispatch>> = vec![
///     Box::new(Either::<u32, String>::left(4)),
///     Box::new(Either::<bool, u32>::right(6)),
///     Box::new(Either::<bool, u32>::left(true)),
/// ];
///
/// let mut sum = 0;
/// let passed = when_is(mixed, |n: &u32| sum += n).count();
/// assert_eq!((passed, sum), (3, 10));
/// ```
pub fn when_is<T, I, F>(source: I, mut f: F) -> impl Iterator<Item = I::Item>
where
    T: 'static,
    I: IntoIterator,
    I::Item: Dispatch,
    F: FnMut(&T),
{
    source.into_iter().map(move |item| {
        item.dispatch(TypeId::of::<T>(), &mut |value: &dyn Any| {
            if let Some(value) = value.downcast_ref::<T>() {
                f(value);
            }
        });
        item
    })
}

/// Bind every element to a deferred call with one layer.
pub fn with_layer<I, R>(source: I, layer: Layer<I::Item, R>) -> impl Iterator<Item = Deferred<I::Item, R>>
where
    I: IntoIterator,
{
    source
        .into_iter()
        .map(move |value| Deferred::with_layer(value, Rc::clone(&layer)))
}

/// Bind every element to a deferred call with the given layers, the first
/// layer outermost.
///
/// An empty `layers` list produces calls with no layers.
pub fn with_layers<I, R, Ls>(source: I, layers: Ls) -> impl Iterator<Item = Deferred<I::Item, R>>
where
    I: IntoIterator,
    Ls: IntoIterator<Item = Layer<I::Item, R>>,
{
    add_layers(source.into_iter().map(Deferred::new), layers)
}

/// Add one layer to every deferred call, inside its existing layers.
pub fn add_layer<I, V, R>(source: I, layer: Layer<V, R>) -> impl Iterator<Item = Deferred<V, R>>
where
    I: IntoIterator<Item = Deferred<V, R>>,
{
    source
        .into_iter()
        .map(move |call| call.layer(Rc::clone(&layer)))
}

/// Add the given layers to every deferred call, in order, inside the
/// existing layers. An empty `layers` list leaves the calls unchanged.
pub fn add_layers<I, V, R, Ls>(source: I, layers: Ls) -> impl Iterator<Item = Deferred<V, R>>
where
    I: IntoIterator<Item = Deferred<V, R>>,
    Ls: IntoIterator<Item = Layer<V, R>>,
{
    let layers: Vec<Layer<V, R>> = layers.into_iter().collect();
    source
        .into_iter()
        .map(move |call| layers.iter().cloned().fold(call, Deferred::layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deferred::layer;
    use std::cell::Cell;
    use std::fmt;

    #[derive(Debug, PartialEq)]
    struct DivisionByZero;

    impl fmt::Display for DivisionByZero {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("attempted to divide by zero")
        }
    }

    impl StdError for DivisionByZero {}

    #[derive(Debug)]
    struct MissingInput;

    impl fmt::Display for MissingInput {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("missing input")
        }
    }

    impl StdError for MissingInput {}

    fn hundred_over(n: i32) -> Result<i32, DivisionByZero> {
        100_i32.checked_div(n - 2).ok_or(DivisionByZero)
    }

    fn calculate(text: Option<&str>) -> Result<i32, Failure> {
        let text = text.ok_or(MissingInput)?;
        Ok(100_i32
            .checked_div(text.len() as i32 - 2)
            .ok_or(DivisionByZero)?)
    }

    fn counting<V: 'static, R: 'static>(count: &Rc<Cell<usize>>) -> Layer<V, R> {
        let count = Rc::clone(count);
        layer(move |next, value| {
            count.set(count.get() + 1);
            next(value)
        })
    }

    const WORDS: [Option<&str>; 6] = [
        Some("1"),
        Some("12"),
        Some("123"),
        Some("1234"),
        None,
        Some("12345"),
    ];

    #[test]
    fn test_attempt_catches_matching_failure() {
        let mut divide = attempt::<DivisionByZero, _, _, _, _>(hundred_over);

        let failed = divide(2).unwrap();
        assert!(failed.left_ref().is_ok_and(|e| e.downcast_ref::<DivisionByZero>() == Some(&DivisionByZero)));
        assert_eq!(divide(1).unwrap(), Either::right(-100));
    }

    #[test]
    fn test_attempt_passes_other_failures_through() {
        let mut divide = attempt::<DivisionByZero, _, _, _, _>(calculate);

        let err = divide(None).unwrap_err();
        assert!(err.is::<MissingInput>());
        assert!(divide(Some("12")).unwrap().is_left());
    }

    #[test]
    fn test_try_each_division_sequence() {
        let results: Vec<_> = try_each(1..=6, hundred_over).collect();

        assert_eq!(results.len(), 6);
        assert_eq!(results[0], Either::right(-100));
        assert!(results[1].is::<DivisionByZero>());
        assert_eq!(results[2], Either::right(100));
    }

    #[test]
    fn test_try_each_is_lazy() {
        let calls = Cell::new(0);
        let iter = try_each(1..=6, |n| {
            calls.set(calls.get() + 1);
            hundred_over(n)
        });
        assert_eq!(calls.get(), 0);

        assert_eq!(iter.take(2).count(), 2);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_try_each_as_stops_collect_on_unhandled_failure() {
        let collected: Result<Vec<_>, Failure> =
            try_each_as::<DivisionByZero, _, _, _, _>(WORDS, calculate).collect();
        assert!(collected.unwrap_err().is::<MissingInput>());

        let handled: Vec<_> = try_each_as::<DivisionByZero, _, _, _, _>(WORDS, calculate)
            .take(4)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(handled.len(), 4);
        assert!(handled[1].is_left());
    }

    #[test]
    fn test_typed_catch_answers_type_queries() {
        let caught: Vec<_> = try_each_as::<DivisionByZero, _, _, _, _>(1..=6, hundred_over)
            .collect::<Result<_, _>>()
            .unwrap();

        assert!(caught[1].is::<DivisionByZero>());
        assert!(caught[1].is::<Failure>());
        assert!(!caught[0].is::<DivisionByZero>());

        let mut hits = 0;
        let passed = when_is(caught.iter(), |_: &DivisionByZero| hits += 1).count();
        assert_eq!((passed, hits), (6, 1));
    }

    #[test]
    fn test_typed_catch_keeps_failure_identity() {
        let failure = Failure::new(DivisionByZero);
        let copy = failure.clone();
        let mut rethrow = attempt::<DivisionByZero, _, i32, _, _>(move |_: ()| Err(copy.clone()));

        let caught = rethrow(()).unwrap();
        assert!(caught.try_left().is_ok_and(|f| f.ptr_eq(&failure)));
    }

    #[test]
    fn test_when_left_and_when_right_split_by_case() {
        let mut failures = Vec::new();
        let mut values = Vec::new();

        let results: Vec<_> = when_left(
            when_right(try_each(WORDS, calculate), |v| values.push(*v)),
            |e| failures.push(e.to_string()),
        )
        .collect();

        assert_eq!(results.len(), 6);
        assert_eq!(failures, vec!["attempted to divide by zero", "missing input"]);
        assert_eq!(values, vec![-100, 100, 50, 33]);
    }

    #[test]
    fn test_when_is_matches_captured_error_type() {
        let mut messages = Vec::new();
        let count = when_is(try_each(1..=6, hundred_over), |e: &DivisionByZero| {
            messages.push(e.to_string())
        })
        .count();

        assert_eq!(count, 6);
        assert_eq!(messages, vec!["attempted to divide by zero"]);
    }

    #[test]
    fn test_when_is_never_fires_on_mismatch() {
        let calls = Cell::new(0);
        let items = vec![
            Either::<Option<String>, i32>::left(None),
            Either::right(3),
        ];

        let passed: Vec<_> = when_is(items.clone(), |_: &String| calls.set(calls.get() + 1)).collect();
        assert_eq!(passed, items);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_layers_run_once_per_pulled_element() {
        let counted = Rc::new(Cell::new(0));
        let observed = Rc::new(Cell::new(0));
        let finals = Cell::new(0);

        let results: Vec<_> = try_deferred(
            add_layer(with_layer(WORDS, counting(&counted)), counting(&observed)).skip(1),
            |text| {
                finals.set(finals.get() + 1);
                calculate(text)
            },
        )
        .collect();

        assert_eq!(results.len(), 5);
        assert_eq!(counted.get(), 5);
        assert_eq!(observed.get(), 5);
        assert_eq!(finals.get(), 5);
        assert_eq!(results[1], Either::right(100));
        assert_eq!(results.iter().filter(|e| e.is_left()).count(), 2);
    }

    #[test]
    fn test_with_layers_matches_chained_layers() {
        let count = Rc::new(Cell::new(0));
        let layers = vec![counting(&count), counting(&count)];

        let results: Vec<_> = try_deferred(with_layers(WORDS, layers).skip(1), calculate).collect();

        assert_eq!(results.len(), 5);
        assert_eq!(count.get(), 10);
        assert_eq!(results[1], Either::right(100));
    }

    #[test]
    fn test_empty_layer_lists() {
        let none: Vec<Layer<i32, i32>> = Vec::new();

        let calls: Vec<_> = with_layers(1..=3, none.clone()).collect();
        assert!(calls.iter().all(|c| c.depth() == 0));

        let unchanged: Vec<_> = add_layers(calls, none).collect();
        assert_eq!(unchanged.len(), 3);
        assert!(unchanged.iter().all(|c| c.depth() == 0));
    }

    #[cfg(feature = "tracing")]
    mod tracing_tests {
        use super::*;
        use tracing_test::traced_test;

        #[test]
        #[traced_test]
        fn test_unhandled_failure_is_logged() {
            let mut divide = attempt::<DivisionByZero, _, _, _, _>(calculate);
            assert!(divide(None).is_err());
            assert!(logs_contain("failure not handled by"));
            assert!(logs_contain("missing input"));
        }

        #[test]
        #[traced_test]
        fn test_captured_failure_is_logged() {
            let lefts = try_each(1..=3, hundred_over).filter(Either::is_left).count();
            assert_eq!(lefts, 1);
            assert!(logs_contain("captured failure as Left: attempted to divide by zero"));
        }
    }
}
