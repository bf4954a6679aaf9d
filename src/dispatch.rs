//! Type-erased dispatch over `Either` values.
//!
//! [`Dispatch`] is the object-safe view every `Either<L, R>` with `'static`
//! payloads provides. It lets one code path handle a sequence of Eithers
//! with different type parameters, for example a `Vec<Box<dyn Dispatch>>`.
//!
//! Matching uses a fixed lookup: the active value matches a target type if
//! it is exactly that type, or if it is a [`Failure`] whose captured error is
//! that type. `Failure` plays the role of the common base of all errors.
//!
//! The lookup goes one level deep: only the error a `Failure` captured
//! directly is matched, not the errors in its `source()` chain. To match a
//! wrapped error, inspect [`Failure::chain`] instead.
//!
//! ```rust
//! use eitherway::dispatch::Dispatch;
//! use eitherway::Either;
//! use std::any::TypeId;
//!
//! let values: Vec<Box<dyn Dispatch>> = vec![
//!     Box::new(Either::<i32, String>::left(1)),
//!     Box::new(Either::<String, i32>::right(2)),
//!     Box::new(Either::<u8, String>::right("three".to_string())),
//! ];
//!
//! let mut total = 0;
//! for value in &values {
//!     value.dispatch(TypeId::of::<i32>(), &mut |any| {
//!         total += any.downcast_ref::<i32>().copied().unwrap_or_default();
//!     });
//! }
//! assert_eq!(total, 3);
//! ```

use std::any::{Any, TypeId};

use crate::either::{Either, Side};
use crate::failure::Failure;

/// The type-erased capability shared by all `Either` values.
pub trait Dispatch {
    /// The active case.
    fn side(&self) -> Side;

    /// The active value.
    fn active(&self) -> &dyn Any;

    /// Call `action` with the active value if it matches `target`.
    ///
    /// Returns `true` if `action` ran. The value passed to `action` is the
    /// matched value, so for a [`Failure`] matched by its error type it is the
    /// captured error rather than the `Failure`.
    fn dispatch(&self, target: TypeId, action: &mut dyn FnMut(&dyn Any)) -> bool {
        match probe(self.active(), target) {
            Some(value) => {
                action(value);
                true
            }
            None => false,
        }
    }
}

impl<L: 'static, R: 'static> Dispatch for Either<L, R> {
    fn side(&self) -> Side {
        Either::side(self)
    }

    fn active(&self) -> &dyn Any {
        self.value()
    }
}

impl<D: Dispatch + ?Sized> Dispatch for Box<D> {
    fn side(&self) -> Side {
        (**self).side()
    }

    fn active(&self) -> &dyn Any {
        (**self).active()
    }

    fn dispatch(&self, target: TypeId, action: &mut dyn FnMut(&dyn Any)) -> bool {
        (**self).dispatch(target, action)
    }
}

impl<D: Dispatch + ?Sized> Dispatch for &D {
    fn side(&self) -> Side {
        (**self).side()
    }

    fn active(&self) -> &dyn Any {
        (**self).active()
    }

    fn dispatch(&self, target: TypeId, action: &mut dyn FnMut(&dyn Any)) -> bool {
        (**self).dispatch(target, action)
    }
}

/// Find the part of `value` that has type `target`.
///
/// Returns `value` itself on an exact match, or the captured error when
/// `value` is a [`Failure`] holding a `target`. Errors further down the
/// captured error's `source()` chain are not matched.
pub fn probe(value: &dyn Any, target: TypeId) -> Option<&dyn Any> {
    if Any::type_id(value) == target {
        return Some(value);
    }
    value
        .downcast_ref::<Failure>()
        .map(Failure::cause_any)
        .filter(|cause| Any::type_id(*cause) == target)
}

/// Typed form of [`probe`].
pub fn probe_as<T: 'static>(value: &dyn Any) -> Option<&T> {
    probe(value, TypeId::of::<T>()).and_then(|found| found.downcast_ref::<T>())
}
