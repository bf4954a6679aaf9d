//! Captured failures.
//!
//! A [`Failure`] is what a computation leaves behind when it fails and the
//! failure is kept as a value instead of being propagated. It erases the
//! concrete error type, but the type can still be recovered with
//! [`Failure::is`], [`Failure::downcast_ref`] and [`Failure::downcast`].
//!
//! Cloning a `Failure` shares the captured error; equality is identity.
//! Two failures are equal only when they are clones of one capture, which
//! is what lets an `Either<Failure, R>` keep its identity through swaps and
//! narrowing conversions.
//!
//! # Examples
//!
//! ```
//! use eitherway::Failure;
//! use std::fmt;
//!
//! #[derive(Debug)]
//! struct DivisionByZero;
//!
//! impl fmt::Display for DivisionByZero {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         f.write_str("attempted to divide by zero")
//!     }
//! }
//!
//! impl std::error::Error for DivisionByZero {}
//!
//! let failure = Failure::new(DivisionByZero);
//! assert!(failure.is::<DivisionByZero>());
//! assert_eq!(failure.to_string(), "attempted to divide by zero");
//!
//! let shared = failure.clone();
//! assert_eq!(failure, shared);
//! assert_ne!(failure, Failure::new(DivisionByZero));
//! ```

use std::any::{Any, TypeId};
use std::error::Error as StdError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

trait Cause: StdError + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static);
}

impl<E> Cause for E
where
    E: StdError + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }
}

/// A captured, type-erased failure.
///
/// `Failure` does not implement [`std::error::Error`]: that keeps
/// the blanket `From<E: Error>` conversion coherent, so `?` and `.into()` work
/// from any error type. Use [`Failure::as_error`] when a `&dyn Error` is needed.
#[derive(Clone)]
pub struct Failure {
    cause: Arc<dyn Cause>,
}

impl Failure {
    /// Capture an error.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Failure {
            cause: Arc::new(error),
        }
    }

    /// Capture a plain message with no underlying error type.
    ///
    /// ```
    /// use eitherway::Failure;
    ///
    /// let failure = Failure::msg("input was empty");
    /// assert_eq!(failure.to_string(), "input was empty");
    /// assert!(failure.as_error().source().is_none());
    /// ```
    pub fn msg(message: impl Into<String>) -> Self {
        Failure::new(Message(message.into()))
    }

    /// Returns `true` if the captured error is of type `E`.
    pub fn is<E: 'static>(&self) -> bool {
        self.cause().as_any().is::<E>()
    }

    /// Borrow the captured error as `E`, if that is its type.
    pub fn downcast_ref<E: 'static>(&self) -> Option<&E> {
        self.cause().as_any().downcast_ref::<E>()
    }

    /// Recover the captured error as a shared `Arc<E>`.
    ///
    /// The returned `Arc` points at the same allocation the failure held.
    /// On a type mismatch the failure is handed back untouched.
    pub fn downcast<E>(self) -> Result<Arc<E>, Self>
    where
        E: Send + Sync + 'static,
    {
        if !self.is::<E>() {
            return Err(self);
        }
        Cause::into_any(Arc::clone(&self.cause))
            .downcast::<E>()
            .map_err(|_| self)
    }

    /// The [`TypeId`] of the captured error.
    pub fn cause_type_id(&self) -> TypeId {
        Any::type_id(self.cause().as_any())
    }

    // `Arc<dyn Cause>` is itself a `Cause`, so calls go through the pointee.
    fn cause(&self) -> &dyn Cause {
        &*self.cause
    }

    pub(crate) fn cause_any(&self) -> &dyn Any {
        self.cause().as_any()
    }

    /// The captured error as a trait object.
    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.cause().as_error()
    }

    /// Iterate the captured error followed by its `source()` chain.
    ///
    /// ```
    /// use eitherway::Failure;
    ///
    /// let failure = Failure::msg("disk full");
    /// assert_eq!(failure.chain().count(), 1);
    /// ```
    pub fn chain(&self) -> Chain<'_> {
        let first: &(dyn StdError + 'static) = self.as_error();
        Chain { next: Some(first) }
    }

    /// The innermost error of the `source()` chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self.as_error();
        while let Some(source) = current.source() {
            current = source;
        }
        current
    }

    /// Returns `true` if both failures share one capture.
    pub fn ptr_eq(&self, other: &Failure) -> bool {
        Arc::ptr_eq(&self.cause, &other.cause)
    }
}

impl<E> From<E> for Failure
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Failure::new(error)
    }
}

impl AsRef<dyn StdError + Send + Sync> for Failure {
    fn as_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.as_error()
    }
}

impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Failure {}

impl Hash for Failure {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.cause) as *const ()).hash(state);
    }
}

/// `{}` prints the captured error; `{:#}` appends the source chain,
/// separated by `": "`.
impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_error())?;
        if f.alternate() {
            for source in self.chain().skip(1) {
                write!(f, ": {}", source)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Failure").field(&self.cause).finish()
    }
}

/// Iterator over a failure's error chain, created by [`Failure::chain`].
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

#[derive(Debug)]
struct Message(String);

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for Message {}

/// A panic caught while resolving a [`Failable`](crate::Failable) built with
/// [`Failable::catching`](crate::Failable::catching).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panicked {
    message: String,
}

impl Panicked {
    pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Panicked { message }
    }

    /// The panic message, when the payload was a string.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "computation panicked: {}", self.message)
    }
}

impl StdError for Panicked {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Outer {
        inner: Inner,
    }

    #[derive(Debug, PartialEq)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("loading profile")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.inner)
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("connection refused")
        }
    }

    impl StdError for Inner {}

    #[test]
    fn test_downcast_ref() {
        let failure = Failure::new(Inner);
        assert_eq!(failure.downcast_ref::<Inner>(), Some(&Inner));
        assert!(failure.downcast_ref::<Outer>().is_none());
        assert_eq!(failure.cause_type_id(), TypeId::of::<Inner>());
    }

    #[test]
    fn test_downcast_shares_allocation() {
        let failure = Failure::new(Inner);
        let address = failure.downcast_ref::<Inner>().map(|e| e as *const Inner);

        let shared = failure.downcast::<Inner>().unwrap();
        assert_eq!(Some(Arc::as_ptr(&shared)), address);
    }

    #[test]
    fn test_downcast_mismatch_returns_same_failure() {
        let failure = Failure::new(Inner);
        let copy = failure.clone();

        let back = failure.downcast::<Outer>().unwrap_err();
        assert!(back.ptr_eq(&copy));
    }

    #[test]
    fn test_identity_equality() {
        let a = Failure::msg("boom");
        let b = a.clone();
        let c = Failure::msg("boom");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_chain_and_root_cause() {
        let failure = Failure::new(Outer { inner: Inner });

        let messages: Vec<String> = failure.chain().map(|e| e.to_string()).collect();
        assert_eq!(messages, vec!["loading profile", "connection refused"]);
        assert_eq!(failure.root_cause().to_string(), "connection refused");
    }

    #[test]
    fn test_display_alternate_includes_chain() {
        let failure = Failure::new(Outer { inner: Inner });
        assert_eq!(failure.to_string(), "loading profile");
        assert_eq!(format!("{:#}", failure), "loading profile: connection refused");
    }

    #[test]
    fn test_from_error() {
        let parse = "x".parse::<i32>().unwrap_err();
        let failure: Failure = parse.into();
        assert!(failure.is::<std::num::ParseIntError>());
    }

    #[test]
    fn test_panicked_payloads() {
        let from_str = Panicked::from_payload(Box::new("static message"));
        assert_eq!(from_str.message(), "static message");

        let from_string = Panicked::from_payload(Box::new(String::from("owned")));
        assert_eq!(from_string.to_string(), "computation panicked: owned");

        let other = Panicked::from_payload(Box::new(7_u8));
        assert_eq!(other.message(), "non-string panic payload");
    }
}
