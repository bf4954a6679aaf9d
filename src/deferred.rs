//! Calls wrapped in observer layers.
//!
//! A [`Deferred<V, R>`] binds an argument `V` to a list of [`Layer`]s. The
//! function that finally consumes the argument is supplied later, through
//! [`Deferred::execute`]. Each layer receives a `next` function and the
//! argument and decides what to do around the call to `next`. Counting,
//! logging and timing layers simply call `next` once.
//!
//! Layers run in the order they were added: the first layer is entered first,
//! its `next` enters the second layer, and the last layer's `next` is the
//! final function. Each layer and the final function run once per execution.
//!
//! ```rust
//! use eitherway::deferred::{layer, Deferred};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let trace = Rc::new(RefCell::new(Vec::new()));
//! let outer = Rc::clone(&trace);
//! let inner = Rc::clone(&trace);
//!
//! let call = Deferred::new(20)
//!     .layer(layer(move |next, v: i32| {
//!         outer.borrow_mut().push("first");
//!         next(v)
//!     }))
//!     .layer(layer(move |next, v: i32| {
//!         inner.borrow_mut().push("second");
//!         next(v + 1)
//!     }));
//!
//! assert_eq!(call.execute(|v| v * 2), 42);
//! assert_eq!(*trace.borrow(), vec!["first", "second"]);
//! ```

use std::fmt;
use std::rc::Rc;

/// One layer around a deferred call: `(next, argument) -> result`.
pub type Layer<V, R> = Rc<dyn Fn(&mut dyn FnMut(V) -> R, V) -> R>;

/// Build a [`Layer`] from a closure.
pub fn layer<V, R, F>(f: F) -> Layer<V, R>
where
    F: Fn(&mut dyn FnMut(V) -> R, V) -> R + 'static,
{
    Rc::new(f)
}

/// A layer that shows the argument to `observer` before passing it on.
///
/// ```rust
/// use eitherway::deferred::{observe, Deferred};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let last = Rc::new(Cell::new(0));
/// let seen = Rc::clone(&last);
///
/// let call = Deferred::with_layer(7, observe(move |v: &i32| seen.set(*v)));
/// assert_eq!(call.execute(|v| v + 1), 8);
/// assert_eq!(last.get(), 7);
/// ```
pub fn observe<V, R, F>(observer: F) -> Layer<V, R>
where
    V: 'static,
    R: 'static,
    F: Fn(&V) + 'static,
{
    Rc::new(move |next: &mut dyn FnMut(V) -> R, value: V| {
        observer(&value);
        next(value)
    })
}

/// An argument bound to an ordered list of layers.
pub struct Deferred<V, R> {
    value: V,
    layers: Vec<Layer<V, R>>,
}

impl<V, R> Deferred<V, R> {
    /// Bind `value` with no layers.
    pub fn new(value: V) -> Self {
        Self {
            value,
            layers: Vec::new(),
        }
    }

    /// Bind `value` with a single layer.
    pub fn with_layer(value: V, layer: Layer<V, R>) -> Self {
        Self::new(value).layer(layer)
    }

    /// Add a layer inside the existing ones.
    pub fn layer(mut self, layer: Layer<V, R>) -> Self {
        self.layers.push(layer);
        self
    }

    /// The bound argument.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Discard the layers and return the bound argument.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Run the layers around `f`, consuming the bound argument.
    pub fn execute<F>(self, mut f: F) -> R
    where
        F: FnMut(V) -> R,
    {
        run(&self.layers, &mut f, self.value)
    }

    /// Run the layers around `f` with a clone of the bound argument.
    pub fn execute_ref<F>(&self, mut f: F) -> R
    where
        V: Clone,
        F: FnMut(V) -> R,
    {
        run(&self.layers, &mut f, self.value.clone())
    }
}

fn run<V, R>(layers: &[Layer<V, R>], f: &mut dyn FnMut(V) -> R, value: V) -> R {
    match layers.split_first() {
        None => f(value),
        Some((outer, rest)) => outer(&mut |v| run(rest, &mut *f, v), value),
    }
}

impl<V: Clone, R> Clone for Deferred<V, R> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            layers: self.layers.clone(),
        }
    }
}

impl<V: fmt::Debug, R> fmt::Debug for Deferred<V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("value", &self.value)
            .field("depth", &self.layers.len())
            .finish()
    }
}
