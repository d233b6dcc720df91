//! Testing utilities for chime.
//!
//! - [`Recorder`]: A shared log that callbacks append to
//! - [`CallCounter`]: Counts how many times its callbacks ran
//! - [`failing`]: A callback that always returns an error

use chime_core::{BoxError, Call, Callback};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

// ============================================================================
// Recorder
// ============================================================================

/// A shared log of values produced by callbacks.
///
/// Every callback created by [`Recorder::callback`] maps its call to a value
/// and appends it. Clones share the same log.
///
/// # Example
///
/// ```rust
/// use chime_std::{dispatcher::Dispatcher, testing::Recorder};
///
/// let recorder = Recorder::new();
/// let d = Dispatcher::<&str, i32>::new();
/// d.on("n", recorder.callback(|call| *call.args()));
///
/// d.emit("n", 1).unwrap();
/// d.emit("n", 2).unwrap();
/// assert_eq!(recorder.values(), vec![1, 2]);
/// ```
pub struct Recorder<T> {
    values: Rc<RefCell<Vec<T>>>,
}

impl<T: 'static> Recorder<T> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self {
            values: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Append a value by hand.
    pub fn record(&self, value: T) {
        self.values.borrow_mut().push(value);
    }

    /// A callback that records `f(call)` each time it runs.
    pub fn callback<K, A, F>(&self, f: F) -> Callback<K, A>
    where
        F: Fn(&Call<'_, K, A>) -> T + 'static,
    {
        let values = self.values.clone();
        Callback::new(move |call| values.borrow_mut().push(f(call)))
    }

    /// Get the number of recorded values.
    pub fn count(&self) -> usize {
        self.values.borrow().len()
    }

    /// Clear all recorded values.
    pub fn clear(&self) {
        self.values.borrow_mut().clear();
    }
}

impl<T: Clone + 'static> Recorder<T> {
    /// Get a clone of the recorded values.
    pub fn values(&self) -> Vec<T> {
        self.values.borrow().clone()
    }
}

impl<T: 'static> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
        }
    }
}

// ============================================================================
// Call Counter
// ============================================================================

/// Counts invocations of the callbacks it hands out.
#[derive(Clone, Default)]
pub struct CallCounter {
    count: Rc<Cell<usize>>,
}

impl CallCounter {
    /// Create a new counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that bumps the counter.
    ///
    /// Each call returns a distinct callback; all of them share the count.
    pub fn callback<K, A>(&self) -> Callback<K, A> {
        let count = self.count.clone();
        Callback::new(move |_| count.set(count.get() + 1))
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.set(0);
    }
}

// ============================================================================
// Failing Callback
// ============================================================================

/// A callback that fails with `message` every time it runs.
pub fn failing<K, A>(message: &'static str) -> Callback<K, A> {
    Callback::fallible(move |_| Err(BoxError::from(message)))
}
