//! Callbacks and the call they receive.
//!
//! A [`Callback`] is the unit a dispatcher stores and invokes. It is a shared
//! handle: cloning it is cheap, and clones compare equal, which is how a
//! registration is later found again for removal.

use crate::{channel::Channel, context::Context, emitter::Emitter, error::BoxError};
use std::{fmt, rc::Rc};

type CallbackFn<K, A> = dyn Fn(&Call<'_, K, A>) -> Result<(), BoxError>;

/// A listener function registered on a dispatcher.
///
/// # Example
///
/// ```rust
/// use chime_core::Callback;
///
/// let greet = Callback::<&str, String>::new(|call| println!("hello {}", call.args()));
/// let same = greet.clone();
/// assert_eq!(greet, same);
/// assert_ne!(greet, Callback::new(|_| {}));
/// ```
pub struct Callback<K, A> {
    inner: Rc<CallbackFn<K, A>>,
}

impl<K, A> Callback<K, A> {
    /// Create a callback that cannot fail.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Call<'_, K, A>) + 'static,
    {
        Self::fallible(move |call| {
            f(call);
            Ok(())
        })
    }

    /// Create a callback whose error aborts the emission it runs in.
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&Call<'_, K, A>) -> Result<(), BoxError> + 'static,
    {
        Self { inner: Rc::new(f) }
    }

    /// Invoke the callback.
    pub fn call(&self, call: &Call<'_, K, A>) -> Result<(), BoxError> {
        (self.inner)(call)
    }

    /// Returns `true` if both handles refer to the same registered function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K, A> Clone for Callback<K, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, A> PartialEq for Callback<K, A> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<K, A> Eq for Callback<K, A> {}

impl<K, A> fmt::Debug for Callback<K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback")
            .field(&Rc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}

/// The execution-time receiver of a callback.
pub enum Receiver<'a, K, A> {
    /// No context was supplied at registration; the receiver is the dispatcher
    /// delivering the call.
    Owner(&'a dyn Emitter<K, A>),
    /// The context supplied at registration.
    Bound(&'a Context),
}

impl<K, A> Clone for Receiver<'_, K, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, A> Copy for Receiver<'_, K, A> {}

impl<K, A> fmt::Debug for Receiver<'_, K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Receiver::Owner(_) => f.write_str("Owner"),
            Receiver::Bound(ctx) => f.debug_tuple("Bound").field(ctx).finish(),
        }
    }
}

/// One invocation of a callback.
pub struct Call<'a, K, A> {
    event: &'a K,
    channel: Channel<&'a K>,
    args: &'a A,
    receiver: Receiver<'a, K, A>,
}

impl<'a, K, A> Call<'a, K, A> {
    /// Describe an invocation. Dispatchers build one per listener they run.
    pub fn new(
        event: &'a K,
        channel: Channel<&'a K>,
        args: &'a A,
        receiver: Receiver<'a, K, A>,
    ) -> Self {
        Self {
            event,
            channel,
            args,
            receiver,
        }
    }

    /// The identifier the emission was made with.
    ///
    /// Wildcard listeners use this to tell emissions apart.
    pub fn event(&self) -> &'a K {
        self.event
    }

    /// The channel the running listener was registered on.
    pub fn channel(&self) -> Channel<&'a K> {
        self.channel
    }

    /// The emitted arguments.
    pub fn args(&self) -> &'a A {
        self.args
    }

    /// The receiver this callback is bound to.
    pub fn receiver(&self) -> Receiver<'a, K, A> {
        self.receiver
    }

    /// The bound context, if one was supplied at registration.
    pub fn context(&self) -> Option<&'a Context> {
        match self.receiver {
            Receiver::Bound(ctx) => Some(ctx),
            Receiver::Owner(_) => None,
        }
    }

    /// The bound context downcast to `T`.
    pub fn context_as<T: 'static>(&self) -> Option<&'a T> {
        self.context().and_then(Context::downcast_ref)
    }

    /// The delivering dispatcher, when no context was bound.
    pub fn owner(&self) -> Option<&'a dyn Emitter<K, A>> {
        match self.receiver {
            Receiver::Owner(owner) => Some(owner),
            Receiver::Bound(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_callback_identity() {
        let a = Callback::<u8, ()>::new(|_| {});
        let b = Callback::<u8, ()>::new(|_| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_bound_call() {
        let seen = Rc::new(Cell::new(0));
        let cb = {
            let seen = seen.clone();
            Callback::<u8, u32>::new(move |call| {
                seen.set(*call.args() + u32::from(*call.event()));
                assert_eq!(call.context_as::<&str>(), Some(&"ctx"));
                assert!(call.owner().is_none());
            })
        };

        let ctx = Context::new("ctx");
        let call = Call::new(&2, Channel::Event(&2), &40, Receiver::Bound(&ctx));
        cb.call(&call).unwrap();
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn test_fallible_callback_reports_error() {
        let cb = Callback::<u8, ()>::fallible(|_| Err("nope".into()));
        let ctx = Context::new(());
        let call = Call::new(&0, Channel::Wildcard, &(), Receiver::Bound(&ctx));
        let err = cb.call(&call).unwrap_err();
        assert_eq!(err.to_string(), "nope");
    }
}
