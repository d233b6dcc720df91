//! Invocation context binding.

use std::{any::Any, fmt, rc::Rc};

/// A value bound as the receiver of a callback.
///
/// `Context` is a type-erased, shared handle. Clones refer to the same value,
/// and equality is identity: two contexts are equal only if they are clones of
/// one another, regardless of the values they wrap.
///
/// ```rust
/// use chime_core::Context;
///
/// let ctx = Context::new(String::from("session"));
/// assert_eq!(ctx.downcast_ref::<String>().map(String::as_str), Some("session"));
/// assert_eq!(ctx, ctx.clone());
/// assert_ne!(ctx, Context::new(String::from("session")));
/// ```
#[derive(Clone)]
pub struct Context(Rc<dyn Any>);

impl Context {
    /// Wrap a value as a context.
    pub fn new<T: 'static>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Wrap an already shared value without another allocation.
    pub fn from_rc<T: 'static>(value: Rc<T>) -> Self {
        Self(value)
    }

    /// Borrow the wrapped value as `T`, if that is its type.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Returns `true` if the wrapped value is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl PartialEq for Context {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Context {}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Context")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}
