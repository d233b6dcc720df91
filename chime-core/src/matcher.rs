//! Selection of listener records for removal.

use crate::{callback::Callback, context::Context};

/// Selects which registrations [`Emitter::remove_listener`] removes.
///
/// A record is removed only if it satisfies every filter that was set.
/// [`Matcher::any`] sets none and therefore clears the whole channel.
///
/// ```rust
/// use chime_core::{Callback, Context, Matcher};
///
/// let cb = Callback::<&str, ()>::new(|_| {});
/// let ctx = Context::new(7u8);
///
/// let m = Matcher::callback(&cb).with_context(&ctx).once_only();
/// assert!(m.matches(&cb, Some(&ctx), true));
/// assert!(!m.matches(&cb, Some(&ctx), false));
/// assert!(!m.matches(&cb, None, true));
///
/// let bound_to_owner = Matcher::callback(&cb).owner_bound();
/// assert!(bound_to_owner.matches(&cb, None, false));
/// assert!(!bound_to_owner.matches(&cb, Some(&ctx), false));
/// ```
///
/// [`Emitter::remove_listener`]: crate::Emitter::remove_listener
#[derive(Debug)]
pub struct Matcher<K, A> {
    callback: Option<Callback<K, A>>,
    context: ContextFilter,
    once_only: bool,
}

#[derive(Debug, Clone)]
enum ContextFilter {
    Any,
    Owner,
    Exact(Context),
}

impl<K, A> Matcher<K, A> {
    /// Match every record on the channel.
    pub fn any() -> Self {
        Self {
            callback: None,
            context: ContextFilter::Any,
            once_only: false,
        }
    }

    /// Match records registered with this exact callback.
    pub fn callback(callback: &Callback<K, A>) -> Self {
        Self {
            callback: Some(callback.clone()),
            ..Self::any()
        }
    }

    /// Additionally require this exact context.
    ///
    /// Records registered without a context are bound to their dispatcher and
    /// never match an explicit context.
    pub fn with_context(mut self, context: &Context) -> Self {
        self.context = ContextFilter::Exact(context.clone());
        self
    }

    /// Additionally require the record to be registered without a context,
    /// i.e. bound to its dispatcher.
    pub fn owner_bound(mut self) -> Self {
        self.context = ContextFilter::Owner;
        self
    }

    /// Returns `true` if [`with_context`](Self::with_context) or
    /// [`owner_bound`](Self::owner_bound) was applied.
    pub fn has_context_filter(&self) -> bool {
        !matches!(self.context, ContextFilter::Any)
    }

    /// Additionally require the record to be a once-listener.
    pub fn once_only(mut self) -> Self {
        self.once_only = true;
        self
    }

    /// Returns `true` when no callback filter is set.
    ///
    /// Dispatchers treat such a matcher as "clear the channel", whatever the
    /// other filters say.
    pub fn is_any(&self) -> bool {
        self.callback.is_none()
    }

    /// Test one record against the filters.
    pub fn matches(&self, callback: &Callback<K, A>, context: Option<&Context>, once: bool) -> bool {
        let Some(wanted) = &self.callback else {
            return true;
        };
        if wanted != callback {
            return false;
        }
        if self.once_only && !once {
            return false;
        }
        match &self.context {
            ContextFilter::Any => true,
            ContextFilter::Owner => context.is_none(),
            ContextFilter::Exact(wanted) => context == Some(wanted),
        }
    }
}

impl<K, A> Clone for Matcher<K, A> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback.clone(),
            context: self.context.clone(),
            once_only: self.once_only,
        }
    }
}

impl<K, A> Default for Matcher<K, A> {
    fn default() -> Self {
        Self::any()
    }
}

impl<K, A> From<&Callback<K, A>> for Matcher<K, A> {
    fn from(callback: &Callback<K, A>) -> Self {
        Self::callback(callback)
    }
}
