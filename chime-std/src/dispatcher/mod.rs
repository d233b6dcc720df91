//! The leaf dispatcher.
//!
//! A [`Dispatcher`] owns one event table and delivers emissions to it
//! synchronously. Listeners may re-enter the dispatcher from inside a callback
//! (register, remove, emit); no table borrow is held while a callback runs.

mod table;

use chime_core::{Call, Callback, Channel, Context, DispatchError, Emitter, Matcher, Receiver};
use std::{any::Any, cell::RefCell, fmt, hash::Hash};
use table::{EventTable, Record};

/// A synchronous, single-threaded event dispatcher.
///
/// # Delivery
///
/// [`emit`](Self::emit) first runs the wildcard listeners, then the listeners of
/// the emitted event, each sequence in registration order. The sequences are
/// snapshotted when the emission starts: listeners added during the emission
/// wait for the next one. Once-listeners are unregistered immediately before
/// they run, and skipped if a nested emission already consumed them.
///
/// A listener error stops the emission on the spot and is returned to the
/// caller; listeners after it do not run.
///
/// # Example
///
/// ```rust
/// use chime_std::dispatcher::Dispatcher;
/// use chime_core::Callback;
/// use std::{cell::RefCell, rc::Rc};
///
/// let seen = Rc::new(RefCell::new(Vec::<&str>::new()));
/// let cb = {
///     let seen = seen.clone();
///     Callback::<&str, &str>::new(move |call| seen.borrow_mut().push(*call.args()))
/// };
///
/// let d = Dispatcher::<&str, &str>::new();
/// assert!(d.on("ping", cb).emit("ping", "hi").unwrap());
/// assert_eq!(*seen.borrow(), vec!["hi"]);
///
/// d.remove_all_listeners("ping");
/// assert!(!d.emit("ping", "again").unwrap());
/// ```
pub struct Dispatcher<K, A> {
    table: RefCell<EventTable<K, A>>,
}

impl<K, A> Default for Dispatcher<K, A> {
    fn default() -> Self {
        Self {
            table: RefCell::new(EventTable::default()),
        }
    }
}

impl<K, A> fmt::Debug for Dispatcher<K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl<K, A> Dispatcher<K, A>
where
    K: Eq + Hash + Clone + 'static,
    A: 'static,
{
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` on `event`. It stays registered until removed.
    pub fn on(&self, event: impl Into<Channel<K>>, callback: Callback<K, A>) -> &Self {
        self.add(event.into(), callback, None, false)
    }

    /// Register `callback` on `event`, bound to `context`.
    pub fn on_with(
        &self,
        event: impl Into<Channel<K>>,
        callback: Callback<K, A>,
        context: Context,
    ) -> &Self {
        self.add(event.into(), callback, Some(context), false)
    }

    /// Alias of [`on`](Self::on).
    pub fn add_listener(&self, event: impl Into<Channel<K>>, callback: Callback<K, A>) -> &Self {
        self.on(event, callback)
    }

    /// Register `callback` for the next emission of `event` only.
    pub fn once(&self, event: impl Into<Channel<K>>, callback: Callback<K, A>) -> &Self {
        self.add(event.into(), callback, None, true)
    }

    /// Register a once-listener bound to `context`.
    pub fn once_with(
        &self,
        event: impl Into<Channel<K>>,
        callback: Callback<K, A>,
        context: Context,
    ) -> &Self {
        self.add(event.into(), callback, Some(context), true)
    }

    /// Register a type-erased listener.
    ///
    /// For registration paths where the listener arrives as `dyn Any`
    /// (plugins, configuration). Fails with
    /// [`DispatchError::InvalidArgument`] unless `listener` is a
    /// `Callback<K, A>`; nothing is registered in that case.
    pub fn try_on(
        &self,
        event: impl Into<Channel<K>>,
        listener: &dyn Any,
        context: Option<Context>,
    ) -> Result<&Self, DispatchError> {
        let callback = Self::downcast(listener)?;
        Ok(self.add(event.into(), callback, context, false))
    }

    /// Type-erased counterpart of [`once`](Self::once).
    pub fn try_once(
        &self,
        event: impl Into<Channel<K>>,
        listener: &dyn Any,
        context: Option<Context>,
    ) -> Result<&Self, DispatchError> {
        let callback = Self::downcast(listener)?;
        Ok(self.add(event.into(), callback, context, true))
    }

    /// Emit `event` with `args`.
    ///
    /// Returns `Ok(true)` if `event` had listeners of its own when the emission
    /// started. Wildcard listeners run either way but do not count.
    pub fn emit(&self, event: impl Into<K>, args: A) -> Result<bool, DispatchError> {
        let event = event.into();
        self.deliver(&event, &args, self)
    }

    /// Snapshot of the callbacks registered on `event`.
    ///
    /// The returned vector is detached from the dispatcher.
    pub fn listeners(&self, event: impl Into<Channel<K>>) -> Vec<Callback<K, A>> {
        let channel = event.into();
        self.table.borrow().callbacks(channel.as_ref())
    }

    /// Channels that currently have at least one listener.
    ///
    /// The order is stable while the table is unchanged and otherwise
    /// unspecified.
    pub fn event_names(&self) -> Vec<Channel<K>> {
        self.table.borrow().channels()
    }

    /// Remove the registrations on `event` selected by `matcher`.
    ///
    /// [`Matcher::any`] clears the event.
    pub fn remove_listener(&self, event: impl Into<Channel<K>>, matcher: &Matcher<K, A>) -> &Self {
        let channel = event.into();
        let removed = self.table.borrow_mut().remove(channel.as_ref(), matcher);
        #[cfg(feature = "tracing")]
        tracing::trace!(removed, wildcard = channel.is_wildcard(), "removed listeners");
        #[cfg(not(feature = "tracing"))]
        let _ = removed;
        self
    }

    /// Remove every registration of `callback` on `event`.
    pub fn off(&self, event: impl Into<Channel<K>>, callback: &Callback<K, A>) -> &Self {
        self.remove_listener(event, &Matcher::callback(callback))
    }

    /// Remove all listeners of `event`.
    pub fn remove_all_listeners(&self, event: impl Into<Channel<K>>) -> &Self {
        let channel = event.into();
        self.table.borrow_mut().clear_channel(channel.as_ref());
        self
    }

    /// Remove all listeners of every event, the wildcard channel included.
    pub fn clear(&self) -> &Self {
        self.table.borrow_mut().clear();
        self
    }

    /// Number of channels with listeners.
    pub fn len(&self) -> usize {
        self.table.borrow().len()
    }

    /// Returns `true` if no listener is registered anywhere.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn add(
        &self,
        channel: Channel<K>,
        callback: Callback<K, A>,
        context: Option<Context>,
        once: bool,
    ) -> &Self {
        self.table
            .borrow_mut()
            .insert(channel, callback, context, once);
        self
    }

    fn downcast(listener: &dyn Any) -> Result<Callback<K, A>, DispatchError> {
        match listener.downcast_ref::<Callback<K, A>>() {
            Some(callback) => Ok(callback.clone()),
            None => {
                #[cfg(feature = "tracing")]
                tracing::warn!("rejected listener registration: not a callback");
                Err(DispatchError::InvalidArgument(
                    "the listener must be a callback",
                ))
            }
        }
    }

    /// Deliver an emission with `owner` as the receiver of unbound records.
    ///
    /// Used by dispatchers that wrap this one and should appear as the owner
    /// to the listeners they store here.
    pub(crate) fn deliver(
        &self,
        event: &K,
        args: &A,
        owner: &dyn Emitter<K, A>,
    ) -> Result<bool, DispatchError> {
        let (wildcard, own) = {
            let table = self.table.borrow();
            (
                table.snapshot(Channel::Wildcard),
                table.snapshot(Channel::Event(event)),
            )
        };

        #[cfg(feature = "tracing")]
        tracing::trace!(
            wildcard = wildcard.as_ref().map_or(0, Vec::len),
            own = own.as_ref().map_or(0, Vec::len),
            "emitting event"
        );

        if let Some(records) = wildcard {
            self.run(Channel::Wildcard, &records, event, args, owner)?;
        }
        let Some(records) = own else {
            return Ok(false);
        };
        self.run(Channel::Event(event), &records, event, args, owner)?;
        Ok(true)
    }

    fn run(
        &self,
        channel: Channel<&K>,
        records: &[Record<K, A>],
        event: &K,
        args: &A,
        owner: &dyn Emitter<K, A>,
    ) -> Result<(), DispatchError> {
        for record in records {
            if record.once && !self.claim(channel, record.id) {
                continue;
            }
            let receiver = match &record.context {
                Some(context) => Receiver::Bound(context),
                None => Receiver::Owner(owner),
            };
            record
                .callback
                .call(&Call::new(event, channel, args, receiver))
                .map_err(DispatchError::Listener)?;
        }
        Ok(())
    }

    fn claim(&self, channel: Channel<&K>, id: u64) -> bool {
        self.table.borrow_mut().claim(channel, id)
    }
}

impl<K, A> Emitter<K, A> for Dispatcher<K, A>
where
    K: Eq + Hash + Clone + 'static,
    A: 'static,
{
    fn on(&self, channel: Channel<K>, callback: Callback<K, A>, context: Option<Context>) {
        self.add(channel, callback, context, false);
    }

    fn remove_listener(&self, channel: Channel<K>, matcher: &Matcher<K, A>) {
        Dispatcher::remove_listener(self, channel, matcher);
    }

    fn emit(&self, event: K, args: A) -> Result<bool, DispatchError> {
        Dispatcher::emit(self, event, args)
    }

    fn listeners(&self, channel: &Channel<K>) -> Vec<Callback<K, A>> {
        self.table.borrow().callbacks(channel.as_ref())
    }
}
