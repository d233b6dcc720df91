//! Hierarchical dispatchers.
//!
//! A [`HierarchicalDispatcher`] keeps its listeners in a dispatcher of its own
//! and links to a parent through exactly one registration: a forwarding
//! callback on the parent's wildcard channel. Everything the parent emits is
//! re-emitted locally; everything emitted on the child goes to the parent, and
//! comes back down through that same link.
//!
//! Attaching and detaching touch only the forwarder, however many listeners
//! the child holds.

mod options;

pub use options::ChildOptions;

use crate::dispatcher::Dispatcher;
use chime_core::{Call, Callback, Channel, Context, DispatchError, Emitter, Matcher};
use std::{
    cell::Cell,
    fmt,
    hash::Hash,
    rc::{Rc, Weak},
};

struct Local<K, A> {
    dispatcher: Dispatcher<K, A>,
    enabled: Cell<bool>,
}

/// A dispatcher that mirrors its parent's traffic.
///
/// The parent is borrowed, never owned. Dropping the child detaches it.
///
/// # Example
///
/// ```rust
/// use chime_std::{
///     dispatcher::Dispatcher,
///     hierarchy::{ChildOptions, HierarchicalDispatcher},
///     testing::Recorder,
/// };
///
/// let parent = Dispatcher::<&str, i32>::new();
/// let child = HierarchicalDispatcher::new(&parent, ChildOptions::default());
///
/// let seen = Recorder::new();
/// child.on("evt", seen.callback(|call| *call.args()));
///
/// parent.emit("evt", 42).unwrap();
/// child.disable();
/// parent.emit("evt", 7).unwrap();
///
/// assert_eq!(seen.values(), vec![42]);
/// ```
pub struct HierarchicalDispatcher<'p, K, A, P>
where
    P: Emitter<K, A> + ?Sized,
{
    parent: &'p P,
    local: Rc<Local<K, A>>,
    forwarder: Callback<K, A>,
}

impl<'p, K, A, P> HierarchicalDispatcher<'p, K, A, P>
where
    K: Eq + Hash + Clone + 'static,
    A: 'static,
    P: Emitter<K, A> + ?Sized,
{
    /// Create a child of `parent`.
    pub fn new(parent: &'p P, options: ChildOptions) -> Self {
        let local = Rc::new(Local {
            dispatcher: Dispatcher::new(),
            enabled: Cell::new(false),
        });
        let forwarder = forwarder(Rc::downgrade(&local));
        let child = Self {
            parent,
            local,
            forwarder,
        };
        if options.auto_enable {
            child.enable();
        }
        child
    }

    /// Register `callback` on `event` in this dispatcher.
    pub fn on(&self, event: impl Into<Channel<K>>, callback: Callback<K, A>) -> &Self {
        self.local.dispatcher.on(event, callback);
        self
    }

    /// Register `callback` on `event` in this dispatcher, bound to `context`.
    pub fn on_with(
        &self,
        event: impl Into<Channel<K>>,
        callback: Callback<K, A>,
        context: Context,
    ) -> &Self {
        self.local.dispatcher.on_with(event, callback, context);
        self
    }

    /// Alias of [`on`](Self::on).
    pub fn add_listener(&self, event: impl Into<Channel<K>>, callback: Callback<K, A>) -> &Self {
        self.on(event, callback)
    }

    /// Remove local registrations selected by `matcher`.
    ///
    /// A matcher that names a callback but no context only selects records
    /// bound to this dispatcher; records registered with
    /// [`on_with`](Self::on_with) are removed by naming their context.
    pub fn remove_listener(&self, event: impl Into<Channel<K>>, matcher: &Matcher<K, A>) -> &Self {
        remove_scoped(&self.local.dispatcher, event.into(), matcher);
        self
    }

    /// Remove the registrations of `callback` on `event` that are bound to
    /// this dispatcher.
    pub fn off(&self, event: impl Into<Channel<K>>, callback: &Callback<K, A>) -> &Self {
        self.remove_listener(event, &Matcher::callback(callback))
    }

    /// Emit on the parent.
    ///
    /// Local listeners see the event only through the parent's wildcard
    /// channel, that is, only while this dispatcher is enabled.
    pub fn emit(&self, event: impl Into<K>, args: A) -> Result<bool, DispatchError> {
        self.parent.emit(event.into(), args)
    }

    /// Emit on this dispatcher only, bypassing the parent.
    pub fn emit_local(&self, event: impl Into<K>, args: A) -> Result<bool, DispatchError> {
        let event = event.into();
        self.local.dispatcher.deliver(&event, &args, self)
    }

    /// Snapshot of the local callbacks registered on `event`.
    pub fn listeners(&self, event: impl Into<Channel<K>>) -> Vec<Callback<K, A>> {
        self.local.dispatcher.listeners(event)
    }

    /// The dispatcher holding this child's listeners.
    pub fn local(&self) -> &Dispatcher<K, A> {
        &self.local.dispatcher
    }
}

impl<'p, K, A, P> HierarchicalDispatcher<'p, K, A, P>
where
    P: Emitter<K, A> + ?Sized,
{
    /// Attach to the parent. No-op if already attached.
    pub fn enable(&self) {
        if self.local.enabled.get() {
            return;
        }
        self.parent
            .on(Channel::Wildcard, self.forwarder.clone(), None);
        self.local.enabled.set(true);
        #[cfg(feature = "tracing")]
        tracing::debug!(forwarder = ?self.forwarder, "hierarchical link enabled");
    }

    /// Detach from the parent. No-op if already detached.
    ///
    /// Removes the forwarder and nothing else from the parent.
    pub fn disable(&self) {
        if !self.local.enabled.get() {
            return;
        }
        self.parent
            .remove_listener(Channel::Wildcard, &Matcher::callback(&self.forwarder));
        self.local.enabled.set(false);
        #[cfg(feature = "tracing")]
        tracing::debug!(forwarder = ?self.forwarder, "hierarchical link disabled");
    }

    /// Returns `true` while attached to the parent.
    pub fn is_enabled(&self) -> bool {
        self.local.enabled.get()
    }

    /// The parent dispatcher.
    pub fn parent(&self) -> &'p P {
        self.parent
    }
}

impl<K, A, P> Drop for HierarchicalDispatcher<'_, K, A, P>
where
    P: Emitter<K, A> + ?Sized,
{
    fn drop(&mut self) {
        self.disable();
    }
}

impl<K, A, P> fmt::Debug for HierarchicalDispatcher<'_, K, A, P>
where
    P: Emitter<K, A> + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HierarchicalDispatcher")
            .field("enabled", &self.local.enabled.get())
            .finish_non_exhaustive()
    }
}

impl<K, A, P> Emitter<K, A> for HierarchicalDispatcher<'_, K, A, P>
where
    K: Eq + Hash + Clone + 'static,
    A: 'static,
    P: Emitter<K, A> + ?Sized,
{
    fn on(&self, channel: Channel<K>, callback: Callback<K, A>, context: Option<Context>) {
        Emitter::on(&self.local.dispatcher, channel, callback, context);
    }

    fn remove_listener(&self, channel: Channel<K>, matcher: &Matcher<K, A>) {
        remove_scoped(&self.local.dispatcher, channel, matcher);
    }

    fn emit(&self, event: K, args: A) -> Result<bool, DispatchError> {
        self.parent.emit(event, args)
    }

    fn listeners(&self, channel: &Channel<K>) -> Vec<Callback<K, A>> {
        Emitter::listeners(&self.local.dispatcher, channel)
    }
}

fn remove_scoped<K, A>(local: &Dispatcher<K, A>, channel: Channel<K>, matcher: &Matcher<K, A>)
where
    K: Eq + Hash + Clone + 'static,
    A: 'static,
{
    if matcher.is_any() || matcher.has_context_filter() {
        local.remove_listener(channel, matcher);
    } else {
        local.remove_listener(channel, &matcher.clone().owner_bound());
    }
}

/// The owner seen by a child's listeners during a forwarded emission:
/// registrations stay on the child, emissions go to the parent that
/// delivered the call.
struct Link<'a, K, A> {
    local: &'a Dispatcher<K, A>,
    parent: &'a dyn Emitter<K, A>,
}

impl<K, A> Emitter<K, A> for Link<'_, K, A>
where
    K: Eq + Hash + Clone + 'static,
    A: 'static,
{
    fn on(&self, channel: Channel<K>, callback: Callback<K, A>, context: Option<Context>) {
        Emitter::on(self.local, channel, callback, context);
    }

    fn remove_listener(&self, channel: Channel<K>, matcher: &Matcher<K, A>) {
        remove_scoped(self.local, channel, matcher);
    }

    fn emit(&self, event: K, args: A) -> Result<bool, DispatchError> {
        self.parent.emit(event, args)
    }

    fn listeners(&self, channel: &Channel<K>) -> Vec<Callback<K, A>> {
        Emitter::listeners(self.local, channel)
    }
}

// Holds the child weakly: the parent's table must not keep it alive.
fn forwarder<K, A>(local: Weak<Local<K, A>>) -> Callback<K, A>
where
    K: Eq + Hash + Clone + 'static,
    A: 'static,
{
    Callback::<K, A>::fallible(move |call: &Call<'_, K, A>| {
        let Some(local) = local.upgrade() else {
            return Ok(());
        };
        if !local.enabled.get() {
            return Ok(());
        }
        let dispatcher = &local.dispatcher;
        match call.owner() {
            Some(parent) => {
                let link = Link {
                    local: dispatcher,
                    parent,
                };
                dispatcher.deliver(call.event(), call.args(), &link)?;
            }
            None => {
                dispatcher.deliver(call.event(), call.args(), dispatcher)?;
            }
        }
        Ok(())
    })
}
