//! The dispatcher capability trait.

use crate::{
    callback::Callback, channel::Channel, context::Context, error::DispatchError,
    matcher::Matcher,
};

/// Something listeners can subscribe to and events can be emitted on.
///
/// This is the contract a hierarchical dispatcher requires of its parent, so
/// any implementor can sit anywhere in a dispatcher tree. It is object safe;
/// callbacks reach their owning dispatcher through `&dyn Emitter`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot act as an emitter for `{K}` events",
    label = "missing `Emitter` implementation",
    note = "Implement `Emitter<{K}, {A}>` to use this type as a parent dispatcher."
)]
pub trait Emitter<K, A> {
    /// Register `callback` on `channel`. A `None` context binds the callback
    /// to the dispatcher itself.
    fn on(&self, channel: Channel<K>, callback: Callback<K, A>, context: Option<Context>);

    /// Remove the registrations on `channel` selected by `matcher`.
    fn remove_listener(&self, channel: Channel<K>, matcher: &Matcher<K, A>);

    /// Emit `event` with `args`.
    ///
    /// Returns `Ok(true)` if the event had listeners of its own.
    fn emit(&self, event: K, args: A) -> Result<bool, DispatchError>;

    /// Snapshot of the callbacks registered on `channel`, in registration order.
    fn listeners(&self, channel: &Channel<K>) -> Vec<Callback<K, A>>;
}

impl<K, A, T> Emitter<K, A> for &T
where
    T: Emitter<K, A> + ?Sized,
{
    fn on(&self, channel: Channel<K>, callback: Callback<K, A>, context: Option<Context>) {
        (**self).on(channel, callback, context)
    }

    fn remove_listener(&self, channel: Channel<K>, matcher: &Matcher<K, A>) {
        (**self).remove_listener(channel, matcher)
    }

    fn emit(&self, event: K, args: A) -> Result<bool, DispatchError> {
        (**self).emit(event, args)
    }

    fn listeners(&self, channel: &Channel<K>) -> Vec<Callback<K, A>> {
        (**self).listeners(channel)
    }
}
