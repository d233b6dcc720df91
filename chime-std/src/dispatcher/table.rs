//! The event table behind a [`Dispatcher`](super::Dispatcher).

use chime_core::{Callback, Channel, Context, Matcher};
use std::{collections::HashMap, hash::Hash};

/// One registered subscription.
pub(crate) struct Record<K, A> {
    pub(crate) id: u64,
    pub(crate) callback: Callback<K, A>,
    pub(crate) context: Option<Context>,
    pub(crate) once: bool,
}

impl<K, A> Clone for Record<K, A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: self.callback.clone(),
            context: self.context.clone(),
            once: self.once,
        }
    }
}

/// Ordered listener sequences keyed by channel.
///
/// A channel present in the table always has at least one record. The
/// wildcard sequence is kept apart from the named ones; an empty wildcard
/// sequence counts as absent.
pub(crate) struct EventTable<K, A> {
    named: HashMap<K, Vec<Record<K, A>>>,
    wildcard: Vec<Record<K, A>>,
    next_id: u64,
}

impl<K, A> Default for EventTable<K, A> {
    fn default() -> Self {
        Self {
            named: HashMap::new(),
            wildcard: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K, A> EventTable<K, A>
where
    K: Eq + Hash + Clone,
{
    /// Append a record and return its id.
    pub(crate) fn insert(
        &mut self,
        channel: Channel<K>,
        callback: Callback<K, A>,
        context: Option<Context>,
        once: bool,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let record = Record {
            id,
            callback,
            context,
            once,
        };
        match channel {
            Channel::Event(key) => self.named.entry(key).or_default().push(record),
            Channel::Wildcard => self.wildcard.push(record),
        }
        id
    }

    /// Copy of the sequence for `channel`, or `None` if the channel is absent.
    pub(crate) fn snapshot(&self, channel: Channel<&K>) -> Option<Vec<Record<K, A>>> {
        self.sequence(channel).map(|records| records.to_vec())
    }

    /// Callbacks registered on `channel`, in registration order.
    pub(crate) fn callbacks(&self, channel: Channel<&K>) -> Vec<Callback<K, A>> {
        self.sequence(channel)
            .map(|records| records.iter().map(|r| r.callback.clone()).collect())
            .unwrap_or_default()
    }

    /// Remove the record with `id` if it is still registered.
    ///
    /// Returns `false` when it was already gone.
    pub(crate) fn claim(&mut self, channel: Channel<&K>, id: u64) -> bool {
        let Some(records) = self.sequence_mut(channel) else {
            return false;
        };
        let Some(pos) = records.iter().position(|r| r.id == id) else {
            return false;
        };
        records.remove(pos);
        self.prune(channel);
        true
    }

    /// Remove every record selected by `matcher`. Returns how many went.
    pub(crate) fn remove(&mut self, channel: Channel<&K>, matcher: &Matcher<K, A>) -> usize {
        if matcher.is_any() {
            return self.clear_channel(channel);
        }
        let Some(records) = self.sequence_mut(channel) else {
            return 0;
        };
        let before = records.len();
        records.retain(|r| !matcher.matches(&r.callback, r.context.as_ref(), r.once));
        let removed = before - records.len();
        self.prune(channel);
        removed
    }

    /// Drop the whole sequence for `channel`. Returns how many records went.
    pub(crate) fn clear_channel(&mut self, channel: Channel<&K>) -> usize {
        match channel {
            Channel::Event(key) => self.named.remove(key).map_or(0, |records| records.len()),
            Channel::Wildcard => std::mem::take(&mut self.wildcard).len(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.named.clear();
        self.wildcard.clear();
    }

    /// Channels that currently have listeners.
    pub(crate) fn channels(&self) -> Vec<Channel<K>> {
        let mut channels: Vec<_> = self.named.keys().cloned().map(Channel::Event).collect();
        if !self.wildcard.is_empty() {
            channels.push(Channel::Wildcard);
        }
        channels
    }

    pub(crate) fn len(&self) -> usize {
        self.named.len() + usize::from(!self.wildcard.is_empty())
    }

    fn sequence(&self, channel: Channel<&K>) -> Option<&Vec<Record<K, A>>> {
        match channel {
            Channel::Event(key) => self.named.get(key),
            Channel::Wildcard if self.wildcard.is_empty() => None,
            Channel::Wildcard => Some(&self.wildcard),
        }
    }

    fn sequence_mut(&mut self, channel: Channel<&K>) -> Option<&mut Vec<Record<K, A>>> {
        match channel {
            Channel::Event(key) => self.named.get_mut(key),
            Channel::Wildcard if self.wildcard.is_empty() => None,
            Channel::Wildcard => Some(&mut self.wildcard),
        }
    }

    // Keeps the "present means non-empty" invariant.
    fn prune(&mut self, channel: Channel<&K>) {
        if let Channel::Event(key) = channel {
            if self.named.get(key).is_some_and(Vec::is_empty) {
                self.named.remove(key);
            }
        }
    }
}
