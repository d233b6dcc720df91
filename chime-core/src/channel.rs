//! Event channels.

use std::fmt;

/// The key a listener is registered under.
///
/// Application events live in [`Channel::Event`]. [`Channel::Wildcard`] is the
/// reserved channel whose listeners observe every emission. Because it is a
/// separate variant, no application identifier can ever collide with it.
///
/// Any event identifier converts into `Channel::Event`:
///
/// ```rust
/// use chime_core::Channel;
///
/// let channel: Channel<&str> = "ping".into();
/// assert_eq!(channel, Channel::Event("ping"));
/// assert!(Channel::<&str>::Wildcard.is_wildcard());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel<K> {
    /// An application event identifier.
    Event(K),
    /// The wildcard channel.
    Wildcard,
}

impl<K> Channel<K> {
    /// Returns `true` for the wildcard channel.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Channel::Wildcard)
    }

    /// Returns the event identifier, or `None` for the wildcard channel.
    pub fn event(&self) -> Option<&K> {
        match self {
            Channel::Event(key) => Some(key),
            Channel::Wildcard => None,
        }
    }

    /// Converts `&Channel<K>` to `Channel<&K>`.
    pub fn as_ref(&self) -> Channel<&K> {
        match self {
            Channel::Event(key) => Channel::Event(key),
            Channel::Wildcard => Channel::Wildcard,
        }
    }
}

impl<K> From<K> for Channel<K> {
    fn from(key: K) -> Self {
        Channel::Event(key)
    }
}

impl<K: fmt::Debug> fmt::Debug for Channel<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Event(key) => key.fmt(f),
            Channel::Wildcard => f.write_str("*"),
        }
    }
}
