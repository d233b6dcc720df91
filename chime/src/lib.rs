//! # chime - Synchronous In-Process Event Dispatching
//!
//! `chime` delivers named events to registered listeners synchronously, in
//! registration order, on the calling thread. Listeners can fire once, can be
//! bound to a context, and can observe every emission through the wildcard
//! channel. Hierarchical dispatchers build trees on top of that.
//!
//! ## Quick Start
//!
//! ```rust
//! use chime::prelude::*;
//!
//! let root = Dispatcher::<&str, i32>::new();
//! let child = HierarchicalDispatcher::new(&root, ChildOptions::default());
//!
//! let hits = chime::testing::CallCounter::new();
//! child.on("tick", hits.callback());
//!
//! root.emit("tick", 1)?;   // reaches the child through the wildcard link
//! child.emit("tick", 2)?;  // goes up to the root and back down
//! assert_eq!(hits.count(), 2);
//! # Ok::<(), chime::DispatchError>(())
//! ```
//!
//! ## The wildcard channel
//!
//! [`Channel::Wildcard`] is reserved: its listeners run before the named
//! listeners of every emission, and read the emitted identifier from
//! [`Call::event`]. Application identifiers always live in [`Channel::Event`],
//! so they cannot collide with it.
//!
//! ## Errors
//!
//! A listener that fails aborts the emission it runs in: the error is returned
//! from `emit` as [`DispatchError::Listener`] and the remaining listeners of the
//! round are skipped.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use chime_core::{
    // Error types
    BoxError,
    // Callbacks
    Call,
    Callback,
    // Channels
    Channel,
    Context,
    DispatchError,
    // Capability
    Emitter,
    Matcher,
    Receiver,
};

pub use chime_std::{
    dispatcher::Dispatcher,
    hierarchy::{ChildOptions, HierarchicalDispatcher},
};

/// Testing utilities.
pub mod testing {
    pub use chime_std::testing::{CallCounter, Recorder, failing};
}

/// Prelude module - common imports for chime.
///
/// # Usage
///
/// ```rust
/// use chime::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Call, Callback, Channel, ChildOptions, Context, DispatchError, Dispatcher, Emitter,
        HierarchicalDispatcher, Matcher, Receiver,
    };
}
