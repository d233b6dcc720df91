//! # chime-core
//!
//! Core types for the chime event dispatcher.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that only needs to talk *to* a dispatcher (register, remove, emit) without
//! pulling in the standard implementations from `chime-std`.
//!
//! # Vocabulary
//!
//! - [`Channel`] - The key a listener is registered under. A named event, or
//!   the reserved [`Channel::Wildcard`] that observes every emission.
//! - [`Callback`] - A shared listener handle. Identity is what removal matches.
//! - [`Call`] - What a callback receives: event, arguments and [`Receiver`].
//! - [`Context`] - A value bound as a callback's receiver.
//! - [`Matcher`] - Selects registrations for removal.
//! - [`Emitter`] - The capability every dispatcher exposes; the contract a
//!   hierarchical dispatcher requires of its parent.
//!
//! # Threading
//!
//! Everything here is single-threaded: callbacks and contexts are `Rc`-based
//! and therefore neither `Send` nor `Sync`.
//!
//! # Error Types
//!
//! - [`DispatchError`] - Registration and emission errors
//! - [`BoxError`] - The error a fallible callback returns

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod callback;
mod channel;
mod context;
mod emitter;
mod error;
mod matcher;

// Re-exports
pub use callback::{Call, Callback, Receiver};
pub use channel::Channel;
pub use context::Context;
pub use emitter::Emitter;
pub use error::{BoxError, DispatchError};
pub use matcher::Matcher;
