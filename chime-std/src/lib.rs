//! # chime-std
//!
//! Standard implementations for the chime event dispatcher.
//!
//! This crate provides:
//! - **Leaf dispatching**: [`Dispatcher`](dispatcher::Dispatcher)
//! - **Dispatcher trees**: [`HierarchicalDispatcher`](hierarchy::HierarchicalDispatcher),
//!   [`ChildOptions`](hierarchy::ChildOptions)
//! - **Testing utilities**: [`Recorder`](testing::Recorder),
//!   [`CallCounter`](testing::CallCounter)
//!
//! With the `tracing` feature (on by default) emissions, removals and link
//! changes are reported through `tracing` at trace/debug level.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use chime_core;

// Modules
pub mod dispatcher;
pub mod hierarchy;
pub mod testing;
