//! Error types for chime.
//!
//! - [`DispatchError`] - Errors surfaced by registration and emission
//! - [`BoxError`] - What a callback returns when it fails

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while registering listeners or emitting events.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A value passed for registration is not a callback.
    ///
    /// Nothing is registered when this is returned.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A listener failed during emission.
    ///
    /// Delivery stops at the failing listener. Listeners later in the same
    /// round are not invoked.
    #[error("listener error")]
    Listener(#[source] BoxError),
}

impl DispatchError {
    /// Returns `true` if this error came out of a listener.
    pub fn is_listener(&self) -> bool {
        matches!(self, DispatchError::Listener(_))
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::Listener(err)
    }
}
