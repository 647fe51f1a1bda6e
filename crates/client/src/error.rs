//! Unified error type for session and resource operations.
//!
//! Each store records what it needs for its own bookkeeping (`last_error`,
//! `loading`) and then hands one of these back to the caller, who decides
//! whether to surface it or retry.

use thiserror::Error;

use crate::storage::PersistenceError;

/// Errors returned by the booking client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Login or registration was rejected or could not be completed.
    ///
    /// Carries the server's `message` when it sent one.
    #[error("{0}")]
    Auth(String),

    /// A resource request was rejected or could not be completed.
    ///
    /// Carries the server's `message` when it sent one.
    #[error("{0}")]
    Request(String),

    /// Durable session storage failed.
    #[error("Session storage error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl ClientError {
    /// The user-facing message of an auth or request failure.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Auth(msg) | Self::Request(msg) => msg.clone(),
            Self::Persistence(err) => err.to_string(),
        }
    }
}

/// Result alias for client operations.
pub type Result<T, E = ClientError> = std::result::Result<T, E>;
