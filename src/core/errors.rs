//! Domain errors for roster operations
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use thiserror::Error;

/// Errors surfaced by the roster store and its persistence backend.
///
/// All variants are user-recoverable; command handlers render them as
/// replies and nothing here may take the process down.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Malformed or semantically invalid input on add
    #[error("{message}")]
    Validation { message: String },

    /// Case-insensitive handle collision on add
    #[error("handle @{handle} is already taken")]
    Duplicate { handle: String },

    /// Remove with no matching record
    #[error("no matching person found")]
    NotFound,

    /// Backend read/write failure; logged and swallowed by the store
    #[error("persistence failure: {message}")]
    Persistence { message: String },
}

impl RosterError {
    pub fn validation(message: impl Into<String>) -> Self {
        RosterError::Validation {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        RosterError::Persistence {
            message: message.into(),
        }
    }
}
