//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors raised by a versioned key-value state store.
#[derive(Debug, Clone, Error)]
pub enum StateError {
    /// Backend read or write failed.
    #[error("State backend error: {0}")]
    Backend(String),

    /// Stored bytes could not be decoded, or a value could not be encoded.
    #[error("State codec error for key {key}: {reason}")]
    Codec { key: String, reason: String },
}

impl StateError {
    /// Build a codec error, rendering the key lossily for diagnostics.
    pub fn codec(key: &[u8], reason: impl ToString) -> Self {
        StateError::Codec {
            key: String::from_utf8_lossy(key).into_owned(),
            reason: reason.to_string(),
        }
    }
}
