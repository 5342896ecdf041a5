//! Error types for state save and restore.

use thiserror::Error;

/// Errors that can occur while saving or restoring plugin state.
#[derive(Debug, Error)]
pub enum StateError {
    /// State bytes are not valid JSON, or serialization failed
    #[error("malformed state JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Top-level JSON value is not an object
    #[error("state is not a JSON object")]
    NotAnObject,

    /// A parameter entry holds something other than a number
    #[error("parameter '{key}' has a non-numeric value")]
    NonNumeric {
        /// Key of the offending entry.
        key: String,
    },

    /// A key does not name a known stable parameter ID (strict loading only)
    #[error("unknown parameter ID '{key}'")]
    UnknownId {
        /// Key of the offending entry.
        key: String,
    },
}

impl StateError {
    /// Create a non-numeric value error.
    pub fn non_numeric(key: impl Into<String>) -> Self {
        StateError::NonNumeric { key: key.into() }
    }

    /// Create an unknown ID error.
    pub fn unknown_id(key: impl Into<String>) -> Self {
        StateError::UnknownId { key: key.into() }
    }
}
