//! Custom error types for the profile editor.
//!
//! This module provides the error taxonomy shared by the record box,
//! the preference store, the theme store and the editor workflow.

use thiserror::Error;

/// Main error type for profile editor operations.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// Storage medium could not be opened, read or written.
    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    /// Caller supplied a stale or invalid record index.
    #[error("Index {index} out of range for store with {len} record(s)")]
    IndexOutOfRange { index: usize, len: usize },

    /// An external capability (e.g. photo library access) was declined.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Generic invalid input error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ProfileError {
    /// Build a `StorageUnavailable` error from any displayable message.
    pub fn storage(message: impl Into<String>) -> Self {
        ProfileError::StorageUnavailable {
            message: message.into(),
        }
    }

    /// Whether the caller can recover by re-reading state and retrying.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ProfileError::StorageUnavailable { .. })
    }
}

impl From<std::io::Error> for ProfileError {
    fn from(e: std::io::Error) -> Self {
        ProfileError::storage(e.to_string())
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(e: serde_json::Error) -> Self {
        ProfileError::storage(format!("malformed data: {}", e))
    }
}

/// Result type alias for profile editor operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
