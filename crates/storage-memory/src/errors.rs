//! Storage-specific error types for the in-memory store.
//!
//! These errors are internal to the storage layer and are converted to
//! `money_diary_core::Error` before being returned to callers.

use money_diary_core::errors::{DatabaseError, Error};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Snapshot file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => Error::Database(DatabaseError::ConnectionFailed(e.to_string())),
            StorageError::Serialization(e) => {
                Error::Database(DatabaseError::Malformed(e.to_string()))
            }
        }
    }
}

/// Result alias used inside this crate.
pub type Result<T> = std::result::Result<T, StorageError>;
