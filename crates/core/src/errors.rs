//! Core error types for the money diary engine.
//!
//! This module defines store-agnostic error types. Adapter-specific errors
//! (DynamoDB, files, in-memory) are converted to these types by the storage
//! layer before they reach a service.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Message returned to callers in place of internal failure details.
pub const GENERIC_FAILURE_MESSAGE: &str = "A server error occurred";

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Permission denied: {0}")]
    Permission(String),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Backup failed: {0}")]
    Backup(#[from] BackupError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(ValidationError::InvalidInput(message.into()))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Text that is safe to hand back to the caller.
    ///
    /// Persistence and unexpected failures never echo store-specific detail;
    /// callers get a generic message while the full error is logged.
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { .. } | Self::Permission(_) => self.to_string(),
            Self::Database(_)
            | Self::Backup(_)
            | Self::InvalidConfigValue(_)
            | Self::Unexpected(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Store-agnostic error type for collaborator operations.
///
/// Uses `String` for all details so adapters can convert their own error
/// types into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to reach or construct the store client.
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// A read or write failed to execute.
    #[error("Store query failed: {0}")]
    QueryFailed(String),

    /// A conditional write found a different prior value.
    #[error("Conditional write rejected: {0}")]
    ConditionFailed(String),

    /// Stored data could not be decoded.
    #[error("Stored record is malformed: {0}")]
    Malformed(String),

    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),
}

/// Failures reported by a backup exporter.
///
/// These never reach the caller of a mutation; the backup worker logs them.
#[derive(Error, Debug)]
pub enum BackupError {
    /// The export target could not be reached.
    #[error("Backup target unavailable: {0}")]
    Unavailable(String),

    /// The target rejected or failed a write.
    #[error("Backup export failed: {0}")]
    Export(String),

    /// A row to update or delete does not exist in the target.
    #[error("Backup row not found: {0}")]
    RowNotFound(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Database(DatabaseError::Malformed(err.to_string()))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("Expense", "abc");
        assert_eq!(err.to_string(), "Expense not found: abc");
        assert!(err.is_not_found());
        assert_eq!(err.client_message(), "Expense not found: abc");
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = Error::validation("amount must be positive");
        assert!(err.is_validation());
        assert_eq!(err.client_message(), "amount must be positive");
    }

    #[test]
    fn test_database_error_is_hidden_from_caller() {
        let err = Error::Database(DatabaseError::QueryFailed(
            "ProvisionedThroughputExceededException: table expenses".to_string(),
        ));
        assert_eq!(err.client_message(), GENERIC_FAILURE_MESSAGE);
        assert!(err.to_string().contains("ProvisionedThroughput"));
    }

    #[test]
    fn test_missing_field_display() {
        let err: Error = ValidationError::MissingField("date".to_string()).into();
        assert_eq!(err.client_message(), "Required field 'date' is missing");
    }
}
