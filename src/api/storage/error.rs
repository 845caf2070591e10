//! Storage error types for the storage backends.

use thiserror::Error;

/// Storage operation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Entity not found
    #[error("Entity not found: {entity_type} with id {entity_id}")]
    NotFound {
        entity_type: String,
        entity_id: String,
    },
    /// Database connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
    /// Stored data could not be mapped onto the domain model
    #[error("Corrupt record: {0}")]
    Corrupt(String),
    /// General storage error
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StorageError::NotFound {
                entity_type: "row".to_string(),
                entity_id: "unknown".to_string(),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StorageError::ConnectionError(err.to_string())
            }
            other => StorageError::Other(other.to_string()),
        }
    }
}
