use thiserror::Error;

/// Errors that can occur when talking to the remote table store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Table not found: {table}")]
    TableNotFound { table: String },
    #[error("Backup not found: {backup_arn}")]
    BackupNotFound { backup_arn: String },
    #[error("Throttled: {0}")]
    Throttled(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for table store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
