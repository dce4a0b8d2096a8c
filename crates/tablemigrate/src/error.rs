//! Error types for migration steps.

use std::time::Duration;

use tablemigrate_core::backup::BackupStatus;
use tablemigrate_core::storage::StoreError;
use thiserror::Error;

/// Result type alias for migration steps.
pub type Result<T> = std::result::Result<T, MigrationError>;

/// Errors that can end a migration run.
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Backup '{backup_name}' was not available after {}s", .waited.as_secs())]
    BackupTimeout {
        backup_name: String,
        waited: Duration,
    },

    #[error("Backup '{backup_name}' ended in status {status}")]
    BackupFailed {
        backup_name: String,
        status: BackupStatus,
    },

    #[error("{remaining} item(s) still unprocessed in '{table_name}' after {rounds} rounds")]
    UnprocessedItems {
        table_name: String,
        remaining: usize,
        rounds: usize,
    },

    #[error("Verification failed for '{table_name}': copied {expected} item(s), found {actual}")]
    VerificationFailed {
        table_name: String,
        expected: u64,
        actual: u64,
    },
}
