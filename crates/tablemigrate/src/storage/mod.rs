//! Table store abstraction.
//!
//! The migration steps only talk to a [`TableStore`]. The DynamoDB
//! implementation is used by the binary; the in-memory implementation backs
//! the unit tests.

pub mod dynamodb;

#[cfg(test)]
pub mod inmemory;

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;

use tablemigrate_core::backup::{BackupHandle, BackupStatus};
use tablemigrate_core::storage::{KeyProjection, KeySchema, Result};

/// A single item (or a key tuple), copied verbatim between tables.
pub type Item = HashMap<String, AttributeValue>;

/// Parameters of one scan call.
#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    pub table_name: String,
    /// Restrict returned attributes; `None` fetches whole items.
    pub projection: Option<KeyProjection>,
    pub consistent_read: bool,
    /// Continuation token from the previous page.
    pub exclusive_start_key: Option<Item>,
}

impl ScanRequest {
    /// Full-attribute, strongly consistent scan.
    pub fn full(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            projection: None,
            consistent_read: true,
            exclusive_start_key: None,
        }
    }

    /// Scan returning only the attributes of `projection`.
    pub fn keys_only(table_name: impl Into<String>, projection: KeyProjection) -> Self {
        Self {
            table_name: table_name.into(),
            projection: Some(projection),
            consistent_read: false,
            exclusive_start_key: None,
        }
    }

    pub fn with_consistent_read(mut self, consistent_read: bool) -> Self {
        self.consistent_read = consistent_read;
        self
    }
}

/// One page of scan results.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<Item>,
    /// Present when more pages may follow.
    pub last_evaluated_key: Option<Item>,
}

/// Remote operations the migration needs from a table store.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Requests an on-demand backup of `table_name`.
    async fn create_backup(&self, table_name: &str, backup_name: &str) -> Result<BackupHandle>;

    /// Fetches the current status of a backup.
    async fn describe_backup(&self, backup_arn: &str) -> Result<BackupStatus>;

    /// Fetches the primary key schema of `table_name`.
    async fn key_schema(&self, table_name: &str) -> Result<KeySchema>;

    /// Fetches one page of items.
    async fn scan_page(&self, request: &ScanRequest) -> Result<Page>;

    /// Deletes up to 25 items by key.
    ///
    /// Returns the keys the service left unprocessed.
    async fn batch_delete(&self, table_name: &str, keys: Vec<Item>) -> Result<Vec<Item>>;

    /// Writes one item, overwriting any item with the same key.
    async fn put_item(&self, table_name: &str, item: Item) -> Result<()>;
}
