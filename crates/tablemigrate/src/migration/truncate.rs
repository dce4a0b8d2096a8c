//! Truncate step: delete every item of a table by key.

use tablemigrate_core::storage::MAX_BATCH_WRITE_ITEMS;

use super::scan::ScanCursor;
use crate::error::{MigrationError, Result};
use crate::storage::{Item, ScanRequest, TableStore};

/// Rounds of immediate resubmission for keys left unprocessed by a batch.
pub const MAX_UNPROCESSED_ROUNDS: usize = 8;

/// Deletes every item of `table_name` and returns how many were deleted.
///
/// Only key attributes are scanned. The traversal stops on an empty page or
/// when no continuation token is returned.
pub async fn truncate_table(store: &dyn TableStore, table_name: &str) -> Result<u64> {
    let schema = store.key_schema(table_name).await?;
    tracing::info!(
        table = table_name,
        keys = ?schema.attribute_names(),
        "Truncating table"
    );

    let mut cursor = ScanCursor::new(ScanRequest::keys_only(table_name, schema.projection()));
    let mut deleted = 0u64;

    while let Some(page) = cursor.next_page(store).await? {
        if page.items.is_empty() {
            break;
        }

        let count = page.items.len();
        for chunk in page.items.chunks(MAX_BATCH_WRITE_ITEMS) {
            delete_batch(store, table_name, chunk.to_vec()).await?;
        }
        deleted += count as u64;
        tracing::debug!(table = table_name, page = count, deleted, "Deleted page");
    }

    tracing::info!(table = table_name, deleted, "Truncate complete");
    Ok(deleted)
}

/// Deletes one batch, resubmitting unprocessed keys a bounded number of times.
async fn delete_batch(store: &dyn TableStore, table_name: &str, keys: Vec<Item>) -> Result<()> {
    let mut pending = keys;

    for round in 0..MAX_UNPROCESSED_ROUNDS {
        pending = store.batch_delete(table_name, pending).await?;
        if pending.is_empty() {
            return Ok(());
        }
        tracing::warn!(
            table = table_name,
            unprocessed = pending.len(),
            round = round + 1,
            "Resubmitting unprocessed deletes"
        );
    }

    Err(MigrationError::UnprocessedItems {
        table_name: table_name.to_string(),
        remaining: pending.len(),
        rounds: MAX_UNPROCESSED_ROUNDS,
    })
}
