//! Copy step: stream every item of the source table into the destination.

use super::scan::ScanCursor;
use crate::error::Result;
use crate::storage::{ScanRequest, TableStore};

/// Copies all items from `source_table` into `destination_table`.
///
/// The source is read with strongly consistent, full-attribute scans and
/// each item is written with its own put, in scan order. Items with the same
/// key in the destination are overwritten. The first failed write aborts the
/// copy.
pub async fn copy_table(
    store: &dyn TableStore,
    source_table: &str,
    destination_table: &str,
) -> Result<u64> {
    tracing::info!(
        source = source_table,
        destination = destination_table,
        "Copying items"
    );

    let mut cursor = ScanCursor::new(ScanRequest::full(source_table));
    let mut copied = 0u64;

    while let Some(page) = cursor.next_page(store).await? {
        let count = page.items.len();
        for item in page.items {
            store.put_item(destination_table, item).await?;
            copied += 1;
        }
        tracing::debug!(page = count, copied, "Copied page");
    }

    tracing::info!(
        source = source_table,
        destination = destination_table,
        copied,
        "Copy complete"
    );
    Ok(copied)
}
