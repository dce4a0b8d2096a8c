//! Verify step: compare the destination item count with the copied count.

use super::scan::ScanCursor;
use crate::error::{MigrationError, Result};
use crate::storage::{ScanRequest, TableStore};

/// Counts items in `table_name` and fails unless the count equals `expected`.
pub async fn verify_item_count(
    store: &dyn TableStore,
    table_name: &str,
    expected: u64,
) -> Result<u64> {
    let schema = store.key_schema(table_name).await?;
    let request =
        ScanRequest::keys_only(table_name, schema.projection()).with_consistent_read(true);
    let mut cursor = ScanCursor::new(request);

    let mut actual = 0u64;
    while let Some(page) = cursor.next_page(store).await? {
        actual += page.items.len() as u64;
    }

    if actual != expected {
        return Err(MigrationError::VerificationFailed {
            table_name: table_name.to_string(),
            expected,
            actual,
        });
    }

    tracing::info!(table = table_name, count = actual, "Item count verified");
    Ok(actual)
}
