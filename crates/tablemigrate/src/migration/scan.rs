//! Paginated scan traversal.

use tablemigrate_core::storage::Result;

use crate::storage::{Page, ScanRequest, TableStore};

/// Walks a table page by page, following `LastEvaluatedKey`.
pub struct ScanCursor {
    request: ScanRequest,
    finished: bool,
}

impl ScanCursor {
    pub fn new(request: ScanRequest) -> Self {
        Self {
            request,
            finished: false,
        }
    }

    /// Fetches the next page, or `None` once the previous page carried no
    /// continuation token.
    pub async fn next_page(&mut self, store: &dyn TableStore) -> Result<Option<Page>> {
        if self.finished {
            return Ok(None);
        }

        let page = store.scan_page(&self.request).await?;
        match &page.last_evaluated_key {
            Some(key) => self.request.exclusive_start_key = Some(key.clone()),
            None => self.finished = true,
        }
        Ok(Some(page))
    }
}
