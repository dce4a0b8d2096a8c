//! In-memory table store implementation.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tablemigrate_core::backup::{BackupHandle, BackupStatus};
use tablemigrate_core::storage::{KeySchema, Result, StoreError, MAX_BATCH_WRITE_ITEMS};

use crate::storage::{Item, Page, ScanRequest, TableStore};

/// Default number of items per scan page.
const DEFAULT_PAGE_SIZE: usize = 100;

/// In-memory storage backend for testing.
///
/// Tables are ordered by an encoding of their key attributes so paging is
/// deterministic. Backups become available after a configurable number of
/// status checks, and faults can be injected on puts and batch deletes.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
    page_size: usize,
}

#[derive(Debug, Default)]
struct State {
    tables: HashMap<String, Table>,
    backups: HashMap<String, Backup>,
    polls_until_available: usize,
    final_backup_status: Option<BackupStatus>,
    fail_puts_after: Option<usize>,
    puts: usize,
    partial_delete_rounds: usize,
    scans: Vec<ScanRequest>,
}

#[derive(Debug)]
struct Table {
    schema: KeySchema,
    items: BTreeMap<String, Item>,
}

#[derive(Debug)]
struct Backup {
    item_count: usize,
    polls_remaining: usize,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Limits the number of items returned by each scan call.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Adds an empty table with the given key schema.
    pub async fn create_table(&self, table_name: &str, schema: KeySchema) {
        let mut state = self.state.write().await;
        state.tables.insert(
            table_name.to_string(),
            Table {
                schema,
                items: BTreeMap::new(),
            },
        );
    }

    /// Inserts items directly, bypassing fault injection.
    pub async fn seed(&self, table_name: &str, items: impl IntoIterator<Item = Item>) {
        let mut state = self.state.write().await;
        let table = state
            .tables
            .get_mut(table_name)
            .expect("seeded table should exist");
        for item in items {
            let key = encode_key(&table.schema, &item).expect("seeded item should carry its key");
            table.items.insert(key, item);
        }
    }

    /// Returns every item of a table in key order.
    pub async fn items(&self, table_name: &str) -> Vec<Item> {
        let state = self.state.read().await;
        state
            .tables
            .get(table_name)
            .map(|table| table.items.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of status checks answered with `CREATING` before `AVAILABLE`.
    pub async fn set_backup_delay(&self, polls: usize) {
        self.state.write().await.polls_until_available = polls;
    }

    /// Status reported once the backup delay has elapsed.
    pub async fn set_final_backup_status(&self, status: BackupStatus) {
        self.state.write().await.final_backup_status = Some(status);
    }

    /// Makes every `put_item` call after the first `count` fail.
    pub async fn fail_puts_after(&self, count: usize) {
        self.state.write().await.fail_puts_after = Some(count);
    }

    /// Makes the next `rounds` batch deletes process only half their keys.
    pub async fn set_partial_delete_rounds(&self, rounds: usize) {
        self.state.write().await.partial_delete_rounds = rounds;
    }

    /// Item count captured by a backup.
    pub async fn backup_item_count(&self, backup_arn: &str) -> Option<usize> {
        let state = self.state.read().await;
        state
            .backups
            .get(backup_arn)
            .map(|backup| backup.item_count)
    }

    /// Total number of scan calls served.
    pub async fn scan_calls(&self) -> usize {
        self.state.read().await.scans.len()
    }

    /// Every scan request served, in call order.
    pub async fn scan_requests(&self) -> Vec<ScanRequest> {
        self.state.read().await.scans.clone()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes the key attributes of `item` into a sortable string.
fn encode_key(schema: &KeySchema, item: &Item) -> Option<String> {
    schema
        .attribute_names()
        .iter()
        .map(|name| item.get(*name).map(|value| format!("{:?}", value)))
        .collect::<Option<Vec<_>>>()
        .map(|parts| parts.join("\u{1f}"))
}

fn table_not_found(table_name: &str) -> StoreError {
    StoreError::TableNotFound {
        table: table_name.to_string(),
    }
}

#[async_trait]
impl TableStore for InMemoryStore {
    async fn create_backup(&self, table_name: &str, backup_name: &str) -> Result<BackupHandle> {
        let mut state = self.state.write().await;
        let item_count = state
            .tables
            .get(table_name)
            .ok_or_else(|| table_not_found(table_name))?
            .items
            .len();

        let arn = format!(
            "arn:memory:table/{}/backup/{}",
            table_name, state.backups.len()
        );
        let polls_remaining = state.polls_until_available;
        state.backups.insert(
            arn.clone(),
            Backup {
                item_count,
                polls_remaining,
            },
        );

        Ok(BackupHandle {
            name: backup_name.to_string(),
            arn,
        })
    }

    async fn describe_backup(&self, backup_arn: &str) -> Result<BackupStatus> {
        let mut state = self.state.write().await;
        let final_status = state
            .final_backup_status
            .clone()
            .unwrap_or(BackupStatus::Available);
        let Some(backup) = state.backups.get_mut(backup_arn) else {
            return Err(StoreError::BackupNotFound {
                backup_arn: backup_arn.to_string(),
            });
        };

        if backup.polls_remaining > 0 {
            backup.polls_remaining -= 1;
            return Ok(BackupStatus::Creating);
        }
        Ok(final_status)
    }

    async fn key_schema(&self, table_name: &str) -> Result<KeySchema> {
        let state = self.state.read().await;
        state
            .tables
            .get(table_name)
            .map(|table| table.schema.clone())
            .ok_or_else(|| table_not_found(table_name))
    }

    async fn scan_page(&self, request: &ScanRequest) -> Result<Page> {
        let mut state = self.state.write().await;
        state.scans.push(request.clone());
        let table = state
            .tables
            .get(&request.table_name)
            .ok_or_else(|| table_not_found(&request.table_name))?;

        let start = match &request.exclusive_start_key {
            Some(key) => Bound::Excluded(encode_key(&table.schema, key).ok_or_else(|| {
                StoreError::RequestFailed("Exclusive start key is missing key attributes".into())
            })?),
            None => Bound::Unbounded,
        };

        let mut entries = table
            .items
            .range((start, Bound::Unbounded))
            .take(self.page_size + 1)
            .map(|(_, item)| item.clone())
            .collect::<Vec<_>>();

        let has_more = entries.len() > self.page_size;
        entries.truncate(self.page_size);

        let last_evaluated_key = match entries.last() {
            Some(last) if has_more => Some(
                table
                    .schema
                    .attribute_names()
                    .iter()
                    .filter_map(|name| last.get(*name).map(|v| (name.to_string(), v.clone())))
                    .collect::<Item>(),
            ),
            _ => None,
        };

        let items = match &request.projection {
            Some(projection) => {
                let names = projection.resolved_names();
                entries
                    .into_iter()
                    .map(|item| {
                        item.into_iter()
                            .filter(|(name, _)| names.contains(&name.as_str()))
                            .collect::<Item>()
                    })
                    .collect::<Vec<_>>()
            }
            None => entries,
        };

        Ok(Page {
            items,
            last_evaluated_key,
        })
    }

    async fn batch_delete(&self, table_name: &str, keys: Vec<Item>) -> Result<Vec<Item>> {
        if keys.len() > MAX_BATCH_WRITE_ITEMS {
            return Err(StoreError::RequestFailed(format!(
                "Too many items in batch: {}",
                keys.len()
            )));
        }

        let mut state = self.state.write().await;
        let partial = state.partial_delete_rounds > 0;
        if partial {
            state.partial_delete_rounds -= 1;
        }

        let table = state
            .tables
            .get_mut(table_name)
            .ok_or_else(|| table_not_found(table_name))?;

        let mut keys = keys;
        let unprocessed = if partial {
            keys.split_off(keys.len() / 2)
        } else {
            Vec::new()
        };

        for key in &keys {
            let encoded = encode_key(&table.schema, key).ok_or_else(|| {
                StoreError::RequestFailed("Delete key is missing key attributes".into())
            })?;
            table.items.remove(&encoded);
        }

        Ok(unprocessed)
    }

    async fn put_item(&self, table_name: &str, item: Item) -> Result<()> {
        let mut state = self.state.write().await;
        if let Some(limit) = state.fail_puts_after {
            if state.puts >= limit {
                return Err(StoreError::Throttled(
                    "Throughput exceeded, please retry".to_string(),
                ));
            }
        }
        state.puts += 1;

        let table = state
            .tables
            .get_mut(table_name)
            .ok_or_else(|| table_not_found(table_name))?;
        let key = encode_key(&table.schema, &item).ok_or_else(|| {
            StoreError::RequestFailed("Item is missing key attributes".to_string())
        })?;
        table.items.insert(key, item);

        Ok(())
    }
}
