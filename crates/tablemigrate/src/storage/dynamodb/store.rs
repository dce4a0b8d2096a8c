//! DynamoDB table store implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{DeleteRequest, KeyType, WriteRequest};
use aws_sdk_dynamodb::Client;

use tablemigrate_core::backup::{BackupHandle, BackupStatus};
use tablemigrate_core::storage::{KeySchema, Result, StoreError};

use super::error::{
    map_batch_write_error, map_create_backup_error, map_describe_backup_error,
    map_describe_table_error, map_put_item_error, map_scan_error,
};
use crate::storage::{Item, Page, ScanRequest, TableStore};

/// DynamoDB-based table store.
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TableStore for DynamoDbStore {
    async fn create_backup(&self, table_name: &str, backup_name: &str) -> Result<BackupHandle> {
        let response = self
            .client
            .create_backup()
            .table_name(table_name)
            .backup_name(backup_name)
            .send()
            .await
            .map_err(|e| map_create_backup_error(e, table_name))?;

        let details = response.backup_details.ok_or_else(|| {
            StoreError::InvalidResponse("CreateBackup returned no backup details".to_string())
        })?;

        Ok(BackupHandle {
            name: details.backup_name,
            arn: details.backup_arn,
        })
    }

    async fn describe_backup(&self, backup_arn: &str) -> Result<BackupStatus> {
        let response = self
            .client
            .describe_backup()
            .backup_arn(backup_arn)
            .send()
            .await
            .map_err(|e| map_describe_backup_error(e, backup_arn))?;

        let details = response
            .backup_description
            .and_then(|description| description.backup_details)
            .ok_or_else(|| {
                StoreError::InvalidResponse("DescribeBackup returned no backup details".to_string())
            })?;

        Ok(BackupStatus::parse(details.backup_status.as_str()))
    }

    async fn key_schema(&self, table_name: &str) -> Result<KeySchema> {
        let response = self
            .client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| map_describe_table_error(e, table_name))?;

        let table = response.table().ok_or_else(|| StoreError::TableNotFound {
            table: table_name.to_string(),
        })?;

        let mut partition_key = None;
        let mut sort_key = None;
        for element in table.key_schema() {
            match element.key_type() {
                KeyType::Hash => partition_key = Some(element.attribute_name().to_string()),
                KeyType::Range => sort_key = Some(element.attribute_name().to_string()),
                other => {
                    return Err(StoreError::InvalidResponse(format!(
                        "Unknown key type '{}' on table '{}'",
                        other.as_str(),
                        table_name
                    )))
                }
            }
        }

        let partition_key = partition_key.ok_or_else(|| {
            StoreError::InvalidResponse(format!("Table '{}' has no HASH key", table_name))
        })?;

        Ok(KeySchema {
            partition_key,
            sort_key,
        })
    }

    async fn scan_page(&self, request: &ScanRequest) -> Result<Page> {
        let (projection_expression, attribute_names) = match &request.projection {
            Some(projection) => (
                Some(projection.expression.clone()),
                Some(projection.attribute_names.clone()),
            ),
            None => (None, None),
        };

        let response = self
            .client
            .scan()
            .table_name(&request.table_name)
            .consistent_read(request.consistent_read)
            .set_projection_expression(projection_expression)
            .set_expression_attribute_names(attribute_names)
            .set_exclusive_start_key(request.exclusive_start_key.clone())
            .send()
            .await
            .map_err(|e| map_scan_error(e, &request.table_name))?;

        Ok(Page {
            items: response.items.unwrap_or_default(),
            last_evaluated_key: response.last_evaluated_key.filter(|key| !key.is_empty()),
        })
    }

    async fn batch_delete(&self, table_name: &str, keys: Vec<Item>) -> Result<Vec<Item>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let write_requests = keys
            .into_iter()
            .map(|key| {
                DeleteRequest::builder()
                    .set_key(Some(key))
                    .build()
                    .map(|delete| WriteRequest::builder().delete_request(delete).build())
                    .map_err(|e| StoreError::RequestFailed(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let response = self
            .client
            .batch_write_item()
            .request_items(table_name, write_requests)
            .send()
            .await
            .map_err(|e| map_batch_write_error(e, table_name))?;

        let unprocessed = response
            .unprocessed_items
            .and_then(|mut tables| tables.remove(table_name))
            .unwrap_or_default()
            .into_iter()
            .filter_map(|request| request.delete_request.map(|delete| delete.key))
            .collect();

        Ok(unprocessed)
    }

    async fn put_item(&self, table_name: &str, item: Item) -> Result<()> {
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, table_name))?;

        Ok(())
    }
}
