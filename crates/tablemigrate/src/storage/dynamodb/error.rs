//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `tablemigrate_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemError;
use aws_sdk_dynamodb::operation::create_backup::CreateBackupError;
use aws_sdk_dynamodb::operation::describe_backup::DescribeBackupError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use tablemigrate_core::storage::StoreError;

/// Transport-level failures never reached the service.
fn connection_error<E: Debug, R: Debug>(err: &SdkError<E, R>) -> Option<StoreError> {
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            Some(StoreError::ConnectionFailed(format!("{:?}", err)))
        }
        _ => None,
    }
}

/// Map a CreateBackup SDK error to StoreError.
pub fn map_create_backup_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateBackupError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(err) = connection_error(&err) {
        return err;
    }
    match err.into_service_error() {
        CreateBackupError::TableNotFoundException(_) => StoreError::TableNotFound {
            table: table_name.to_string(),
        },
        CreateBackupError::LimitExceededException(_) => {
            StoreError::Throttled("Backup limit exceeded, please retry".to_string())
        }
        CreateBackupError::TableInUseException(_) => {
            StoreError::RequestFailed(format!("Table '{}' is in use", table_name))
        }
        CreateBackupError::BackupInUseException(_) => {
            StoreError::RequestFailed("Another backup is in progress".to_string())
        }
        CreateBackupError::ContinuousBackupsUnavailableException(_) => {
            StoreError::RequestFailed("Backups are not enabled for this table".to_string())
        }
        CreateBackupError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::RequestFailed(format!("CreateBackup failed: {:?}", err)),
    }
}

/// Map a DescribeBackup SDK error to StoreError.
pub fn map_describe_backup_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeBackupError, R>,
    backup_arn: &str,
) -> StoreError {
    if let Some(err) = connection_error(&err) {
        return err;
    }
    match err.into_service_error() {
        DescribeBackupError::BackupNotFoundException(_) => StoreError::BackupNotFound {
            backup_arn: backup_arn.to_string(),
        },
        DescribeBackupError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::RequestFailed(format!("DescribeBackup failed: {:?}", err)),
    }
}

/// Map a DescribeTable SDK error to StoreError.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(err) = connection_error(&err) {
        return err;
    }
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => StoreError::TableNotFound {
            table: table_name.to_string(),
        },
        DescribeTableError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::RequestFailed(format!("DescribeTable failed: {:?}", err)),
    }
}

/// Map a Scan SDK error to StoreError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(err) = connection_error(&err) {
        return err;
    }
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => StoreError::TableNotFound {
            table: table_name.to_string(),
        },
        ScanError::ProvisionedThroughputExceededException(_) => {
            StoreError::Throttled("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            StoreError::Throttled("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::RequestFailed(format!("Scan failed: {:?}", err)),
    }
}

/// Map a BatchWriteItem SDK error to StoreError.
pub fn map_batch_write_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<BatchWriteItemError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(err) = connection_error(&err) {
        return err;
    }
    match err.into_service_error() {
        BatchWriteItemError::ResourceNotFoundException(_) => StoreError::TableNotFound {
            table: table_name.to_string(),
        },
        BatchWriteItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::Throttled("Throughput exceeded, please retry".to_string())
        }
        BatchWriteItemError::RequestLimitExceeded(_) => {
            StoreError::Throttled("Request limit exceeded, please retry".to_string())
        }
        BatchWriteItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::RequestFailed("Item collection size limit exceeded".to_string())
        }
        BatchWriteItemError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::RequestFailed(format!("BatchWriteItem failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(err) = connection_error(&err) {
        return err;
    }
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => StoreError::TableNotFound {
            table: table_name.to_string(),
        },
        PutItemError::ProvisionedThroughputExceededException(_) => {
            StoreError::Throttled("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            StoreError::Throttled("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::RequestFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            StoreError::RequestFailed("Transaction conflict".to_string())
        }
        PutItemError::InternalServerError(_) => {
            StoreError::RequestFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::RequestFailed(format!("PutItem failed: {:?}", err)),
    }
}
