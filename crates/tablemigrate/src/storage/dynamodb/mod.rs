//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of [`TableStore`]
//! using `aws-sdk-dynamodb`.
//!
//! [`TableStore`]: crate::storage::TableStore

mod client;
mod error;
mod store;

pub use client::create_client;
pub use store::DynamoDbStore;
