mod error;
mod keys;

pub use error::{Result, StoreError};
pub use keys::{KeyProjection, KeySchema, MAX_BATCH_WRITE_ITEMS};
