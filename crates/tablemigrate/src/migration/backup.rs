//! Backup step: create an on-demand backup and wait until it is available.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;
use tokio::time::{sleep, Instant};

use tablemigrate_core::backup::{backup_name, BackupHandle, PollDecision, PollPolicy};

use crate::error::{MigrationError, Result};
use crate::storage::TableStore;

/// Backs up `table_name` and returns once the backup reports `AVAILABLE`.
///
/// The backup is named `<table>_<YYYYMMDD>_<HHMM>` from `now`. Status is
/// polled every `policy.interval` until `policy.max_wait` is spent.
pub async fn backup_table<Tz>(
    store: &dyn TableStore,
    table_name: &str,
    now: &DateTime<Tz>,
    policy: &PollPolicy,
) -> Result<BackupHandle>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let name = backup_name(table_name, now);
    tracing::info!(table = table_name, backup_name = %name, "Creating backup");

    let handle = store.create_backup(table_name, &name).await?;
    tracing::info!(backup_arn = %handle.arn, "Backup requested");

    wait_for_backup(store, &handle, policy).await?;
    Ok(handle)
}

/// Polls the backup status until it becomes available, fails, or times out.
pub async fn wait_for_backup(
    store: &dyn TableStore,
    handle: &BackupHandle,
    policy: &PollPolicy,
) -> Result<()> {
    let started = Instant::now();

    loop {
        let status = store.describe_backup(&handle.arn).await?;
        tracing::info!(backup_name = %handle.name, %status, "Backup status");

        if status.is_failed() {
            return Err(MigrationError::BackupFailed {
                backup_name: handle.name.clone(),
                status,
            });
        }

        match policy.decide(started.elapsed(), status.is_available()) {
            PollDecision::Ready => return Ok(()),
            PollDecision::Wait(delay) => sleep(delay).await,
            PollDecision::TimedOut => {
                return Err(MigrationError::BackupTimeout {
                    backup_name: handle.name.clone(),
                    waited: started.elapsed(),
                })
            }
        }
    }
}
