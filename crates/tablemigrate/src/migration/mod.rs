//! Migration driver: Backup -> Truncate -> Copy (-> Verify).

mod backup;
mod copy;
mod scan;
mod truncate;
mod verify;

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use tablemigrate_core::migration::{MigrationConfig, MigrationPhase, MigrationReport};

use self::backup::backup_table;
use self::copy::copy_table;
use self::truncate::truncate_table;
use self::verify::verify_item_count;
use crate::error::Result;
use crate::storage::TableStore;

/// Runs every step in order and returns the report of a completed run.
///
/// The first failing step ends the run. Nothing is rolled back.
pub async fn run<Tz>(
    store: &dyn TableStore,
    config: &MigrationConfig,
    now: &DateTime<Tz>,
) -> Result<MigrationReport>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut phase = MigrationPhase::Start;
    let result = run_phases(store, config, now, &mut phase).await;

    match &result {
        Ok(_) => tracing::info!(%phase, "Migration finished"),
        Err(err) => {
            tracing::error!(
                failed_in = %phase,
                phase = %MigrationPhase::Failed,
                error = %err,
                "Migration failed"
            );
        }
    }
    result
}

async fn run_phases<Tz>(
    store: &dyn TableStore,
    config: &MigrationConfig,
    now: &DateTime<Tz>,
    phase: &mut MigrationPhase,
) -> Result<MigrationReport>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let destination = config.destination_table.as_str();

    enter(phase, config.verify);
    let backup = backup_table(store, destination, now, &config.backup_poll).await?;

    enter(phase, config.verify);
    let deleted = truncate_table(store, destination).await?;

    enter(phase, config.verify);
    let copied = copy_table(store, &config.source_table, destination).await?;

    enter(phase, config.verify);
    let verified = if *phase == MigrationPhase::Verifying {
        let count = verify_item_count(store, destination, copied).await?;
        enter(phase, config.verify);
        Some(count)
    } else {
        None
    };

    Ok(MigrationReport {
        source_table: config.source_table.clone(),
        destination_table: config.destination_table.clone(),
        backup,
        deleted,
        copied,
        verified,
    })
}

fn enter(phase: &mut MigrationPhase, verify: bool) {
    *phase = phase.advance(verify);
    tracing::debug!(%phase, "Entering phase");
}
