use std::fmt::Display;

use chrono::{DateTime, TimeZone};

/// Timestamp suffix appended to backup names: `YYYYMMDD_HHMM`.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Builds the backup name for `table` taken at `at`.
///
/// Pattern: `<table>_<YYYYMMDD>_<HHMM>`, rendered in the timezone of `at`.
pub fn backup_name<Tz>(table: &str, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{}_{}", table, at.format(BACKUP_TIMESTAMP_FORMAT))
}
