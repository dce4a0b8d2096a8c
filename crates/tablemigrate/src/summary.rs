//! End-of-run report output.

use tablemigrate_core::migration::MigrationReport;

use crate::prelude::*;

/// Print the report as coloured text.
pub fn print_text(report: &MigrationReport) {
    aprintln!();
    aprintln!("{}", p_c("Migration Summary:"));
    for line in report.summary_lines() {
        if line.starts_with('+') {
            aprintln!("  {}", p_g(&line));
        } else if line.starts_with('-') {
            aprintln!("  {}", p_r(&line));
        } else {
            aprintln!("  {}", line);
        }
    }
    aprintln!();
    aprintln!("{}", p_b("Migration completed successfully."));
}

/// Print the report as a single JSON document.
pub fn print_json(report: &MigrationReport) -> serde_json::Result<()> {
    aprintln!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
