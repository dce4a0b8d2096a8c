use serde::Serialize;

use crate::backup::BackupHandle;

/// Outcome of a completed migration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationReport {
    pub source_table: String,
    pub destination_table: String,
    pub backup: BackupHandle,
    pub deleted: u64,
    pub copied: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<u64>,
}

impl MigrationReport {
    /// Pure function: format the report for display.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("= Backup: {} ({})", self.backup.name, self.backup.arn),
            format!(
                "- Deleted {} item(s) from {}",
                self.deleted, self.destination_table
            ),
            format!(
                "+ Copied {} item(s) from {} to {}",
                self.copied, self.source_table, self.destination_table
            ),
        ];
        if let Some(count) = self.verified {
            lines.push(format!(
                "= Verified {} item(s) in {}",
                count, self.destination_table
            ));
        }
        lines
    }
}
