use std::fmt;

use serde::Serialize;

/// Status of an on-demand backup as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupStatus {
    Creating,
    Available,
    Deleted,
    Unknown(String),
}

impl BackupStatus {
    /// Parses the wire representation (`CREATING`, `AVAILABLE`, `DELETED`).
    pub fn parse(status: &str) -> Self {
        match status {
            "CREATING" => Self::Creating,
            "AVAILABLE" => Self::Available,
            "DELETED" => Self::Deleted,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// A backup in this status will never become available.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

impl fmt::Display for BackupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Creating => f.write_str("CREATING"),
            Self::Available => f.write_str("AVAILABLE"),
            Self::Deleted => f.write_str("DELETED"),
            Self::Unknown(other) => f.write_str(other),
        }
    }
}

/// Handle to a backup request: its name and the ARN assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupHandle {
    pub name: String,
    pub arn: String,
}
