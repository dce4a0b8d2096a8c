use thiserror::Error;

/// Errors raised while assembling the migration configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),
    #[error("Source and destination table are the same: {0}")]
    SameTable(String),
    #[error("Invalid setting {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
