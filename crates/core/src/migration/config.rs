use crate::backup::PollPolicy;

use super::ConfigError;

/// Everything a migration run needs, built once at startup and passed by
/// reference into each step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationConfig {
    /// Region hosting both tables.
    pub region: String,
    /// Table read during the copy step.
    pub source_table: String,
    /// Table backed up, truncated and filled.
    pub destination_table: String,
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// Polling bounds while waiting for the backup.
    pub backup_poll: PollPolicy,
    /// Compare destination item count with the copied count at the end.
    pub verify: bool,
}

impl MigrationConfig {
    /// Creates a configuration, rejecting blank names and a destination that
    /// equals the source.
    pub fn new(
        region: impl Into<String>,
        source_table: impl Into<String>,
        destination_table: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let region = required("INPUT_AWS_REGION", region.into())?;
        let source_table = required("INPUT_DYNAMODB_SOURCE_TABLE", source_table.into())?;
        let destination_table =
            required("INPUT_DYNAMODB_DESTINATION_TABLE", destination_table.into())?;

        if source_table == destination_table {
            return Err(ConfigError::SameTable(source_table));
        }

        Ok(Self {
            region,
            source_table,
            destination_table,
            endpoint_url: None,
            backup_poll: PollPolicy::default(),
            verify: false,
        })
    }

    /// Sets the endpoint URL. Blank values are ignored.
    pub fn with_endpoint_url(mut self, endpoint_url: Option<String>) -> Self {
        self.endpoint_url = endpoint_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());
        self
    }

    /// Sets the backup polling bounds.
    pub fn with_backup_poll(mut self, policy: PollPolicy) -> Result<Self, ConfigError> {
        if policy.interval.is_zero() {
            return Err(ConfigError::Invalid {
                name: "INPUT_BACKUP_POLL_INTERVAL_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }
        self.backup_poll = policy;
        Ok(self)
    }

    /// Enables or disables the verification step.
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

fn required(name: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Missing(name));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new_trims_values() {
        let config = MigrationConfig::new(" eu-west-1 ", "source ", " dest").unwrap();

        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.source_table, "source");
        assert_eq!(config.destination_table, "dest");
        assert_eq!(config.backup_poll, PollPolicy::default());
        assert!(!config.verify);
    }

    #[test]
    fn test_blank_region_is_missing() {
        let err = MigrationConfig::new("  ", "a", "b").unwrap_err();
        assert_eq!(err, ConfigError::Missing("INPUT_AWS_REGION"));
    }

    #[test]
    fn test_blank_destination_is_missing() {
        let err = MigrationConfig::new("eu-west-1", "a", "").unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing("INPUT_DYNAMODB_DESTINATION_TABLE")
        );
    }

    #[test]
    fn test_same_table_is_rejected() {
        let err = MigrationConfig::new("eu-west-1", "orders", "orders").unwrap_err();
        assert_eq!(err, ConfigError::SameTable("orders".to_string()));
    }

    #[test]
    fn test_blank_endpoint_is_ignored() {
        let config = MigrationConfig::new("eu-west-1", "a", "b")
            .unwrap()
            .with_endpoint_url(Some("   ".to_string()));
        assert_eq!(config.endpoint_url, None);
    }

    #[test]
    fn test_zero_poll_interval_is_rejected() {
        let err = MigrationConfig::new("eu-west-1", "a", "b")
            .unwrap()
            .with_backup_poll(PollPolicy::new(Duration::ZERO, Duration::from_secs(5)))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_target_display() {
        let config = MigrationConfig::new("eu-west-1", "a", "b").unwrap();
        assert_eq!(config.target_display(), "AWS DynamoDB (region: eu-west-1)");

        let local = config.with_endpoint_url(Some("http://localhost:8000".to_string()));
        assert_eq!(
            local.target_display(),
            "Local DynamoDB (http://localhost:8000)"
        );
    }
}
