mod error;
mod migration;
mod prelude;
mod storage;
mod summary;

use std::num::ParseIntError;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tablemigrate_core::backup::{PollPolicy, DEFAULT_MAX_WAIT, DEFAULT_POLL_INTERVAL};
use tablemigrate_core::migration::{ConfigError, MigrationConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::storage::dynamodb::{create_client, DynamoDbStore};

/// Back up a DynamoDB table, empty it, and refill it from another table.
///
/// Every option can be supplied through its environment variable, which is
/// how CI runs it.
#[derive(Parser, Debug)]
#[command(name = "tablemigrate")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Region hosting both tables
    #[arg(long, env = "INPUT_AWS_REGION")]
    region: String,

    /// Table to copy items from
    #[arg(long, env = "INPUT_DYNAMODB_SOURCE_TABLE")]
    source_table: String,

    /// Table to back up, truncate and copy into
    #[arg(long, env = "INPUT_DYNAMODB_DESTINATION_TABLE")]
    destination_table: String,

    /// Custom endpoint URL (for local DynamoDB)
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Seconds between backup status checks
    #[arg(
        long,
        env = "INPUT_BACKUP_POLL_INTERVAL_SECS",
        default_value_t = DEFAULT_POLL_INTERVAL.as_secs(),
        value_parser = parse_poll_interval
    )]
    backup_poll_interval_secs: u64,

    /// Seconds to wait for the backup before giving up
    #[arg(
        long,
        env = "INPUT_BACKUP_TIMEOUT_SECS",
        default_value_t = DEFAULT_MAX_WAIT.as_secs(),
        value_parser = parse_backup_timeout
    )]
    backup_timeout_secs: u64,

    /// Compare the destination item count with the copied count
    #[arg(long, env = "INPUT_VERIFY", value_parser = clap::builder::FalseyValueParser::new())]
    verify: bool,

    /// Print the final report as JSON
    #[arg(long, env = "INPUT_JSON_SUMMARY", value_parser = clap::builder::FalseyValueParser::new())]
    json: bool,

    /// Emit log lines as JSON
    #[arg(long, env = "INPUT_LOG_JSON", value_parser = clap::builder::FalseyValueParser::new())]
    log_json: bool,

    /// Silence the final report
    #[arg(long)]
    silent: bool,
}

impl Cli {
    /// Builds the run configuration, validating every value.
    fn to_config(&self) -> std::result::Result<MigrationConfig, ConfigError> {
        let poll = PollPolicy::new(
            Duration::from_secs(self.backup_poll_interval_secs),
            Duration::from_secs(self.backup_timeout_secs),
        );

        Ok(MigrationConfig::new(
            self.region.as_str(),
            self.source_table.as_str(),
            self.destination_table.as_str(),
        )?
        .with_endpoint_url(self.endpoint_url.clone())
        .with_backup_poll(poll)?
        .with_verify(self.verify))
    }
}

// CI exports unset inputs as empty strings.
fn parse_poll_interval(value: &str) -> std::result::Result<u64, ParseIntError> {
    secs_or_default(value, DEFAULT_POLL_INTERVAL)
}

fn parse_backup_timeout(value: &str) -> std::result::Result<u64, ParseIntError> {
    secs_or_default(value, DEFAULT_MAX_WAIT)
}

fn secs_or_default(value: &str, default: Duration) -> std::result::Result<u64, ParseIntError> {
    match value.trim() {
        "" => Ok(default.as_secs()),
        secs => secs.parse(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_json);

    // Configuration errors must surface before any remote call.
    let config = cli.to_config()?;
    tracing::info!(
        target_store = %config.target_display(),
        source = %config.source_table,
        destination = %config.destination_table,
        "Starting migration"
    );

    let client = create_client(&config).await;
    let store = DynamoDbStore::new(client);

    let report = migration::run(&store, &config, &chrono::Local::now()).await?;

    if cli.json {
        summary::print_json(&report)?;
    } else if !cli.silent {
        summary::print_text(&report);
    }

    Ok(())
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` overrides the default `tablemigrate=info` filter.
fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tablemigrate=info".into());

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
