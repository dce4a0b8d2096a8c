mod config;
mod error;
mod phase;
mod report;

pub use config::MigrationConfig;
pub use error::ConfigError;
pub use phase::MigrationPhase;
pub use report::MigrationReport;
