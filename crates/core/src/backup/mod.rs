mod naming;
mod poll;
mod types;

pub use naming::{backup_name, BACKUP_TIMESTAMP_FORMAT};
pub use poll::{PollDecision, PollPolicy, DEFAULT_MAX_WAIT, DEFAULT_POLL_INTERVAL};
pub use types::{BackupHandle, BackupStatus};
