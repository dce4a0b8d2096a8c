use std::fmt;

/// Phases of a migration run.
///
/// `Start -> BackingUp -> Truncating -> Copying -> [Verifying ->] Done`, with
/// any phase able to move to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationPhase {
    Start,
    BackingUp,
    Truncating,
    Copying,
    Verifying,
    Done,
    Failed,
}

impl MigrationPhase {
    /// Pure function: the phase that follows a successful `self`.
    ///
    /// Terminal phases stay where they are.
    pub fn advance(self, verify: bool) -> Self {
        match self {
            Self::Start => Self::BackingUp,
            Self::BackingUp => Self::Truncating,
            Self::Truncating => Self::Copying,
            Self::Copying if verify => Self::Verifying,
            Self::Copying | Self::Verifying => Self::Done,
            Self::Done => Self::Done,
            Self::Failed => Self::Failed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::BackingUp => "BACKING_UP",
            Self::Truncating => "TRUNCATING",
            Self::Copying => "COPYING",
            Self::Verifying => "VERIFYING",
            Self::Done => "DONE",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for MigrationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
