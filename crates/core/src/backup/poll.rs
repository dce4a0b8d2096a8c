//! Bounded polling policy for backup status (Functional Core).

use std::time::Duration;

/// Default delay between two status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Default upper bound on the total time spent waiting.
pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(30 * 60);

/// How often to poll and for how long before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_wait: Duration,
}

/// What the poller should do after observing a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollDecision {
    /// The awaited condition holds.
    Ready,
    /// Sleep for the given duration, then poll again.
    Wait(Duration),
    /// The time budget is spent.
    TimedOut,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_wait: DEFAULT_MAX_WAIT,
        }
    }
}

impl PollPolicy {
    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }

    /// Pure function: decide the next step given the time already spent.
    ///
    /// The last wait is shortened so the final check lands on `max_wait`.
    pub fn decide(&self, elapsed: Duration, ready: bool) -> PollDecision {
        if ready {
            return PollDecision::Ready;
        }
        if elapsed >= self.max_wait {
            return PollDecision::TimedOut;
        }
        let remaining = self.max_wait - elapsed;
        PollDecision::Wait(self.interval.min(remaining))
    }
}
