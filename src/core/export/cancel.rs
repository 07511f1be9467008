//! Run cancellation checked at chunk boundaries

use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Why a run was stopped before the snapshot was drained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Shutdown was requested (SIGINT/SIGTERM)
    Interrupted,
    /// The run deadline passed
    DeadlineExceeded,
}

/// Shutdown signal plus an optional wall-clock deadline
///
/// Polled between chunks; a chunk in flight is never split.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    shutdown: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

impl CancelHandle {
    /// A handle that never cancels
    pub fn none() -> Self {
        Self::default()
    }

    /// Cancel once the shutdown channel carries `true`
    pub fn from_shutdown(shutdown: watch::Receiver<bool>) -> Self {
        Self {
            shutdown: Some(shutdown),
            deadline: None,
        }
    }

    /// Cancel at `deadline`
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Cancel `timeout` from now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Check whether the run should stop
    pub fn check(&self) -> Option<CancelReason> {
        if self.shutdown.as_ref().is_some_and(|rx| *rx.borrow()) {
            return Some(CancelReason::Interrupted);
        }

        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Some(CancelReason::DeadlineExceeded);
        }

        None
    }
}
