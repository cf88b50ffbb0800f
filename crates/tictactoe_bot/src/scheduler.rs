//! Delayed, cancelable robot turns.
//!
//! The robot "thinks" for a moment before moving. The pause is a spawned task
//! that sleeps and then signals readiness on a channel. At most one such task
//! exists; scheduling again or cancelling aborts the previous one.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};

/// Default thinking time before the robot moves.
pub const DEFAULT_THINK_DELAY: Duration = Duration::from_millis(300);

/// The thinking delay for the board identified by `epoch` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentReady {
    /// Board version the robot turn was scheduled for.
    pub epoch: u64,
}

/// Single-slot scheduler for the robot's turn.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct OpponentScheduler {
    delay: Duration,
    ready_tx: mpsc::UnboundedSender<OpponentReady>,
    pending: Option<JoinHandle<()>>,
}

impl OpponentScheduler {
    /// Creates a scheduler that reports on `ready_tx` after `delay`.
    pub fn new(delay: Duration, ready_tx: mpsc::UnboundedSender<OpponentReady>) -> Self {
        Self {
            delay,
            ready_tx,
            pending: None,
        }
    }

    /// Thinking delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules a robot turn for `epoch`, superseding any pending one.
    #[instrument(skip(self), fields(delay_ms = self.delay.as_millis() as u64))]
    pub fn schedule(&mut self, epoch: u64) {
        self.cancel();
        let delay = self.delay;
        let ready_tx = self.ready_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if ready_tx.send(OpponentReady { epoch }).is_err() {
                debug!(epoch, "Session gone before robot turn fired");
            }
        }));
        debug!(epoch, "Robot turn scheduled");
    }

    /// Aborts the pending robot turn. Returns whether one was pending.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                debug!("Pending robot turn cancelled");
                true
            }
            _ => false,
        }
    }

    /// A scheduled turn has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for OpponentScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
