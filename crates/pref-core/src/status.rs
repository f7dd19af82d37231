//! Transaction status machine
//!
//! Reflects submission progress for display: `Idle`, `Pending`,
//! `Success`, `Error`. Terminal display states auto-reset to `Idle` after
//! the configured delay (success and error have different delays).
//!
//! Auto-resets are owned, cancellable tasks: a newer transition aborts
//! the outstanding reset, and dropping the machine aborts it too, so no
//! timer outlives its owner. Every transition bumps a generation counter
//! and the reset task checks it before firing, so a stale timer can never
//! clobber a newer state.

use crate::config::SyncConfig;
use std::sync::{Arc, PoisonError};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Display state of the current transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    /// Nothing in flight
    Idle,
    /// Submission started, awaiting commit
    Pending(String),
    /// Commit landed
    Success(String),
    /// Submission failed with a classified message
    Error(String),
}

impl TransactionStatus {
    /// Message carried by the state, if any
    #[inline]
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Pending(m) | Self::Success(m) | Self::Error(m) => Some(m),
        }
    }
}

#[derive(Debug)]
struct MachineState {
    generation: u64,
    status: TransactionStatus,
}

/// Timed status machine for submission feedback
#[derive(Debug)]
pub struct StatusMachine {
    config: SyncConfig,
    state: Arc<Mutex<MachineState>>,
    reset: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl StatusMachine {
    /// Create a machine in `Idle` with the given reset delays
    #[inline]
    #[must_use]
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(MachineState {
                generation: 0,
                status: TransactionStatus::Idle,
            })),
            reset: std::sync::Mutex::new(None),
        }
    }

    /// Current status (cloned)
    pub async fn current(&self) -> TransactionStatus {
        self.state.lock().await.status.clone()
    }

    /// Check whether a submission is in flight
    pub async fn is_pending(&self) -> bool {
        matches!(self.state.lock().await.status, TransactionStatus::Pending(_))
    }

    /// Transition to `Pending` on submission start
    pub async fn begin(&self, message: impl Into<String>) {
        self.transition(TransactionStatus::Pending(message.into()))
            .await;
        self.cancel_reset();
    }

    /// Transition to `Success` and schedule the success auto-reset
    pub async fn succeed(&self, message: impl Into<String>) {
        let generation = self
            .transition(TransactionStatus::Success(message.into()))
            .await;
        self.schedule_reset(generation, self.config.success_reset);
    }

    /// Transition to `Error` and schedule the error auto-reset
    pub async fn fail(&self, message: impl Into<String>) {
        let generation = self
            .transition(TransactionStatus::Error(message.into()))
            .await;
        self.schedule_reset(generation, self.config.error_reset);
    }

    async fn transition(&self, next: TransactionStatus) -> u64 {
        let mut state = self.state.lock().await;
        state.generation += 1;
        tracing::debug!(from = ?state.status, to = ?next, "status transition");
        state.status = next;
        state.generation
    }

    /// Schedule a reset to `Idle` unless a newer transition supersedes it
    fn schedule_reset(&self, generation: u64, delay: Duration) {
        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = state.lock().await;
            if state.generation == generation {
                state.generation += 1;
                state.status = TransactionStatus::Idle;
            }
        });

        if let Some(previous) = self.stash_reset(Some(handle)) {
            previous.abort();
        }
    }

    fn cancel_reset(&self) {
        if let Some(previous) = self.stash_reset(None) {
            previous.abort();
        }
    }

    fn stash_reset(&self, next: Option<JoinHandle<()>>) -> Option<JoinHandle<()>> {
        let mut slot = self
            .reset
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, next)
    }
}

impl Drop for StatusMachine {
    fn drop(&mut self) {
        if let Some(handle) = self.stash_reset(None) {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn starts_idle() {
        let machine = StatusMachine::new(SyncConfig::default());
        assert_eq!(machine.current().await, TransactionStatus::Idle);
        assert!(!machine.is_pending().await);
    }

    #[tokio::test]
    async fn begin_marks_pending() {
        let machine = StatusMachine::new(SyncConfig::default());
        machine.begin("sealing preference").await;
        assert!(machine.is_pending().await);
        assert_eq!(
            machine.current().await.message(),
            Some("sealing preference")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn success_auto_resets_after_delay() {
        let machine = StatusMachine::new(SyncConfig::default());
        machine.begin("submitting").await;
        machine.succeed("submitted").await;

        tokio::time::advance(Duration::from_millis(1999)).await;
        tokio::task::yield_now().await;
        assert!(matches!(
            machine.current().await,
            TransactionStatus::Success(_)
        ));

        tokio::time::advance(Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
        assert_eq!(machine.current().await, TransactionStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn new_submission_cancels_stale_reset() {
        let machine = StatusMachine::new(SyncConfig::default());
        machine.succeed("first").await;

        tokio::time::advance(Duration::from_millis(1000)).await;
        machine.begin("second").await;

        // The first reset would have fired here; the machine must stay
        // pending.
        tokio::time::advance(Duration::from_millis(5000)).await;
        tokio::task::yield_now().await;
        assert!(machine.is_pending().await);
    }
}
