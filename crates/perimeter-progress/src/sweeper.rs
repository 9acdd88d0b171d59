//! Periodic cleanup of expired progress records.
//!
//! The sweeper is an explicitly owned, lifecycle-scoped task: `start`
//! spawns it, `stop` (or dropping the handle) aborts it deterministically,
//! so process shutdown never leaks a recurring task.

use crate::store::ProgressStore;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Handle to the background sweep task.
pub struct ProgressSweeper {
    handle: JoinHandle<()>,
}

impl ProgressSweeper {
    /// Spawn the sweep loop. The first pass runs immediately, then once
    /// per `interval`.
    #[must_use]
    pub fn start(store: ProgressStore, interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match store.sweep().await {
                    Ok(removed) => debug!("sweep pass removed {removed} record(s)"),
                    Err(e) => warn!("sweep pass failed: {e}"),
                }
            }
        });

        Self { handle }
    }

    /// Stop the sweep task.
    pub fn stop(self) {
        self.handle.abort();
    }

    /// Whether the task is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ProgressSweeper {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
