// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Write-finish stabilization: coalesce rapid-fire raw filesystem events
//! for the same path into one delivery after a short quiet period, so a
//! handler never reads a file mid-write. Modeled directly on
//! `sprintdeck_storage::Persistence`'s debounce (cancel-then-reschedule a
//! spawned sleep), the same pattern applied to a per-path key instead of
//! the single state file.

use crate::event::WatchEvent;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// Default quiet period: long enough to absorb a multi-write save, short
/// enough that a human watching the dashboard doesn't notice the delay.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(150);

pub struct Stabilizer {
    quiet_period: Duration,
    pending: Arc<Mutex<HashMap<PathBuf, JoinHandle<()>>>>,
}

impl Stabilizer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Schedule `event` for delivery on `tx` after the quiet period,
    /// cancelling any not-yet-delivered event already pending for the
    /// same path.
    pub async fn notify(&self, event: WatchEvent, tx: mpsc::Sender<WatchEvent>) {
        let path = event.path.clone();
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.remove(&path) {
            handle.abort();
        }
        let quiet_period = self.quiet_period;
        let pending_ref = Arc::clone(&self.pending);
        let path_for_cleanup = path.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let _ = tx.send(event).await;
            pending_ref.lock().await.remove(&path_for_cleanup);
        });
        pending.insert(path, handle);
    }
}

#[cfg(test)]
#[path = "stabilize_tests.rs"]
mod tests;
