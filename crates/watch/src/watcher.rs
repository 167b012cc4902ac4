// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Ties the path matcher, write-finish stabilizer, and startup scan
//! together into one live filesystem watcher over a project root.

use crate::error::WatchError;
use crate::event::WatchEvent;
use crate::matcher::classify;
use crate::scan::{scan, STALENESS_THRESHOLD};
use crate::stabilize::{Stabilizer, DEFAULT_QUIET_PERIOD};
use notify::{RecommendedWatcher, RecursiveMode, Watcher as _};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::warn;

/// Live filesystem watcher over one project root. Dropping this stops
/// watching; the paired `mpsc::Receiver<WatchEvent>` then closes once
/// any in-flight stabilization timers fire.
pub struct DirWatcher {
    _inner: RecommendedWatcher,
}

impl DirWatcher {
    /// Start watching `root` recursively. Performs the startup full scan
    /// (staleness-filtered) before returning, then hands back a channel
    /// that receives every subsequent stabilized, classified event.
    ///
    /// Must be called from within a Tokio runtime: the `notify` callback
    /// runs on its own thread and hands events back in via the current
    /// runtime handle.
    pub fn start(root: PathBuf) -> Result<(Self, mpsc::Receiver<WatchEvent>), WatchError> {
        Self::start_with_quiet_period(root, DEFAULT_QUIET_PERIOD)
    }

    pub fn start_with_quiet_period(root: PathBuf, quiet_period: Duration) -> Result<(Self, mpsc::Receiver<WatchEvent>), WatchError> {
        let (tx, rx) = mpsc::channel(1024);
        let stabilizer = Arc::new(Stabilizer::new(quiet_period));
        let runtime_handle = tokio::runtime::Handle::current();

        let tx_for_callback = tx.clone();
        let stabilizer_for_callback = Arc::clone(&stabilizer);
        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    warn!(error = %err, "filesystem watch error");
                    return;
                }
            };
            for path in event.paths {
                let Some(kind) = classify(&path) else { continue };
                let watch_event = WatchEvent::new(kind, path);
                let tx = tx_for_callback.clone();
                let stabilizer = Arc::clone(&stabilizer_for_callback);
                runtime_handle.spawn(async move {
                    stabilizer.notify(watch_event, tx).await;
                });
            }
        })?;
        watcher.watch(&root, RecursiveMode::Recursive)?;

        // Startup scan: staleness-filtered, delivered directly (already
        // settled on disk, no need to wait out the quiet period).
        let scanned = scan(&root, STALENESS_THRESHOLD, SystemTime::now());
        let tx_for_scan = tx.clone();
        tokio::spawn(async move {
            for event in scanned {
                if tx_for_scan.send(event).await.is_err() {
                    break;
                }
            }
        });

        Ok((Self { _inner: watcher }, rx))
    }
}

#[cfg(feature = "test-support")]
pub mod fake {
    //! A synthetic event source for tests that want to drive the engine's
    //! watch-event handling without real filesystem timing.
    use super::WatchEvent;
    use tokio::sync::mpsc;

    pub struct FakeWatcher {
        tx: mpsc::Sender<WatchEvent>,
    }

    impl FakeWatcher {
        pub fn new(capacity: usize) -> (Self, mpsc::Receiver<WatchEvent>) {
            let (tx, rx) = mpsc::channel(capacity);
            (Self { tx }, rx)
        }

        pub async fn push(&self, event: WatchEvent) {
            let _ = self.tx.send(event).await;
        }
    }
}

#[cfg(test)]
#[path = "watcher_tests.rs"]
mod tests;
