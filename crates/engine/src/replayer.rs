// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! The replayer: time-scaled re-emission of a recorded sprint to one
//! client (§4.6). Framing is `replay_start{totalEvents}` … events …
//! `replay_complete`; ordering matches the recording, timing is
//! monotonic under any positive speed. Cancellation (`ReplayHandle::cancel`)
//! clears all pending timers without sending `replay_complete`.

use sprintdeck_core::Event;
use sprintdeck_storage::RecordedEvent;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Duration;

/// Handle to a running replay; dropping it without calling `cancel` lets
/// the replay run to completion.
pub struct ReplayHandle {
    cancel_tx: Option<oneshot::Sender<()>>,
}

impl ReplayHandle {
    /// Stop the replay immediately. Already-sent events are not retracted;
    /// no further events (including `replay_complete`) are sent.
    pub fn cancel(mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Spawn a task that sends `replay_start`, then each recorded event at
/// `timestamp / speed` milliseconds after the previous one, then
/// `replay_complete`. `speed` must be positive; values `<= 0` are treated
/// as `1.0`.
pub fn spawn_replay(recording: Vec<RecordedEvent>, speed: f64, sink: mpsc::Sender<Event>) -> ReplayHandle {
    let speed = if speed > 0.0 { speed } else { 1.0 };
    let (cancel_tx, mut cancel_rx) = oneshot::channel();

    tokio::spawn(async move {
        let total_events = recording.len();
        if sink.send(Event::ReplayStart { total_events }).await.is_err() {
            return;
        }

        let mut last_timestamp = 0u64;
        for recorded in recording {
            let delta_ms = recorded.timestamp.saturating_sub(last_timestamp);
            last_timestamp = recorded.timestamp;
            let wait = Duration::from_secs_f64(delta_ms as f64 / speed / 1000.0);

            tokio::select! {
                _ = tokio::time::sleep(wait) => {}
                _ = &mut cancel_rx => return,
            }

            if sink.send(recorded.event).await.is_err() {
                return;
            }
        }

        let _ = sink.send(Event::ReplayComplete).await;
    });

    ReplayHandle { cancel_tx: Some(cancel_tx) }
}

#[cfg(test)]
#[path = "replayer_tests.rs"]
mod tests;
