// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Clock abstraction so tests can control time deterministically.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// Source of wall-clock time. Implementations must be cheap to clone and
/// safe to share across the watcher, budget tracker, and broadcast bus.
pub trait Clock: Clone + Send + Sync + 'static {
    /// Current time.
    fn now(&self) -> DateTime<Utc>;

    /// Milliseconds since the Unix epoch, as used in message ids and
    /// persisted timestamps.
    fn epoch_ms(&self) -> u64 {
        self.now().timestamp_millis().max(0) as u64
    }
}

/// Real wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock for tests: starts at a fixed instant and only
/// advances when told to.
#[derive(Clone)]
pub struct FakeClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(
                DateTime::parse_from_rfc3339("2026-01-01T00:00:00Z")
                    .expect("valid fixed epoch")
                    .with_timezone(&Utc),
            )),
        }
    }

    pub fn at(epoch_ms: u64) -> Self {
        let clock = Self::new();
        clock.set_epoch_ms(epoch_ms);
        clock
    }

    pub fn advance(&self, duration: chrono::Duration) {
        let mut now = self.now.lock();
        *now += duration;
    }

    pub fn set_epoch_ms(&self, epoch_ms: u64) {
        if let Some(dt) = DateTime::from_timestamp_millis(epoch_ms as i64) {
            *self.now.lock() = dt;
        }
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
