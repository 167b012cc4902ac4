// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sprintdeck-watch: observes the project's `teams/` and `tasks/` trees
//! and hands classified, write-stabilized events to `sprintdeck-engine`.
//! Owns `notify` entirely — nothing above this crate touches it.

pub mod error;
pub mod event;
pub mod matcher;
pub mod scan;
pub mod stabilize;
pub mod watcher;

pub use error::WatchError;
pub use event::{WatchEvent, WatchKind};
pub use matcher::classify;
pub use scan::{scan as scan_root, STALENESS_THRESHOLD};
pub use stabilize::{Stabilizer, DEFAULT_QUIET_PERIOD};
pub use watcher::DirWatcher;

#[cfg(feature = "test-support")]
pub use watcher::fake::FakeWatcher;
