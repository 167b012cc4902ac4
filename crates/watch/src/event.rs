// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! The classified filesystem events the watcher hands to its consumer.
//! Raw `notify` events never escape this crate — only these three kinds.

use std::path::PathBuf;

/// Which handler a changed `.json` file routes to, per the path predicate
/// table in the watcher's design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchKind {
    TeamConfig,
    Inbox,
    Task,
}

/// One stabilized, classified filesystem change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub kind: WatchKind,
    pub path: PathBuf,
}

impl WatchEvent {
    pub fn new(kind: WatchKind, path: impl Into<PathBuf>) -> Self {
        Self { kind, path: path.into() }
    }
}
