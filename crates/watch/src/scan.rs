// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Startup full scan. Everything under `root` that classifies to a
//! tracked kind is delivered, except during this initial pass a file
//! older than the staleness threshold is skipped — a restart must not
//! reprocess inboxes from a long-finished sprint. After the scan
//! completes, the live watcher delivers every event regardless of age.

use crate::event::WatchEvent;
use crate::matcher::classify;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

/// A restart ignores anything untouched for this long during the scan.
pub const STALENESS_THRESHOLD: Duration = Duration::from_secs(2 * 60 * 60);

/// Walk `root` recursively, returning a `WatchEvent` for every tracked
/// file whose modification time is within `staleness_threshold` of `now`
/// (or whose mtime can't be read — treated as fresh rather than dropped).
pub fn scan(root: &Path, staleness_threshold: Duration, now: SystemTime) -> Vec<WatchEvent> {
    let mut events = Vec::new();
    walk(root, staleness_threshold, now, &mut events);
    events
}

fn walk(dir: &Path, staleness_threshold: Duration, now: SystemTime, events: &mut Vec<WatchEvent>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, staleness_threshold, now, events);
            continue;
        }
        let Some(kind) = classify(&path) else { continue };
        if is_stale(&path, staleness_threshold, now) {
            continue;
        }
        events.push(WatchEvent::new(kind, path));
    }
}

fn is_stale(path: &Path, staleness_threshold: Duration, now: SystemTime) -> bool {
    let Ok(metadata) = fs::metadata(path) else { return false };
    let Ok(modified) = metadata.modified() else { return false };
    match now.duration_since(modified) {
        Ok(age) => age > staleness_threshold,
        Err(_) => false,
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
