// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Path routing: which handler (if any) a changed file belongs to.
//!
//! A path is classified purely on string shape (see `§4.1` of the design:
//! "each create-or-modify event on a `.json` file is routed by path"). No
//! filesystem access happens here, which keeps it trivially unit-testable.

use crate::event::WatchKind;
use std::path::Path;

/// Suffixes that are never delivered to a handler even if they otherwise
/// look like a tracked path (lock files and high-watermark markers some
/// host runtimes drop next to the files they're writing).
const IGNORED_SUFFIXES: &[&str] = &[".lock", ".hwm", ".tmp", "~"];

/// Classify `path` per the watcher's routing table. Returns `None` for
/// anything that isn't a `.json` file under a recognized tree, or that
/// matches an ignored suffix.
pub fn classify(path: &Path) -> Option<WatchKind> {
    let path_str = path.to_string_lossy();

    if is_ignored(&path_str) {
        return None;
    }

    if !path_str.ends_with(".json") {
        return None;
    }

    if path_str.ends_with("/config.json") && path_components_contain(path, "teams") {
        return Some(WatchKind::TeamConfig);
    }
    if path_str.contains("/inboxes/") {
        return Some(WatchKind::Inbox);
    }
    if path_str.contains("/tasks/") {
        return Some(WatchKind::Task);
    }
    None
}

/// True if any path component (not counting the filename) equals
/// `component`, i.e. the path sits under a directory by that name.
fn path_components_contain(path: &Path, component: &str) -> bool {
    path.parent()
        .map(|parent| parent.components().any(|c| c.as_os_str() == component))
        .unwrap_or(false)
}

fn is_ignored(path_str: &str) -> bool {
    IGNORED_SUFFIXES.iter().any(|suffix| path_str.ends_with(suffix))
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
