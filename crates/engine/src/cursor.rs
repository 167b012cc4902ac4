// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Per-inbox-file read cursors. A cursor is just the count of messages
//! already processed from that file; a message array of length `n` means
//! entries `[cursor, n)` are new. Cursors never rewind during a live
//! sprint, and are reset wholesale on sprint stop.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct InboxCursors {
    positions: HashMap<PathBuf, usize>,
}

impl InboxCursors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Given the freshly-read message count for `path`, return the range
    /// of indices that are new and advance the cursor to `len`.
    ///
    /// If `len` is less than the current cursor (the file shrank, which
    /// "should not occur" per the design but is handled defensively), the
    /// cursor resets to `len` with no backfill — the shrink itself is not
    /// re-delivered as new messages.
    pub fn advance(&mut self, path: &Path, len: usize) -> std::ops::Range<usize> {
        let cursor = self.positions.entry(path.to_path_buf()).or_insert(0);
        if len < *cursor {
            *cursor = len;
            return len..len;
        }
        let start = *cursor;
        *cursor = len;
        start..len
    }

    pub fn position(&self, path: &Path) -> usize {
        self.positions.get(path).copied().unwrap_or(0)
    }

    pub fn reset(&mut self) {
        self.positions.clear();
    }
}

#[cfg(test)]
#[path = "cursor_tests.rs"]
mod tests;
