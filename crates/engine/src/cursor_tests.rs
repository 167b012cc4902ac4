// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use std::path::PathBuf;

#[test]
fn first_advance_yields_the_whole_file() {
    let mut cursors = InboxCursors::new();
    let path = PathBuf::from("/root/inbox.json");
    assert_eq!(cursors.advance(&path, 3), 0..3);
    assert_eq!(cursors.position(&path), 3);
}

#[test]
fn second_advance_yields_only_the_new_suffix() {
    let mut cursors = InboxCursors::new();
    let path = PathBuf::from("/root/inbox.json");
    cursors.advance(&path, 3);
    assert_eq!(cursors.advance(&path, 5), 3..5);
}

#[test]
fn unchanged_length_yields_an_empty_range() {
    let mut cursors = InboxCursors::new();
    let path = PathBuf::from("/root/inbox.json");
    cursors.advance(&path, 3);
    assert_eq!(cursors.advance(&path, 3), 3..3);
}

#[test]
fn shrinking_file_resets_cursor_without_backfill() {
    let mut cursors = InboxCursors::new();
    let path = PathBuf::from("/root/inbox.json");
    cursors.advance(&path, 5);
    assert_eq!(cursors.advance(&path, 2), 2..2);
    assert_eq!(cursors.position(&path), 2);
}

#[test]
fn distinct_paths_track_independent_cursors() {
    let mut cursors = InboxCursors::new();
    let a = PathBuf::from("/root/a.json");
    let b = PathBuf::from("/root/b.json");
    cursors.advance(&a, 4);
    assert_eq!(cursors.advance(&b, 2), 0..2);
}

#[test]
fn reset_clears_all_cursors() {
    let mut cursors = InboxCursors::new();
    let path = PathBuf::from("/root/inbox.json");
    cursors.advance(&path, 5);
    cursors.reset();
    assert_eq!(cursors.position(&path), 0);
}
