// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use crate::event::WatchKind;
use std::fs;
use std::time::Duration as StdDuration;
use tempfile::tempdir;
use tokio::time::timeout;

#[tokio::test]
async fn startup_scan_delivers_pre_existing_tracked_files() {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().join("teams/sprint-demo");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.json"), "{}").unwrap();

    let (_watcher, mut rx) = DirWatcher::start(dir.path().to_path_buf()).unwrap();
    let event = timeout(StdDuration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    assert_eq!(event.kind, WatchKind::TeamConfig);
}

#[tokio::test]
async fn live_write_is_delivered_after_stabilizing() {
    let dir = tempdir().unwrap();
    let inbox_dir = dir.path().join("teams/sprint-demo/inboxes");
    fs::create_dir_all(&inbox_dir).unwrap();

    let (_watcher, mut rx) = DirWatcher::start_with_quiet_period(dir.path().to_path_buf(), StdDuration::from_millis(50)).unwrap();

    // Give the watcher a moment to attach before writing.
    tokio::time::sleep(StdDuration::from_millis(50)).await;
    fs::write(inbox_dir.join("sprint-engineer.json"), "[]").unwrap();

    let event = timeout(StdDuration::from_secs(2), rx.recv()).await.unwrap().unwrap();
    assert_eq!(event.kind, WatchKind::Inbox);
}

#[tokio::test]
async fn untracked_file_is_never_delivered() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("teams/sprint-demo")).unwrap();

    let (_watcher, mut rx) = DirWatcher::start_with_quiet_period(dir.path().to_path_buf(), StdDuration::from_millis(30)).unwrap();
    tokio::time::sleep(StdDuration::from_millis(50)).await;
    fs::write(dir.path().join("teams/sprint-demo/notes.txt"), "hi").unwrap();

    let result = timeout(StdDuration::from_millis(300), rx.recv()).await;
    assert!(result.is_err(), "no event should have been delivered for an untracked file");
}
