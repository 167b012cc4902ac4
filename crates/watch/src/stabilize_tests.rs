// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use crate::event::WatchKind;
use std::path::PathBuf;

fn event(path: &str) -> WatchEvent {
    WatchEvent::new(WatchKind::Inbox, PathBuf::from(path))
}

#[tokio::test(start_paused = true)]
async fn delivers_once_after_the_quiet_period() {
    let stabilizer = Stabilizer::new(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::channel(8);

    stabilizer.notify(event("/root/inboxes/a.json"), tx).await;
    tokio::time::advance(Duration::from_millis(150)).await;

    let delivered = rx.recv().await.unwrap();
    assert_eq!(delivered.path, PathBuf::from("/root/inboxes/a.json"));
}

#[tokio::test(start_paused = true)]
async fn rapid_successive_writes_coalesce_into_one_delivery() {
    let stabilizer = Stabilizer::new(Duration::from_millis(100));
    let (tx, mut rx) = mpsc::channel(8);

    stabilizer.notify(event("/root/inboxes/a.json"), tx.clone()).await;
    tokio::time::advance(Duration::from_millis(50)).await;
    stabilizer.notify(event("/root/inboxes/a.json"), tx.clone()).await;
    tokio::time::advance(Duration::from_millis(50)).await;
    stabilizer.notify(event("/root/inboxes/a.json"), tx).await;

    tokio::time::advance(Duration::from_millis(150)).await;
    tokio::task::yield_now().await;

    assert!(rx.recv().await.is_some());
    assert!(rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn independent_paths_each_get_their_own_delivery() {
    let stabilizer = Stabilizer::new(Duration::from_millis(50));
    let (tx, mut rx) = mpsc::channel(8);

    stabilizer.notify(event("/root/inboxes/a.json"), tx.clone()).await;
    stabilizer.notify(event("/root/inboxes/b.json"), tx).await;
    tokio::time::advance(Duration::from_millis(100)).await;
    tokio::task::yield_now().await;

    let mut seen = vec![rx.recv().await.unwrap().path, rx.recv().await.unwrap().path];
    seen.sort();
    assert_eq!(seen, vec![PathBuf::from("/root/inboxes/a.json"), PathBuf::from("/root/inboxes/b.json")]);
}
