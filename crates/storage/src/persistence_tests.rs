// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use sprintdeck_core::TaskId;
use tempfile::tempdir;

#[tokio::test]
async fn load_returns_none_when_no_file_exists() {
    let dir = tempdir().unwrap();
    let persistence = Persistence::new(Paths::for_project(dir.path()));
    assert!(persistence.load().unwrap().is_none());
}

#[tokio::test]
async fn flush_writes_immediately_and_load_round_trips() {
    let dir = tempdir().unwrap();
    let persistence = Persistence::new(Paths::for_project(dir.path()));
    let mut state = SprintState::new();
    state.team_name = Some("sprint-demo".into());
    state.upsert_task(sprintdeck_core::Task::new(TaskId::new("1"), "A"));

    persistence.flush(&state).await.unwrap();
    let loaded = persistence.load().unwrap().expect("state should load");
    assert_eq!(loaded.team_name.as_deref(), Some("sprint-demo"));
    assert!(loaded.tasks.contains_key(&TaskId::new("1")));
}

#[tokio::test]
async fn flush_strips_runtime_only_fields_on_subsequent_load() {
    let dir = tempdir().unwrap();
    let persistence = Persistence::new(Paths::for_project(dir.path()));
    let mut state = SprintState::new();
    state.tmux_available = true;
    state.tmux_session_name = Some("sess".into());
    state.project_name = Some("proj".into());

    persistence.flush(&state).await.unwrap();
    let loaded = persistence.load().unwrap().expect("state should load");
    assert!(!loaded.tmux_available);
    assert!(loaded.tmux_session_name.is_none());
    assert!(loaded.project_name.is_none());
}

#[tokio::test]
async fn load_treats_corrupt_file_as_absent() {
    let dir = tempdir().unwrap();
    let paths = Paths::for_project(dir.path());
    paths.ensure_data_root().unwrap();
    std::fs::write(paths.state_file(), "not json").unwrap();
    let persistence = Persistence::new(paths);
    assert!(persistence.load().unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn schedule_debounces_rapid_successive_calls() {
    let dir = tempdir().unwrap();
    let persistence = Persistence::new(Paths::for_project(dir.path()));

    let mut first = SprintState::new();
    first.cycle = 1;
    persistence.schedule(first).await;

    tokio::time::advance(Duration::from_millis(100)).await;

    let mut second = SprintState::new();
    second.cycle = 2;
    persistence.schedule(second).await;

    tokio::time::advance(Duration::from_millis(600)).await;
    tokio::task::yield_now().await;

    let loaded = persistence.load().unwrap().expect("state should have been written");
    assert_eq!(loaded.cycle, 2);
}
