// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use serde_json::json;
use sprintdeck_core::TaskId;
use tempfile::tempdir;

#[test]
fn write_creates_all_four_files() {
    let dir = tempdir().unwrap();
    let paths = Paths::for_project(dir.path());
    let writer = HistoryWriter::new(paths.clone());

    let tasks = vec![Task::new(TaskId::new("1"), "A")];
    let record = HistoryRecord {
        sprint_id: "sprint-1".into(),
        team_name: Some("sprint-demo".into()),
        cycle: 2,
        token_usage: TokenUsage::default(),
    };

    writer
        .write("sprint-1", &tasks, &json!([{"from": "a", "to": "b"}]), &record, "# Retro\n")
        .unwrap();

    assert!(paths.sprint_tasks_file("sprint-1").exists());
    assert!(paths.sprint_messages_file("sprint-1").exists());
    assert!(paths.sprint_record_file("sprint-1").exists());
    assert!(paths.sprint_retro_file("sprint-1").exists());

    let loaded: HistoryRecord = serde_json::from_slice(&std::fs::read(paths.sprint_record_file("sprint-1")).unwrap()).unwrap();
    assert_eq!(loaded, record);
}
