// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use tempfile::tempdir;

fn sample(sprint_id: &str) -> AnalyticsRecord {
    AnalyticsRecord {
        sprint_id: sprint_id.into(),
        team_name: Some("sprint-demo".into()),
        cycle: 1,
        token_usage: TokenUsage::default(),
        task_count: 3,
        completed_task_count: 2,
        escalation_count: 0,
    }
}

#[test]
fn all_returns_empty_when_no_file() {
    let dir = tempdir().unwrap();
    let store = AnalyticsStore::new(Paths::for_project(dir.path()));
    assert!(store.all().unwrap().is_empty());
}

#[test]
fn append_grows_the_array() {
    let dir = tempdir().unwrap();
    let store = AnalyticsStore::new(Paths::for_project(dir.path()));
    store.append(sample("sprint-1")).unwrap();
    store.append(sample("sprint-2")).unwrap();
    let all = store.all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].sprint_id, "sprint-1");
    assert_eq!(all[1].sprint_id, "sprint-2");
}
