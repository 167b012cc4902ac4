// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use std::path::PathBuf;

#[test]
fn extracts_team_name_from_config_path() {
    let path = PathBuf::from("/proj/teams/sprint-team/config.json");
    assert_eq!(team_name_from_config_path(&path), Some("sprint-team".to_string()));
}

#[test]
fn rejects_config_path_not_under_teams() {
    let path = PathBuf::from("/proj/other/sprint-team/config.json");
    assert_eq!(team_name_from_config_path(&path), None);
}

#[test]
fn extracts_recipient_from_inbox_path() {
    let path = PathBuf::from("/proj/teams/sprint-team/inboxes/sprint-engineer.json");
    assert_eq!(recipient_from_inbox_path(&path), Some("sprint-engineer".to_string()));
}

#[test]
fn extracts_team_name_from_task_path() {
    let path = PathBuf::from("/proj/tasks/sprint-team/tasks.json");
    assert_eq!(team_name_from_task_path(&path), Some("sprint-team".to_string()));
}
