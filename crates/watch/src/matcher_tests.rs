// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use std::path::PathBuf;
use yare::parameterized;

#[parameterized(
    team_config = { "/root/teams/sprint-demo/config.json", Some(WatchKind::TeamConfig) },
    inbox = { "/root/teams/sprint-demo/inboxes/sprint-engineer.json", Some(WatchKind::Inbox) },
    task_file = { "/root/tasks/sprint-demo/backlog.json", Some(WatchKind::Task) },
    unrelated_json = { "/root/teams/sprint-demo/notes.json", None },
    non_json = { "/root/teams/sprint-demo/config.yaml", None },
    lock_suffix = { "/root/teams/sprint-demo/config.json.lock", None },
    hwm_suffix = { "/root/teams/sprint-demo/inboxes/sprint-engineer.json.hwm", None },
)]
fn classify_routes_by_path_shape(path: &str, expected: Option<WatchKind>) {
    assert_eq!(classify(&PathBuf::from(path)), expected);
}

#[test]
fn inbox_takes_priority_even_under_a_teams_tree() {
    let path = PathBuf::from("/root/teams/sprint-demo/inboxes/sprint-manager.json");
    assert_eq!(classify(&path), Some(WatchKind::Inbox));
}

#[test]
fn config_json_outside_a_teams_tree_is_ignored() {
    let path = PathBuf::from("/root/other/config.json");
    assert_eq!(classify(&path), None);
}
