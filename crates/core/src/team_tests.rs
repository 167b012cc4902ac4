// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;

fn member(name: &str) -> TeamMember {
    TeamMember {
        name: name.to_string(),
        agent_id: None,
        agent_type: None,
    }
}

#[test]
fn recognized_by_name_prefix() {
    let cfg = TeamConfigFile {
        name: Some("sprint-alpha".into()),
        members: vec![],
    };
    assert!(cfg.is_sprint_team());
}

#[test]
fn recognized_by_membership_shape() {
    let cfg = TeamConfigFile {
        name: None,
        members: vec![member("sprint-manager"), member("sprint-engineer-2")],
    };
    assert!(cfg.is_sprint_team());
}

#[test]
fn not_recognized_without_manager_or_engineer() {
    let cfg = TeamConfigFile {
        name: Some("other-team".into()),
        members: vec![member("sprint-manager")],
    };
    assert!(!cfg.is_sprint_team());
}

#[test]
fn autonomous_mode_requires_pm_member() {
    let cfg = TeamConfigFile {
        name: Some("sprint-alpha".into()),
        members: vec![member("sprint-pm"), member("sprint-manager")],
    };
    assert_eq!(cfg.mode(), Mode::Autonomous);
}

#[test]
fn manual_mode_is_the_default() {
    let cfg = TeamConfigFile {
        name: Some("sprint-alpha".into()),
        members: vec![member("sprint-manager"), member("sprint-engineer")],
    };
    assert_eq!(cfg.mode(), Mode::Manual);
}
