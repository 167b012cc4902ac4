// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use yare::parameterized;

#[parameterized(
    pm = { "sprint-pm", true },
    manager = { "sprint-manager", false },
    engineer = { "sprint-engineer", false },
    other = { "alice", false },
)]
fn is_pm_name_matches_exact(name: &str, expected: bool) {
    assert_eq!(Agent::is_pm_name(name), expected);
}

#[parameterized(
    bare = { "sprint-engineer", true },
    numbered = { "sprint-engineer-2", true },
    manager = { "sprint-manager", false },
    unrelated = { "engineer", false },
)]
fn is_engineer_name_matches_prefix(name: &str, expected: bool) {
    assert_eq!(Agent::is_engineer_name(name), expected);
}

#[test]
fn discovered_agent_starts_unknown() {
    let agent = Agent::discovered("sprint-engineer", AgentId::new("a-1"), None);
    assert_eq!(agent.status, AgentStatus::Unknown);
}

#[test]
fn mark_active_reports_change_once() {
    let mut agent = Agent::discovered("sprint-engineer", AgentId::new("a-1"), None);
    assert!(agent.mark_active());
    assert!(!agent.mark_active());
}

#[test]
fn mark_idle_overrides_active() {
    let mut agent = Agent::discovered("sprint-engineer", AgentId::new("a-1"), None);
    agent.mark_active();
    assert!(agent.mark_idle());
    assert_eq!(agent.status, AgentStatus::Idle);
}
