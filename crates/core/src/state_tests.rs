// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use crate::task::{Task, TaskStatus};

fn tid(s: &str) -> TaskId {
    TaskId::new(s)
}

#[test]
fn discover_agent_only_once() {
    let mut state = SprintState::new();
    assert!(state.discover_agent("sprint-engineer", || AgentId::new("a-1")));
    assert!(!state.discover_agent("sprint-engineer", || AgentId::new("a-2")));
    assert_eq!(state.agents.len(), 1);
}

#[test]
fn upsert_task_applies_pending_override() {
    let mut state = SprintState::new();
    state.raise_task_status(&tid("1"), TaskStatus::InProgress);
    let changed = state.upsert_task(Task::new(tid("1"), "A"));
    assert!(changed);
    assert_eq!(state.tasks[&tid("1")].status, TaskStatus::InProgress);
}

#[test]
fn raise_task_status_never_decreases_displayed_status() {
    let mut state = SprintState::new();
    state.upsert_task(Task::new(tid("1"), "A"));
    state.raise_task_status(&tid("1"), TaskStatus::Completed);
    // A later, lower-ranked re-write of the disk file must not regress it.
    let changed = state.upsert_task(Task::new(tid("1"), "A"));
    assert!(!changed);
    assert_eq!(state.tasks[&tid("1")].status, TaskStatus::Completed);
}

#[test]
fn upsert_task_reports_no_change_for_identical_task() {
    let mut state = SprintState::new();
    assert!(state.upsert_task(Task::new(tid("1"), "A")));
    assert!(!state.upsert_task(Task::new(tid("1"), "A")));
}

#[test]
fn unblock_dependents_clears_matching_entries_only() {
    let mut state = SprintState::new();
    let mut blocked = Task::new(tid("2"), "B");
    blocked.blocked_by.insert(tid("1"));
    let mut unrelated = Task::new(tid("3"), "C");
    unrelated.blocked_by.insert(tid("9"));
    state.upsert_task(blocked);
    state.upsert_task(unrelated);

    let changed = state.unblock_dependents(&tid("1"));
    assert_eq!(changed, vec![tid("2")]);
    assert!(state.tasks[&tid("2")].blocked_by.is_empty());
    assert!(state.tasks[&tid("3")].blocked_by.contains(&tid("9")));
}

#[test]
fn push_review_dedups() {
    let mut state = SprintState::new();
    assert!(state.push_review(tid("1")));
    assert!(!state.push_review(tid("1")));
    assert_eq!(state.review_task_ids.len(), 1);
}

#[test]
fn move_review_to_validating_keeps_lists_disjoint() {
    let mut state = SprintState::new();
    state.push_review(tid("1"));
    state.move_review_to_validating(tid("1"));
    assert!(state.review_task_ids.is_empty());
    assert_eq!(state.validating_task_ids, vec![tid("1")]);
}

#[test]
fn checkpoint_add_and_take() {
    let mut state = SprintState::new();
    state.add_checkpoint(tid("1"));
    assert!(state.take_checkpoint(&tid("1")));
    assert!(!state.take_checkpoint(&tid("1")));
}

#[test]
fn send_team_init_message_is_one_shot() {
    let mut state = SprintState::new();
    assert!(state.send_team_init_message("Sprint initialized", "1-0", "t"));
    assert!(!state.send_team_init_message("Sprint initialized", "1-1", "t"));
    assert_eq!(state.messages.len(), 1);
}

#[test]
fn reset_clears_one_shot_flag_and_team_data() {
    let mut state = SprintState::new();
    state.send_team_init_message("Sprint initialized", "1-0", "t");
    state.team_name = Some("sprint-demo".into());
    state.reset();
    assert!(!state.team_init_message_sent);
    assert!(state.team_name.is_none());
    assert!(state.messages.is_empty());
}

#[test]
fn strip_runtime_fields_clears_only_those_three() {
    let mut state = SprintState::new();
    state.tmux_available = true;
    state.tmux_session_name = Some("sess".into());
    state.project_name = Some("proj".into());
    state.upsert_task(Task::new(tid("1"), "A"));
    state.strip_runtime_fields();
    assert!(!state.tmux_available);
    assert!(state.tmux_session_name.is_none());
    assert!(state.project_name.is_none());
    assert!(state.tasks.contains_key(&tid("1")));
}
