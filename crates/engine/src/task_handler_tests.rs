// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use sprintdeck_core::{Agent, AgentId, TaskId, TaskStatus};

#[test]
fn parses_bare_array() {
    let raw = parse_raw_tasks(br#"[{"id":"1","subject":"A"}]"#);
    assert_eq!(raw.len(), 1);
}

#[test]
fn parses_single_object_as_singleton_array() {
    let raw = parse_raw_tasks(br#"{"id":"1","subject":"A"}"#);
    assert_eq!(raw.len(), 1);
}

#[test]
fn malformed_json_parses_to_empty() {
    assert!(parse_raw_tasks(b"not json").is_empty());
}

#[test]
fn filters_out_agent_name_subjects() {
    let mut state = SprintState::new();
    state
        .agents
        .insert("sprint-engineer".into(), Agent::discovered("sprint-engineer", AgentId::new("a-1"), None));

    let raw = parse_raw_tasks(br#"[{"id":"1","subject":"sprint-engineer"},{"id":"2","subject":"real task"}]"#);
    let events = apply_task_file(&mut state, raw);

    assert_eq!(events.len(), 1);
    assert!(!state.tasks.contains_key(&TaskId::new("1")));
    assert!(state.tasks.contains_key(&TaskId::new("2")));
}

#[test]
fn completion_cascades_to_unblock_dependents() {
    let mut state = SprintState::new();
    apply_task_file(&mut state, parse_raw_tasks(br#"[{"id":"1","subject":"A","status":"pending"}]"#));
    apply_task_file(
        &mut state,
        parse_raw_tasks(br#"[{"id":"2","subject":"B","status":"pending","blockedBy":["1"]}]"#),
    );

    let events = apply_task_file(&mut state, parse_raw_tasks(br#"[{"id":"1","subject":"A","status":"completed"}]"#));

    // One event for task 1 becoming completed, one cascaded for task 2 unblocking.
    assert_eq!(events.len(), 2);
    assert!(state.tasks[&TaskId::new("2")].blocked_by.is_empty());
    assert_eq!(state.tasks[&TaskId::new("1")].status, TaskStatus::Completed);
}

#[test]
fn reapplying_identical_task_emits_no_event() {
    let mut state = SprintState::new();
    apply_task_file(&mut state, parse_raw_tasks(br#"[{"id":"1","subject":"A","status":"pending"}]"#));
    let events = apply_task_file(&mut state, parse_raw_tasks(br#"[{"id":"1","subject":"A","status":"pending"}]"#));
    assert!(events.is_empty());
}
