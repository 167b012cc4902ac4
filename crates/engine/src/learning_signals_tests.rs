// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use sprintdeck_core::{PendingCheckpoint, TokenUsage};

fn record(task_count: usize, completed: usize, escalations: u32) -> AnalyticsRecord {
    AnalyticsRecord {
        sprint_id: "sprint-1".to_string(),
        team_name: Some("sprint-team".to_string()),
        cycle: 1,
        token_usage: TokenUsage::default(),
        task_count,
        completed_task_count: completed,
        escalation_count: escalations,
    }
}

#[test]
fn fires_incomplete_tasks_when_some_remain_open() {
    let rec = record(5, 3, 0);
    let firings = run_signal_detectors(&rec, &SprintState::new());
    assert!(firings.iter().any(|f| f.id == "INCOMPLETE_TASKS:pm"));
}

#[test]
fn does_not_fire_incomplete_tasks_when_all_done() {
    let rec = record(5, 5, 0);
    let firings = run_signal_detectors(&rec, &SprintState::new());
    assert!(!firings.iter().any(|f| f.id == "INCOMPLETE_TASKS:pm"));
}

#[test]
fn fires_escalations_raised_when_count_positive() {
    let rec = record(5, 5, 2);
    let firings = run_signal_detectors(&rec, &SprintState::new());
    assert!(firings.iter().any(|f| f.id == "ESCALATIONS_RAISED:manager"));
}

#[test]
fn fires_budget_exceeded_from_terminal_state_flag() {
    let rec = record(0, 0, 0);
    let mut terminal = SprintState::new();
    terminal.token_budget_exceeded = true;
    let firings = run_signal_detectors(&rec, &terminal);
    assert!(firings.iter().any(|f| f.id == "BUDGET_EXCEEDED:pm"));
}

#[test]
fn fires_checkpoint_friction_when_pending_checkpoint_left_open() {
    let rec = record(0, 0, 0);
    let mut terminal = SprintState::new();
    terminal.pending_checkpoint = Some(PendingCheckpoint { task_id: "1".into(), task_subject: "A".into() });
    let firings = run_signal_detectors(&rec, &terminal);
    assert!(firings.iter().any(|f| f.id == "CHECKPOINT_PENDING_AT_STOP:pm"));
}

#[test]
fn healthy_sprint_fires_nothing() {
    let rec = record(5, 5, 0);
    let firings = run_signal_detectors(&rec, &SprintState::new());
    assert!(firings.is_empty());
}
