// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! The fixed registry of process-learning signal detectors (§4.7). Run
//! once on sprint stop against the just-written analytics record and the
//! terminal `SprintState` (read before it is reset), each detector either
//! fires or doesn't; a firing becomes one upsert into the learnings store,
//! keyed by `signal_learning_id(signal, role)` so repeat sprints
//! accumulate frequency rather than duplicate rows.

use sprintdeck_core::{signal_learning_id, SprintState};
use sprintdeck_storage::AnalyticsRecord;

/// One detector firing: the id to upsert under, the role it's attributed
/// to, and the human-readable summary stored alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalFiring {
    pub id: String,
    pub role: String,
    pub summary: String,
}

type Detector = fn(&AnalyticsRecord, &SprintState) -> Option<SignalFiring>;

const DETECTORS: &[Detector] = &[incomplete_tasks, escalations_raised, budget_exceeded, checkpoint_friction];

/// Run every registered detector against one finished sprint, returning
/// the firings in detector-declaration order.
pub fn run_signal_detectors(record: &AnalyticsRecord, terminal: &SprintState) -> Vec<SignalFiring> {
    DETECTORS.iter().filter_map(|detect| detect(record, terminal)).collect()
}

/// Fires when the sprint ended with tasks still open, attributed to the
/// PM: a signal the roadmap was sized larger than the sprint could clear.
fn incomplete_tasks(record: &AnalyticsRecord, _terminal: &SprintState) -> Option<SignalFiring> {
    if record.task_count > 0 && record.completed_task_count < record.task_count {
        let role = "pm";
        Some(SignalFiring {
            id: signal_learning_id("INCOMPLETE_TASKS", role),
            role: role.to_string(),
            summary: format!(
                "Sprint ended with {} of {} tasks incomplete; consider a smaller roadmap per cycle.",
                record.task_count - record.completed_task_count,
                record.task_count
            ),
        })
    } else {
        None
    }
}

/// Fires when at least one escalation was raised, attributed to the
/// review manager: a signal the review gate is catching issues too late.
fn escalations_raised(record: &AnalyticsRecord, _terminal: &SprintState) -> Option<SignalFiring> {
    if record.escalation_count > 0 {
        let role = "manager";
        Some(SignalFiring {
            id: signal_learning_id("ESCALATIONS_RAISED", role),
            role: role.to_string(),
            summary: format!("{} escalation(s) raised this sprint; review earlier in the cycle.", record.escalation_count),
        })
    } else {
        None
    }
}

/// Fires when the sprint paused on an exceeded token/cost budget,
/// attributed to the PM: a signal the roadmap is too expensive for the
/// configured budget.
fn budget_exceeded(_record: &AnalyticsRecord, terminal: &SprintState) -> Option<SignalFiring> {
    if terminal.token_budget_exceeded {
        let role = "pm";
        Some(SignalFiring {
            id: signal_learning_id("BUDGET_EXCEEDED", role),
            role: role.to_string(),
            summary: "Sprint paused on an exceeded token/cost budget; scope the roadmap to fit.".to_string(),
        })
    } else {
        None
    }
}

/// Fires when a checkpoint was still pending at sprint stop, attributed
/// to the PM: a signal a human gate was left unattended.
fn checkpoint_friction(_record: &AnalyticsRecord, terminal: &SprintState) -> Option<SignalFiring> {
    if terminal.pending_checkpoint.is_some() {
        let role = "pm";
        Some(SignalFiring {
            id: signal_learning_id("CHECKPOINT_PENDING_AT_STOP", role),
            role: role.to_string(),
            summary: "A checkpoint was still pending when the sprint stopped; release checkpoints promptly.".to_string(),
        })
    } else {
        None
    }
}

#[cfg(test)]
#[path = "learning_signals_tests.rs"]
mod tests;
