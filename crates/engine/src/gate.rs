// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Gate orchestration: runs the configured verification commands through
//! a [`VerificationGate`] and folds the report into the scope-specific
//! state transition (§4.5). Two scopes share the same command set and
//! the same runner, differing only in what a pass/fail does to
//! `SprintState` and which events/effects come out of it.

use crate::verify::{GateReport, VerificationGate};
use sprintdeck_core::{Clock, Escalation, Event, Message, SprintState, TaskId, TaskStatus};

#[derive(Debug, Clone)]
pub enum GateEffect {
    FireWebhook { event: &'static str, payload: serde_json::Value },
    FirePluginHook { hook: &'static str, payload: serde_json::Value },
}

#[derive(Debug, Default)]
pub struct GateOutcome {
    pub events: Vec<Event>,
    pub effects: Vec<GateEffect>,
}

/// Run the per-task gate for `task_id`, already in `validatingTaskIds`.
/// Owner is preserved on completion; a failure reverts the task to
/// `in_progress` (it was never raised past that by APPROVED) and leaves
/// it out of `validatingTaskIds` either way.
///
/// Convenience wrapper over [`apply_task_gate_report`] for callers that
/// don't need to run the verification commands outside a held lock; the
/// daemon reactor calls the two halves separately instead so a slow
/// verification command never blocks other handlers.
pub async fn run_task_gate(
    state: &mut SprintState,
    task_id: &TaskId,
    gate: &dyn VerificationGate,
    commands: &[String],
    clock: &impl Clock,
) -> GateOutcome {
    let report = gate.run(commands).await;
    apply_task_gate_report(state, task_id, &report, clock)
}

/// Fold an already-run [`GateReport`] into the per-task state transition.
/// Contains no suspension points; safe to call while holding a state lock.
pub fn apply_task_gate_report(
    state: &mut SprintState,
    task_id: &TaskId,
    report: &GateReport,
    clock: &impl Clock,
) -> GateOutcome {
    let mut outcome = GateOutcome::default();
    state.remove_validating(task_id);

    if report.passed_fail_open() {
        state.raise_task_status(task_id, TaskStatus::Completed);
        if let Some(task) = state.tasks.get(task_id) {
            outcome.events.push(Event::TaskUpdated { task: task.clone() });
        }
        outcome.events.push(Event::TaskValidation { task_id: task_id.as_str().to_string(), passed: true, output: None });
        outcome.effects.push(GateEffect::FireWebhook {
            event: "task_completed",
            payload: serde_json::json!({ "taskId": task_id.as_str() }),
        });
        outcome.effects.push(GateEffect::FirePluginHook {
            hook: "task_completed",
            payload: serde_json::json!({ "taskId": task_id.as_str() }),
        });
    } else {
        let output = report_output(report);
        outcome.events.push(Event::TaskValidation {
            task_id: task_id.as_str().to_string(),
            passed: false,
            output: Some(output.clone()),
        });
        let content = format!("Approval of task {} reverted: verification failed. Task remains in_progress.", task_id);
        let id = format!("{}-{}", clock.epoch_ms(), state.messages.len());
        let message = Message::new(id, clock.now().to_rfc3339(), "system", "*", content, None);
        state.append_message(message.clone());
        outcome.events.push(Event::MessageSent { message });
    }

    outcome
}

/// Run the cycle/sprint gate. Both scopes emit the same shape of event;
/// the caller decides which phase tag produced it for the system message.
///
/// Convenience wrapper over [`apply_cycle_gate_report`]; see its note on
/// [`run_task_gate`] for why the daemon calls the two halves separately.
pub async fn run_cycle_gate(
    state: &mut SprintState,
    gate: &dyn VerificationGate,
    commands: &[String],
    clock: &impl Clock,
) -> GateOutcome {
    let report = gate.run(commands).await;
    apply_cycle_gate_report(state, &report, clock)
}

/// Fold an already-run [`GateReport`] into the cycle/sprint state
/// transition. Contains no suspension points; safe to call while holding
/// a state lock.
pub fn apply_cycle_gate_report(state: &mut SprintState, report: &GateReport, clock: &impl Clock) -> GateOutcome {
    let mut outcome = GateOutcome::default();
    let passed = report.passed_strict();

    outcome.events.push(Event::Validation { passed, checks: report.checks.clone() });
    let content = if passed {
        "Cycle verification passed.".to_string()
    } else {
        format!("Cycle verification failed: {}", report_output(report))
    };
    let id = format!("{}-{}", clock.epoch_ms(), state.messages.len());
    let message = Message::new(id, clock.now().to_rfc3339(), "system", "*", content, None);
    state.append_message(message.clone());
    outcome.events.push(Event::MessageSent { message });

    if !passed {
        let escalation = Escalation::from_system(report_output(report));
        state.escalation = Some(escalation.clone());
        outcome.events.push(Event::EscalationRaised { escalation });
    }

    outcome
}

fn report_output(report: &GateReport) -> String {
    if !report.invocation_errors.is_empty() {
        return format!("invocation error: {}", report.invocation_errors.join(", "));
    }
    report
        .checks
        .iter()
        .filter(|c| !c.passed)
        .map(|c| format!("{}: {}", c.command, c.output))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
