// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Inbox handler: the protocol decoder's state machine. Processes the
//! slice of messages a cursor has already determined are new for one
//! recipient, folding usage, discovering agents, and running every
//! protocol-tag transition in order. Pure with respect to I/O — callers
//! (the reactor) are responsible for actually invoking the verification
//! gate, delivering webhooks, and persisting memory, all deferred here
//! as [`InboxEffect`] values.

use crate::budget::{self, BudgetOutcome};
use sprintdeck_core::{
    is_idle_sentinel, parse_memory_body, parse_process_learning_body, protocol, strip_envelope_markup,
    AgentId, AgentStatus, Clock, Escalation, Event, IdGen, Message, Mode, PendingCheckpoint, Phase,
    PriceTable, ProtocolTag, RawInboxMessage, SprintState, TaskId, TaskStatus, UsageDelta,
};

/// Agent-supplied `PROCESS_LEARNING:` lines are capped at this many per
/// sprint (§4.7). Not a protocol tag: it is recognized independently of
/// `protocol::decode`'s closed enum, since it never drives the task/review
/// state machine.
pub const MAX_PROCESS_LEARNINGS_PER_SPRINT: u32 = 5;
const PROCESS_LEARNING_PREFIX: &str = "PROCESS_LEARNING:";

/// A side effect the inbox handler asks its caller to carry out. None of
/// these touch `state` directly — by the time one is produced, every
/// state mutation it implies has already happened.
#[derive(Debug, Clone)]
pub enum InboxEffect {
    ScheduleTaskVerification { task_id: TaskId },
    ScheduleCycleVerification,
    ScheduleSprintVerification,
    FireWebhook { event: &'static str, payload: serde_json::Value },
    FirePluginHook { hook: &'static str, payload: serde_json::Value },
    PersistMemory { role: String, key: String, value: String },
    PersistProcessLearning { role: String, action: String },
}

#[derive(Debug, Default)]
pub struct InboxOutcome {
    pub events: Vec<Event>,
    pub effects: Vec<InboxEffect>,
}

/// Parse an inbox file's raw JSON bytes, tolerant of a bare array or a
/// single object coerced to a one-element array (mirrors
/// [`crate::task_handler::parse_raw_tasks`] for the same host-runtime
/// looseness on the inbox side of the wire contract).
///
/// Returns `None` on an unparseable read (e.g. a torn write caught
/// mid-write) so the caller can leave the cursor untouched rather than
/// advancing it against a bogus length-0 read — see §7's malformed-input
/// rule and §8 invariant 4 (cursor is non-decreasing).
pub fn parse_raw_messages(bytes: &[u8]) -> Option<Vec<RawInboxMessage>> {
    if let Ok(messages) = serde_json::from_slice::<Vec<RawInboxMessage>>(bytes) {
        return Some(messages);
    }
    serde_json::from_slice::<RawInboxMessage>(bytes).map(|message| vec![message]).ok()
}

/// Process every message in `messages` (already known to be new by the
/// caller's cursor) against `state`, addressed to `recipient`.
pub fn process_inbox_messages(
    state: &mut SprintState,
    recipient: &str,
    messages: &[RawInboxMessage],
    price_table: &PriceTable,
    model: Option<&str>,
    id_gen: &impl IdGen,
    clock: &impl Clock,
) -> InboxOutcome {
    let mut outcome = InboxOutcome::default();
    state.discover_agent(recipient, || AgentId::new(id_gen.next()));

    for raw in messages {
        let from = raw.from.clone().unwrap_or_else(|| "unknown".to_string());
        state.discover_agent(&from, || AgentId::new(id_gen.next()));

        if let Some(usage) = raw.usage {
            let delta = UsageDelta { input_tokens: usage.input_tokens, output_tokens: usage.output_tokens };
            fold_usage(state, recipient, delta, price_table, model, &mut outcome);
        }

        let content = strip_envelope_markup(raw.extract_content()).to_string();

        if is_idle_sentinel(&content) {
            mark_status(state, recipient, true, &mut outcome);
            continue;
        }

        if state.agent_status(&from) != Some(AgentStatus::Active) {
            mark_status(state, &from, false, &mut outcome);
        }

        let timestamp = raw
            .timestamp
            .as_deref()
            .and_then(|t| chrono::DateTime::parse_from_rfc3339(t).ok())
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|| clock.now().to_rfc3339());

        let decoded = protocol::decode(&content);
        let message_id = format!("{}-{}", clock.epoch_ms(), state.messages.len());
        let message = Message::new(
            message_id,
            timestamp,
            from.clone(),
            recipient.to_string(),
            content.clone(),
            decoded.as_ref().map(|d| d.tag),
        );
        state.append_message(message.clone());
        outcome.events.push(Event::MessageSent { message });

        if let Some(decoded) = decoded {
            apply_transition(state, &decoded, &from, recipient, clock, &mut outcome);
        }

        record_process_learning(state, &content, &mut outcome);
    }

    outcome
}

/// Recognize a `PROCESS_LEARNING: <role> — <action>` body. Independent of
/// `protocol::decode`: this prefix never appears in `ProtocolTag` since it
/// carries no task id and never drives the review/cycle state machine, it
/// only ever feeds the learnings store on sprint stop.
fn record_process_learning(state: &mut SprintState, content: &str, outcome: &mut InboxOutcome) {
    if state.process_learnings_recorded >= MAX_PROCESS_LEARNINGS_PER_SPRINT {
        return;
    }
    let Some(rest) = content.trim_start().strip_prefix(PROCESS_LEARNING_PREFIX) else {
        return;
    };
    let Some((role, action)) = parse_process_learning_body(rest) else {
        return;
    };
    state.process_learnings_recorded += 1;
    outcome.effects.push(InboxEffect::PersistProcessLearning { role, action });
}

fn fold_usage(
    state: &mut SprintState,
    recipient: &str,
    delta: UsageDelta,
    price_table: &PriceTable,
    model: Option<&str>,
    outcome: &mut InboxOutcome,
) {
    let budget = state.token_budget_config;
    let price = price_table.resolve(model);
    let Some(result) = budget::accumulate(state, recipient, delta, price, budget.as_ref()) else {
        return;
    };
    outcome.events.push(Event::TokenUsageUpdated { usage: state.token_usage.clone() });
    match result {
        BudgetOutcome::TokenUsageUpdated => {}
        BudgetOutcome::TokenUsageUpdatedAndApproaching => {
            outcome.events.push(Event::TokenBudgetApproaching);
        }
        BudgetOutcome::TokenUsageUpdatedAndExceeded => {
            outcome.events.push(Event::Paused { paused: true });
            outcome.events.push(Event::TokenBudgetExceeded);
            outcome.effects.push(InboxEffect::FireWebhook {
                event: "token_budget_exceeded",
                payload: serde_json::json!({ "usage": state.token_usage }),
            });
        }
    }
}

/// Mark `name` idle (`idle = true`) or active, broadcasting `agent_status`
/// only if the status actually changed.
fn mark_status(state: &mut SprintState, name: &str, idle: bool, outcome: &mut InboxOutcome) {
    let Some(agent) = state.agent_mut(name) else { return };
    let changed = if idle { agent.mark_idle() } else { agent.mark_active() };
    if changed {
        outcome.events.push(Event::AgentStatus { agent: agent.clone() });
    }
}

fn broadcast_task(state: &SprintState, id: &TaskId, outcome: &mut InboxOutcome) {
    if let Some(task) = state.tasks.get(id) {
        outcome.events.push(Event::TaskUpdated { task: task.clone() });
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Analyzing => "analyzing",
        Phase::Sprinting => "sprinting",
        Phase::Validating => "validating",
    }
}

fn broadcast_phase(state: &mut SprintState, note: &str, clock: &impl Clock, outcome: &mut InboxOutcome) {
    outcome.events.push(Event::CycleInfo { cycle: state.cycle, phase: state.phase });
    let content = format!("{note} (cycle {}, phase {})", state.cycle, phase_label(state.phase));
    let id = format!("{}-{}", clock.epoch_ms(), state.messages.len());
    let message = Message::new(id, clock.now().to_rfc3339(), "system", "*", content, None);
    state.append_message(message.clone());
    outcome.events.push(Event::MessageSent { message });
}

fn apply_transition(
    state: &mut SprintState,
    decoded: &protocol::DecodedProtocol,
    from: &str,
    recipient: &str,
    clock: &impl Clock,
    outcome: &mut InboxOutcome,
) {
    let autonomous = state.mode == Some(Mode::Autonomous);
    if decoded.tag.autonomous_only() && !autonomous {
        return;
    }
    let tid = decoded.task_id.as_ref().map(|s| TaskId::new(s.clone()));

    match decoded.tag {
        ProtocolTag::TaskAssigned => {
            if let Some(tid) = &tid {
                state.raise_task_status(tid, TaskStatus::InProgress);
                state.set_task_owner(tid, recipient);
                broadcast_task(state, tid, outcome);
            }
        }
        ProtocolTag::ReadyForReview => {
            if let Some(tid) = &tid {
                if !state.review_task_ids.contains(tid) {
                    state.push_review(tid.clone());
                    state.raise_task_status(tid, TaskStatus::InProgress);
                    broadcast_task(state, tid, outcome);
                    if state.take_checkpoint(tid) {
                        let task_subject = state.tasks.get(tid).map(|t| t.subject.clone()).unwrap_or_default();
                        let checkpoint = PendingCheckpoint { task_id: tid.as_str().to_string(), task_subject };
                        state.pending_checkpoint = Some(checkpoint.clone());
                        outcome.events.push(Event::Checkpoint { checkpoint });
                        outcome.effects.push(InboxEffect::FireWebhook {
                            event: "checkpoint_hit",
                            payload: serde_json::json!({ "taskId": tid.as_str() }),
                        });
                    }
                }
            }
        }
        ProtocolTag::Approved => {
            if let Some(tid) = &tid {
                state.move_review_to_validating(tid.clone());
                broadcast_task(state, tid, outcome);
                outcome.effects.push(InboxEffect::ScheduleTaskVerification { task_id: tid.clone() });
            }
        }
        ProtocolTag::RequestChanges | ProtocolTag::Resubmit => {
            if let Some(tid) = &tid {
                state.remove_review(tid);
                state.raise_task_status(tid, TaskStatus::InProgress);
                broadcast_task(state, tid, outcome);
            }
        }
        ProtocolTag::Escalate => {
            let escalation = match &tid {
                Some(tid) => Escalation::from_agent(tid.as_str(), decoded.rest.clone()),
                None => Escalation::from_agent(String::new(), decoded.rest.clone()),
            };
            state.escalation = Some(escalation.clone());
            outcome.events.push(Event::EscalationRaised { escalation: escalation.clone() });
            let payload = serde_json::json!({ "from": from, "taskId": tid.as_ref().map(|t| t.as_str()), "message": escalation.message });
            outcome.effects.push(InboxEffect::FireWebhook { event: "task_escalated", payload: payload.clone() });
            outcome.effects.push(InboxEffect::FirePluginHook { hook: "task_escalated", payload });
        }
        ProtocolTag::Memory => {
            if let Some((key, value)) = parse_memory_body(&decoded.rest) {
                outcome.effects.push(InboxEffect::PersistMemory { role: from.to_string(), key, value });
            }
        }
        ProtocolTag::RoadmapReady => {
            state.phase = Phase::Sprinting;
            if let Some(cycle) = decoded.task_id.as_deref().and_then(|s| s.parse().ok()) {
                state.cycle = cycle;
            }
            broadcast_phase(state, "Roadmap ready", clock, outcome);
        }
        ProtocolTag::CycleComplete => {
            state.phase = Phase::Validating;
            broadcast_phase(state, "Cycle complete", clock, outcome);
            outcome.effects.push(InboxEffect::ScheduleCycleVerification);
        }
        ProtocolTag::SprintComplete => {
            state.phase = Phase::Validating;
            broadcast_phase(state, "Sprint complete", clock, outcome);
            outcome.effects.push(InboxEffect::ScheduleSprintVerification);
            outcome.effects.push(InboxEffect::FireWebhook {
                event: "sprint_complete",
                payload: serde_json::json!({}),
            });
        }
        ProtocolTag::NextCycle => {
            state.phase = Phase::Analyzing;
            state.cycle = decoded.task_id.as_deref().and_then(|s| s.parse().ok()).unwrap_or(state.cycle + 1);
            broadcast_phase(state, "Next cycle", clock, outcome);
        }
        ProtocolTag::Acceptance => {
            state.phase = Phase::Analyzing;
            broadcast_phase(state, "Acceptance", clock, outcome);
        }
    }
}

#[cfg(test)]
#[path = "inbox_tests.rs"]
mod tests;
