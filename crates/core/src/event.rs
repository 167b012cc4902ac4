// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! The WebSocket event envelope — a closed discriminated union keyed by
//! `type`. Every state mutation the watcher, inbox handler, budget
//! tracker, or verification gate makes is expressed as exactly one of
//! these before it reaches the broadcast bus.

use crate::agent::Agent;
use crate::decision::{Escalation, MergeConflict, PendingCheckpoint};
use crate::message::Message;
use crate::state::{Phase, SprintState};
use crate::task::Task;
use crate::token_usage::TokenUsage;
use serde::{Deserialize, Serialize};

/// Outcome of one configured verification command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub command: String,
    pub passed: bool,
    #[serde(default)]
    pub output: String,
}

/// `init`, `task_updated`, … — see `Event::name` for the wire tag of each.
/// `terminal_output` and `panes_discovered` bypass both persistence and
/// the replay recorder (`Event::bypasses_persistence`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "init")]
    Init { state: Box<SprintState> },

    #[serde(rename = "task_updated")]
    TaskUpdated { task: Task },

    #[serde(rename = "message_sent")]
    MessageSent { message: Message },

    #[serde(rename = "agent_status")]
    AgentStatus { agent: Agent },

    #[serde(rename = "paused")]
    Paused { paused: bool },

    #[serde(rename = "escalation")]
    EscalationRaised { escalation: Escalation },

    #[serde(rename = "merge_conflict")]
    MergeConflictRaised { merge_conflict: MergeConflict },

    /// Supplements the envelope's documented minimum: the counterpart to
    /// `escalation` for `POST /api/dismiss-escalation`.
    #[serde(rename = "escalation_dismissed")]
    EscalationDismissed,

    /// Supplements the envelope's documented minimum: the counterpart to
    /// `merge_conflict` for `POST /api/dismiss-merge-conflict`.
    #[serde(rename = "merge_conflict_dismissed")]
    MergeConflictDismissed,

    /// Supplements the envelope's documented minimum: the counterpart to
    /// `checkpoint` for `POST /api/checkpoint/release`.
    #[serde(rename = "checkpoint_released")]
    CheckpointReleased,

    /// Supplements the envelope's documented minimum: `POST /api/checkpoint`
    /// pre-registering a task id, distinct from the `checkpoint` event fired
    /// when that id actually reaches `READY_FOR_REVIEW`.
    #[serde(rename = "checkpoint_registered")]
    CheckpointRegistered { task_id: String },

    #[serde(rename = "cycle_info")]
    CycleInfo { cycle: u32, phase: Phase },

    #[serde(rename = "token_usage")]
    TokenUsageUpdated { usage: TokenUsage },

    #[serde(rename = "checkpoint")]
    Checkpoint { checkpoint: PendingCheckpoint },

    #[serde(rename = "validation")]
    Validation {
        passed: bool,
        checks: Vec<CheckResult>,
    },

    #[serde(rename = "task_validation")]
    TaskValidation {
        task_id: String,
        passed: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output: Option<String>,
    },

    #[serde(rename = "process_started")]
    ProcessStarted { name: String },

    #[serde(rename = "process_exited")]
    ProcessExited {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exit_code: Option<i32>,
    },

    /// High-volume; never persisted or recorded.
    #[serde(rename = "terminal_output")]
    TerminalOutput { pane: String, chunk: String },

    /// Never persisted or recorded.
    #[serde(rename = "panes_discovered")]
    PanesDiscovered { panes: Vec<String> },

    #[serde(rename = "webhook_status")]
    WebhookStatus {
        event: String,
        success: bool,
        attempts: u32,
    },

    #[serde(rename = "token_budget_approaching")]
    TokenBudgetApproaching,

    #[serde(rename = "token_budget_exceeded")]
    TokenBudgetExceeded,

    #[serde(rename = "replay_start")]
    ReplayStart { total_events: usize },

    #[serde(rename = "replay_complete")]
    ReplayComplete,
}

impl Event {
    /// The wire `type` tag, for logging without re-serializing.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Init { .. } => "init",
            Event::TaskUpdated { .. } => "task_updated",
            Event::MessageSent { .. } => "message_sent",
            Event::AgentStatus { .. } => "agent_status",
            Event::Paused { .. } => "paused",
            Event::EscalationRaised { .. } => "escalation",
            Event::MergeConflictRaised { .. } => "merge_conflict",
            Event::EscalationDismissed => "escalation_dismissed",
            Event::MergeConflictDismissed => "merge_conflict_dismissed",
            Event::CheckpointReleased => "checkpoint_released",
            Event::CheckpointRegistered { .. } => "checkpoint_registered",
            Event::CycleInfo { .. } => "cycle_info",
            Event::TokenUsageUpdated { .. } => "token_usage",
            Event::Checkpoint { .. } => "checkpoint",
            Event::Validation { .. } => "validation",
            Event::TaskValidation { .. } => "task_validation",
            Event::ProcessStarted { .. } => "process_started",
            Event::ProcessExited { .. } => "process_exited",
            Event::TerminalOutput { .. } => "terminal_output",
            Event::PanesDiscovered { .. } => "panes_discovered",
            Event::WebhookStatus { .. } => "webhook_status",
            Event::TokenBudgetApproaching => "token_budget_approaching",
            Event::TokenBudgetExceeded => "token_budget_exceeded",
            Event::ReplayStart { .. } => "replay_start",
            Event::ReplayComplete => "replay_complete",
        }
    }

    /// `terminal_output` and `panes_discovered` skip both the debounced
    /// persist and the replay recorder — high volume, replay-irrelevant.
    pub fn bypasses_persistence(&self) -> bool {
        matches!(self, Event::TerminalOutput { .. } | Event::PanesDiscovered { .. })
    }

    /// One-line summary for the daemon's structured log, cheaper than
    /// formatting the full payload.
    pub fn log_summary(&self) -> String {
        match self {
            Event::TaskUpdated { task } => format!("task_updated id={} status={}", task.id, task.status),
            Event::MessageSent { message } => {
                format!("message_sent from={} to={}", message.from, message.to)
            }
            Event::AgentStatus { agent } => format!("agent_status name={} status={}", agent.name, agent.status),
            other => other.name().to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
