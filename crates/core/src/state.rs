// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! `SprintState` — the single shared mutable record every core component
//! reads and mutates. Holds data plus the small set of invariant-preserving
//! primitives (dedup'd review/validating lists, monotonic task upsert);
//! the protocol state machine that decides *which* primitive to call on
//! which event lives in `sprintdeck-engine`.

use crate::agent::{Agent, AgentId, AgentStatus};
use crate::decision::{Escalation, MergeConflict, PendingCheckpoint};
use crate::message::Message;
use crate::task::{Task, TaskId, TaskOverride, TaskStatus};
pub use crate::team::Mode;
use crate::token_usage::{TokenBudgetConfig, TokenUsage};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Coarse sprint phase, driven by autonomous-mode phase tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Analyzing,
    Sprinting,
    Validating,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

/// The in-memory record of one sprint. Reset to a fresh default on stop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprintState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub phase: Phase,
    #[serde(default)]
    pub cycle: u32,
    #[serde(default)]
    pub paused: bool,

    #[serde(default)]
    pub agents: IndexMap<String, Agent>,
    #[serde(default)]
    pub tasks: IndexMap<TaskId, Task>,
    #[serde(default)]
    pub messages: Vec<Message>,

    #[serde(default)]
    pub review_task_ids: Vec<TaskId>,
    #[serde(default)]
    pub validating_task_ids: Vec<TaskId>,
    #[serde(default)]
    pub checkpoints: BTreeSet<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_checkpoint: Option<PendingCheckpoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation: Option<Escalation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_conflict: Option<MergeConflict>,

    #[serde(default)]
    pub token_usage: TokenUsage,
    #[serde(default)]
    pub token_budget_approaching: bool,
    #[serde(default)]
    pub token_budget_exceeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_budget_config: Option<TokenBudgetConfig>,

    /// True once the one-shot "Sprint initialized" system message has been
    /// sent for the current sprint lifetime. Cleared on reset.
    #[serde(default)]
    pub team_init_message_sent: bool,

    /// Count of agent-supplied `PROCESS_LEARNING:` messages persisted so
    /// far this sprint. Capped at five per sprint (§4.7); cleared on reset.
    #[serde(default)]
    pub process_learnings_recorded: u32,

    /// Runtime-only fields, stripped by the persistence loader before a
    /// resumed snapshot is merged in (see `strip_runtime_fields`).
    #[serde(default)]
    pub tmux_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmux_session_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    /// Per-task override table. Not part of the persisted wire shape —
    /// resumed state relies solely on each task's already-merged `status`.
    #[serde(skip)]
    pub task_overrides: HashMap<TaskId, TaskOverride>,
}

impl Default for SprintState {
    fn default() -> Self {
        Self {
            team_name: None,
            mode: None,
            phase: Phase::default(),
            cycle: 0,
            paused: false,
            agents: IndexMap::new(),
            tasks: IndexMap::new(),
            messages: Vec::new(),
            review_task_ids: Vec::new(),
            validating_task_ids: Vec::new(),
            checkpoints: BTreeSet::new(),
            pending_checkpoint: None,
            escalation: None,
            merge_conflict: None,
            token_usage: TokenUsage::default(),
            token_budget_approaching: false,
            token_budget_exceeded: false,
            token_budget_config: None,
            team_init_message_sent: false,
            process_learnings_recorded: 0,
            tmux_available: false,
            tmux_session_name: None,
            project_name: None,
            task_overrides: HashMap::new(),
        }
    }
}

impl SprintState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to a fresh sprint, as done on sprint stop. Runtime fields
    /// (tmux, project name) are intentionally not preserved either.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Strip the three runtime-only fields the persistence layer must not
    /// carry across a resume (they are re-established by the launch path).
    pub fn strip_runtime_fields(&mut self) {
        self.tmux_available = false;
        self.tmux_session_name = None;
        self.project_name = None;
    }

    /// Look up an agent by name, discovering it with `Unknown` status if
    /// this is the first time it's been seen. Returns `true` if newly
    /// discovered.
    pub fn discover_agent(&mut self, name: &str, id_for_new: impl FnOnce() -> AgentId) -> bool {
        if self.agents.contains_key(name) {
            return false;
        }
        self.agents
            .insert(name.to_string(), Agent::discovered(name, id_for_new(), None));
        true
    }

    pub fn agent_mut(&mut self, name: &str) -> Option<&mut Agent> {
        self.agents.get_mut(name)
    }

    pub fn agent_status(&self, name: &str) -> Option<AgentStatus> {
        self.agents.get(name).map(|a| a.status)
    }

    /// Insert or update a task, applying this id's current override (if
    /// any) so the displayed status respects the monotonic rank rule.
    /// Returns `true` if the task is new or its serialized shape changed.
    pub fn upsert_task(&mut self, mut task: Task) -> bool {
        if let Some(ovr) = self.task_overrides.get(&task.id) {
            ovr.apply(&mut task);
        }
        match self.tasks.get(&task.id) {
            Some(existing) if existing == &task => false,
            _ => {
                self.tasks.insert(task.id.clone(), task);
                true
            }
        }
    }

    /// Raise the override for `id` and, if the task already exists on
    /// disk, apply it immediately. Returns `true` if the task was changed.
    pub fn raise_task_status(&mut self, id: &TaskId, status: TaskStatus) -> bool {
        self.task_overrides
            .entry(id.clone())
            .or_default()
            .raise_status(status);
        self.reapply_override(id)
    }

    pub fn set_task_owner(&mut self, id: &TaskId, owner: impl Into<String>) -> bool {
        self.task_overrides
            .entry(id.clone())
            .or_default()
            .set_owner(owner);
        self.reapply_override(id)
    }

    fn reapply_override(&mut self, id: &TaskId) -> bool {
        let ovr = match self.task_overrides.get(id) {
            Some(o) => o.clone(),
            None => return false,
        };
        if let Some(task) = self.tasks.get_mut(id) {
            let before = task.clone();
            ovr.apply(task);
            before != *task
        } else {
            false
        }
    }

    /// Remove `completed_id` from every other task's `blockedBy` set.
    /// Returns the ids of tasks that changed, for the caller to re-broadcast.
    pub fn unblock_dependents(&mut self, completed_id: &TaskId) -> Vec<TaskId> {
        let mut changed = Vec::new();
        for (id, task) in self.tasks.iter_mut() {
            if id != completed_id && task.unblock(completed_id) {
                changed.push(id.clone());
            }
        }
        changed
    }

    /// Append to `reviewTaskIds`, deduplicating. Returns `true` if appended.
    pub fn push_review(&mut self, id: TaskId) -> bool {
        if self.review_task_ids.contains(&id) {
            false
        } else {
            self.review_task_ids.push(id);
            true
        }
    }

    pub fn remove_review(&mut self, id: &TaskId) -> bool {
        let before = self.review_task_ids.len();
        self.review_task_ids.retain(|t| t != id);
        self.review_task_ids.len() != before
    }

    /// Move `id` from `reviewTaskIds` to `validatingTaskIds`, preserving
    /// invariant #2 (a task id is never in both lists at once).
    pub fn move_review_to_validating(&mut self, id: TaskId) {
        self.remove_review(&id);
        if !self.validating_task_ids.contains(&id) {
            self.validating_task_ids.push(id);
        }
    }

    pub fn remove_validating(&mut self, id: &TaskId) -> bool {
        let before = self.validating_task_ids.len();
        self.validating_task_ids.retain(|t| t != id);
        self.validating_task_ids.len() != before
    }

    pub fn add_checkpoint(&mut self, id: TaskId) {
        self.checkpoints.insert(id);
    }

    pub fn take_checkpoint(&mut self, id: &TaskId) -> bool {
        self.checkpoints.remove(id)
    }

    pub fn append_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append a one-shot `from = "system"` message, returning `true` the
    /// first time it's called since the last reset.
    pub fn send_team_init_message(&mut self, content: impl Into<String>, id: impl Into<String>, timestamp: impl Into<String>) -> bool {
        if self.team_init_message_sent {
            return false;
        }
        self.team_init_message_sent = true;
        self.append_message(Message::new(id, timestamp, "system", "*", content, None));
        true
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
