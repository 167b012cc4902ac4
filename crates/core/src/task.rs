// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Task identifier and monotonic status ordering.
//!
//! The displayed status of a task is `max(on_disk_status, override_status)`
//! under the total order defined by [`TaskStatus::rank`]. Status may never
//! decrease, which is what lets protocol messages race ahead of the host
//! writing the task file without ever un-completing a task.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

crate::define_id! {
    /// Unique identifier for a task, as assigned by the host runtime.
    pub struct TaskId;
}

/// Status of a task, ordered `pending < in_progress < completed < deleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Deleted,
}

impl TaskStatus {
    /// Position in the monotonic total order. Higher never loses to lower.
    pub fn rank(self) -> u8 {
        match self {
            TaskStatus::Pending => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
            TaskStatus::Deleted => 3,
        }
    }

    /// The higher-ranked of the two statuses. Ties keep `self`.
    pub fn max(self, other: TaskStatus) -> TaskStatus {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Deleted => write!(f, "deleted"),
        }
    }
}

/// A task tracked from the team's task file, merged with the protocol
/// override table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub subject: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub blocked_by: BTreeSet<TaskId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Task {
    pub fn new(id: TaskId, subject: impl Into<String>) -> Self {
        Self {
            id,
            subject: subject.into(),
            status: TaskStatus::Pending,
            owner: None,
            blocked_by: BTreeSet::new(),
            description: None,
        }
    }

    /// Remove `unblocked` from this task's `blocked_by` set. Returns `true`
    /// if the set changed (the caller should re-broadcast the task).
    pub fn unblock(&mut self, unblocked: &TaskId) -> bool {
        self.blocked_by.remove(unblocked)
    }
}

/// Per-task override recorded by the protocol decoder. Wins over the
/// on-disk status per [`TaskStatus::max`], and never loses ground once set.
#[derive(Debug, Clone, Default)]
pub struct TaskOverride {
    pub status: Option<TaskStatus>,
    pub owner: Option<String>,
}

impl TaskOverride {
    /// Raise the overridden status to at least `status`. Never lowers it.
    pub fn raise_status(&mut self, status: TaskStatus) {
        self.status = Some(match self.status {
            Some(current) => current.max(status),
            None => status,
        });
    }

    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = Some(owner.into());
    }

    /// Apply this override onto a task read fresh from disk, respecting the
    /// monotonic rank rule: the on-disk status can never pull the displayed
    /// status back down.
    pub fn apply(&self, task: &mut Task) {
        if let Some(status) = self.status {
            task.status = task.status.max(status);
        }
        if let Some(ref owner) = self.owner {
            task.owner = Some(owner.clone());
        }
    }
}

/// Raw shape of one entry in `<root>/tasks/<teamName>/*.json`, as the host
/// runtime writes it. Tolerant of `subject` or `title` for the task name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    pub id: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub blocked_by: BTreeSet<TaskId>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RawTask {
    pub fn subject(&self) -> &str {
        self.subject.as_deref().or(self.title.as_deref()).unwrap_or("")
    }

    pub fn into_task(self) -> Task {
        let subject = self.subject().to_string();
        Task {
            id: TaskId::new(self.id),
            subject,
            status: self.status.unwrap_or(TaskStatus::Pending),
            owner: self.owner,
            blocked_by: self.blocked_by,
            description: self.description,
        }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
