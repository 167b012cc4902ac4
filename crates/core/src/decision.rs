// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! The at-most-one-of-each singleton decision records: escalation, merge
//! conflict, and pending checkpoint. Setting replaces; dismissing clears.

use serde::{Deserialize, Serialize};

/// Who or what raised an escalation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationSource {
    /// An agent emitted an `ESCALATE` protocol message.
    Agent,
    /// A cycle/sprint verification gate failed.
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escalation {
    pub source: EscalationSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub message: String,
}

impl Escalation {
    pub fn from_agent(task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: EscalationSource::Agent,
            task_id: Some(task_id.into()),
            message: message.into(),
        }
    }

    pub fn from_system(message: impl Into<String>) -> Self {
        Self {
            source: EscalationSource::System,
            task_id: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConflict {
    pub task_id: String,
    pub message: String,
}

/// A task id pre-registered by the user so its transition into review
/// blocks the sprint until released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCheckpoint {
    pub task_id: String,
    pub task_subject: String,
}

#[cfg(test)]
#[path = "decision_tests.rs"]
mod tests;
