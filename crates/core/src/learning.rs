// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Process learnings — signal-derived or agent-reflected lessons upserted
//! by a deterministic id so repeated sprints accumulate frequency rather
//! than duplicate rows.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A single process learning, keyed by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Learning {
    pub id: String,
    pub role: String,
    pub summary: String,
    #[serde(default)]
    pub frequency: u32,
    #[serde(default)]
    pub sprint_ids: Vec<String>,
}

impl Learning {
    pub fn new(id: impl Into<String>, role: impl Into<String>, summary: impl Into<String>, sprint_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            summary: summary.into(),
            frequency: 1,
            sprint_ids: vec![sprint_id.into()],
        }
    }
}

/// Id for a learning fired by a fixed signal detector: one row per
/// `(signal, role)` pair, accumulating frequency across sprints.
pub fn signal_learning_id(signal: &str, role: &str) -> String {
    format!("{signal}:{role}")
}

/// Id for a learning derived from an agent's own `PROCESS_LEARNING:` line.
/// Deduplicated on the normalized action text plus role, so the same
/// reflection reported again doesn't create a second row.
pub fn agent_learning_id(normalized_action: &str, role: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalized_action.as_bytes());
    hasher.update(role.as_bytes());
    format!("AGENT:{:x}", hasher.finalize())
}

/// Lowercase, whitespace-collapsed form used before hashing an
/// agent-reported action, so trivial formatting differences don't produce
/// distinct rows for what is the same learning.
pub fn normalize_action(action: &str) -> String {
    action.split_whitespace().collect::<Vec<_>>().join(" ").to_ascii_lowercase()
}

/// Parse a `PROCESS_LEARNING: <role> — <action>` body, accepting an em
/// dash or plain hyphen separator like the `MEMORY:` tag does.
pub fn parse_process_learning_body(rest: &str) -> Option<(String, String)> {
    let (role, action) = rest.split_once('\u{2014}').or_else(|| rest.split_once(" - "))?;
    let role = role.trim();
    let action = action.trim();
    if role.is_empty() || action.is_empty() {
        None
    } else {
        Some((role.to_string(), action.to_string()))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearningCollection {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub learnings: Vec<Learning>,
}

fn default_version() -> u32 {
    1
}

impl LearningCollection {
    /// Upsert by id: a new id appends a fresh row; an existing id
    /// increments `frequency` and appends `sprint_id` if not already
    /// recorded for it.
    pub fn upsert(&mut self, id: impl Into<String>, role: impl Into<String>, summary: impl Into<String>, sprint_id: impl Into<String>) {
        let id = id.into();
        let sprint_id = sprint_id.into();
        if let Some(existing) = self.learnings.iter_mut().find(|l| l.id == id) {
            existing.frequency += 1;
            if !existing.sprint_ids.contains(&sprint_id) {
                existing.sprint_ids.push(sprint_id);
            }
        } else {
            self.learnings.push(Learning::new(id, role, summary, sprint_id));
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.learnings.len();
        self.learnings.retain(|l| l.id != id);
        self.learnings.len() != before
    }

    /// Role-partitioned summary: every learning for `role`, most frequent
    /// first, for the prompt compiler (external) to consume.
    pub fn summary_for_role(&self, role: &str) -> Vec<&Learning> {
        let mut matches: Vec<&Learning> = self.learnings.iter().filter(|l| l.role == role).collect();
        matches.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        matches
    }
}

#[cfg(test)]
#[path = "learning_tests.rs"]
mod tests;
