// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Agent memory record — a small `(role, key) -> value` fact an agent
//! asked the system to remember via a `MEMORY:` protocol message.

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// Identifier for a memory record.
    pub struct MemoryId;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    pub id: MemoryId,
    pub role: String,
    pub key: String,
    pub value: String,
    pub sprint_id: String,
    pub created_at: String,
    #[serde(default)]
    pub access_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<String>,
}

impl Memory {
    pub fn new(
        id: MemoryId,
        role: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
        sprint_id: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id,
            role: role.into(),
            key: key.into(),
            value: value.into(),
            sprint_id: sprint_id.into(),
            created_at: created_at.into(),
            access_count: 0,
            last_accessed: None,
        }
    }

    pub fn record_access(&mut self, at: impl Into<String>) {
        self.access_count += 1;
        self.last_accessed = Some(at.into());
    }

    /// True if this record matches `role` (when given) and `query` as a
    /// case-insensitive substring of its key or value (when given).
    pub fn matches(&self, role: Option<&str>, query: Option<&str>) -> bool {
        if let Some(role) = role {
            if self.role != role {
                return false;
            }
        }
        if let Some(query) = query {
            let query = query.to_ascii_lowercase();
            let hay = format!("{} {}", self.key, self.value).to_ascii_lowercase();
            if !hay.contains(&query) {
                return false;
            }
        }
        true
    }
}

/// In-memory collection with the upsert-on-`(role, key)` rule the memory
/// store persists verbatim. Kept here so both `sprintdeck-storage` (I/O)
/// and `sprintdeck-engine` (policy) share the one rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryCollection {
    pub memories: Vec<Memory>,
}

impl MemoryCollection {
    /// Insert `memory`, replacing any existing record with the same
    /// `(role, key)` pair. Returns `true` if an existing record was
    /// replaced rather than newly inserted.
    pub fn upsert(&mut self, memory: Memory) -> bool {
        if let Some(existing) = self
            .memories
            .iter_mut()
            .find(|m| m.role == memory.role && m.key == memory.key)
        {
            *existing = memory;
            true
        } else {
            self.memories.push(memory);
            false
        }
    }

    pub fn remove(&mut self, id: &MemoryId) -> bool {
        let before = self.memories.len();
        self.memories.retain(|m| &m.id != id);
        self.memories.len() != before
    }

    pub fn list(&self, role: Option<&str>, query: Option<&str>) -> Vec<&Memory> {
        self.memories.iter().filter(|m| m.matches(role, query)).collect()
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
