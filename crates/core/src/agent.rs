// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Agent identifier and status types.
//!
//! An agent is one named participant in a team (a PM, a review manager, an
//! engineer). It is discovered either from team config or, lazily, the first
//! time traffic touches its inbox.

use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Identifier for an agent, as assigned by the host runtime's team config.
    pub struct AgentId;
}

/// Liveness status of an agent as inferred from inbox traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Has sent or received traffic and is not known to be idle.
    Active,
    /// Sent an `[idle:...]` sentinel as the most recent message body.
    Idle,
    /// Discovered but no traffic observed yet.
    Unknown,
}

impl Default for AgentStatus {
    fn default() -> Self {
        AgentStatus::Unknown
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStatus::Active => write!(f, "active"),
            AgentStatus::Idle => write!(f, "idle"),
            AgentStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A participant within a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub agent_id: AgentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
    pub status: AgentStatus,
}

impl Agent {
    /// Construct an agent as it would appear from team config, before any
    /// inbox traffic has been observed.
    pub fn discovered(name: impl Into<String>, agent_id: AgentId, agent_type: Option<String>) -> Self {
        Self {
            name: name.into(),
            agent_id,
            agent_type,
            status: AgentStatus::Unknown,
        }
    }

    /// True if `name` matches the `sprint-pm` convention that flips a team
    /// into autonomous mode.
    pub fn is_pm_name(name: &str) -> bool {
        name == "sprint-pm"
    }

    /// True if `name` is the team's review manager, by the `sprint-manager`
    /// naming convention.
    pub fn is_manager_name(name: &str) -> bool {
        name == "sprint-manager"
    }

    /// True if `name` is an engineer, by the `sprint-engineer` or
    /// `sprint-engineer-<N>` naming convention.
    pub fn is_engineer_name(name: &str) -> bool {
        name == "sprint-engineer" || name.starts_with("sprint-engineer-")
    }

    /// Mark this agent active, e.g. on observed outgoing traffic.
    pub fn mark_active(&mut self) -> bool {
        if self.status == AgentStatus::Active {
            false
        } else {
            self.status = AgentStatus::Active;
            true
        }
    }

    /// Mark this agent idle, e.g. on an `[idle:...]` sentinel body.
    pub fn mark_idle(&mut self) -> bool {
        if self.status == AgentStatus::Idle {
            false
        } else {
            self.status = AgentStatus::Idle;
            true
        }
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
