// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Team identity and the discovery rules applied to `config.json`.

use crate::agent::Agent;
use serde::{Deserialize, Serialize};

/// Raw shape of `<root>/teams/<teamName>/config.json` as the host runtime
/// writes it. `name` is optional — recognition can also fall back to
/// membership shape.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamConfigFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub members: Vec<TeamMember>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub agent_type: Option<String>,
}

/// The sprint mode a recognized team starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Manual,
    Autonomous,
}

impl TeamConfigFile {
    /// Recognize this config either by name prefix or by membership shape:
    /// a `sprint-manager` plus at least one `sprint-engineer[-N]`.
    pub fn is_sprint_team(&self) -> bool {
        if let Some(name) = &self.name {
            if name.starts_with("sprint-") {
                return true;
            }
        }
        let has_manager = self.members.iter().any(|m| Agent::is_manager_name(&m.name));
        let has_engineer = self.members.iter().any(|m| Agent::is_engineer_name(&m.name));
        has_manager && has_engineer
    }

    /// `Autonomous` iff any member is named `sprint-pm`, else `Manual`.
    pub fn mode(&self) -> Mode {
        if self.members.iter().any(|m| Agent::is_pm_name(&m.name)) {
            Mode::Autonomous
        } else {
            Mode::Manual
        }
    }

    pub fn member_names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.name.clone()).collect()
    }
}

#[cfg(test)]
#[path = "team_tests.rs"]
mod tests;
