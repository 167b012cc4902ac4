// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! `.sprint.yml` — the one configuration file the core reads. Parsed once
//! at process start into this typed shape and handed around as an `Arc`
//! rather than re-read by each component.

use crate::token_usage::TokenBudgetConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level shape of `<project>/.sprint.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SprintConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub recording: RecordingConfig,
    #[serde(default)]
    pub sprint: SprintSection,
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub plugins: Vec<String>,
    #[serde(default)]
    pub verify: VerifyConfig,
}

/// The `verify:` section: commands run by both verification gate scopes
/// (§4.5). Empty means "no commands configured", a trivial pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifyConfig {
    #[serde(default)]
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    4173
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordingConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// The `sprint:` section, carrying the token/cost budget inputs consumed by
/// [`crate::token_usage::TokenBudgetConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SprintSection {
    #[serde(default)]
    pub token_budget: Option<u64>,
    #[serde(default)]
    pub token_budget_usd: Option<f64>,
}

impl SprintSection {
    pub fn budget_config(&self) -> TokenBudgetConfig {
        TokenBudgetConfig {
            token_budget: self.token_budget,
            token_budget_usd: self.token_budget_usd,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentsConfig {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default)]
    pub webhook: Option<String>,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl NotificationsConfig {
    /// True if `event` is in the configured allow-list, or the allow-list
    /// is empty (meaning: notify on everything).
    pub fn wants(&self, event: &str) -> bool {
        self.webhook.is_some() && (self.events.is_empty() || self.events.iter().any(|e| e == event))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
