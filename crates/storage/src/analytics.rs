// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! `<project>/.teamclaude/analytics.json` — an append-grown array of one
//! summary record per finished sprint. Read back at sprint stop to feed
//! the process-learning signal detectors (see `sprintdeck-engine`).

use crate::error::PersistError;
use crate::paths::Paths;
use serde::{Deserialize, Serialize};
use sprintdeck_core::TokenUsage;
use std::fs;

/// One row of `analytics.json`, written when a sprint stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsRecord {
    pub sprint_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    pub cycle: u32,
    pub token_usage: TokenUsage,
    pub task_count: usize,
    pub completed_task_count: usize,
    pub escalation_count: u32,
}

pub struct AnalyticsStore {
    paths: Paths,
}

impl AnalyticsStore {
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }

    fn load_all(&self) -> Result<Vec<AnalyticsRecord>, PersistError> {
        let path = self.paths.analytics_file();
        if !path.exists() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&fs::read(path)?)?)
    }

    /// Append one record, creating the data root and the file if needed.
    pub fn append(&self, record: AnalyticsRecord) -> Result<(), PersistError> {
        self.paths.ensure_data_root()?;
        let mut records = self.load_all()?;
        records.push(record);
        fs::write(self.paths.analytics_file(), serde_json::to_vec_pretty(&records)?)?;
        Ok(())
    }

    pub fn all(&self) -> Result<Vec<AnalyticsRecord>, PersistError> {
        self.load_all()
    }
}

#[cfg(test)]
#[path = "analytics_tests.rs"]
mod tests;
