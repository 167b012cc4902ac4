// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Writes the per-sprint history snapshot on stop: tasks, messages, a
//! retro note, and a small summary record.

use crate::error::PersistError;
use crate::paths::Paths;
use serde::{Deserialize, Serialize};
use sprintdeck_core::{Task, TokenUsage};
use std::fs;

/// Summary record written to `record.json` for a finished sprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub sprint_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    pub cycle: u32,
    pub token_usage: TokenUsage,
}

pub struct HistoryWriter {
    paths: Paths,
}

impl HistoryWriter {
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }

    /// Write the full history snapshot for `sprint_id`. Creates the
    /// sprint's history subdirectory if needed.
    pub fn write(
        &self,
        sprint_id: &str,
        tasks: &[Task],
        messages_json: &serde_json::Value,
        record: &HistoryRecord,
        retro: &str,
    ) -> Result<(), PersistError> {
        let dir = self.paths.sprint_history_dir(sprint_id);
        fs::create_dir_all(&dir)?;

        fs::write(self.paths.sprint_tasks_file(sprint_id), serde_json::to_vec_pretty(tasks)?)?;
        fs::write(
            self.paths.sprint_messages_file(sprint_id),
            serde_json::to_vec_pretty(messages_json)?,
        )?;
        fs::write(self.paths.sprint_record_file(sprint_id), serde_json::to_vec_pretty(record)?)?;
        fs::write(self.paths.sprint_retro_file(sprint_id), retro)?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
