// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Resolves the per-project data root and the file paths every other
//! storage component reads or writes under it.

use crate::error::PersistError;
use std::fs;
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = ".teamclaude";
const GITIGNORE_CONTENTS: &str = "*\n";

/// Path helpers rooted at `<project>/.teamclaude/`.
#[derive(Debug, Clone)]
pub struct Paths {
    root: PathBuf,
}

impl Paths {
    pub fn for_project(project_root: impl Into<PathBuf>) -> Self {
        Self {
            root: project_root.into().join(DATA_DIR_NAME),
        }
    }

    pub fn data_root(&self) -> &Path {
        &self.root
    }

    pub fn state_file(&self) -> PathBuf {
        self.root.join("state.json")
    }

    pub fn analytics_file(&self) -> PathBuf {
        self.root.join("analytics.json")
    }

    pub fn memories_file(&self) -> PathBuf {
        self.root.join("memories.json")
    }

    pub fn learnings_file(&self) -> PathBuf {
        self.root.join("learnings.json")
    }

    pub fn history_dir(&self) -> PathBuf {
        self.root.join("history")
    }

    pub fn sprint_history_dir(&self, sprint_id: &str) -> PathBuf {
        self.history_dir().join(sprint_id)
    }

    pub fn sprint_tasks_file(&self, sprint_id: &str) -> PathBuf {
        self.sprint_history_dir(sprint_id).join("tasks.json")
    }

    pub fn sprint_messages_file(&self, sprint_id: &str) -> PathBuf {
        self.sprint_history_dir(sprint_id).join("messages.json")
    }

    pub fn sprint_retro_file(&self, sprint_id: &str) -> PathBuf {
        self.sprint_history_dir(sprint_id).join("retro.md")
    }

    pub fn sprint_record_file(&self, sprint_id: &str) -> PathBuf {
        self.sprint_history_dir(sprint_id).join("record.json")
    }

    pub fn sprint_replay_file(&self, sprint_id: &str) -> PathBuf {
        self.sprint_history_dir(sprint_id).join("replay.jsonl")
    }

    pub fn daemon_log_file(&self) -> PathBuf {
        self.root.join("daemon.log")
    }

    fn gitignore_file(&self) -> PathBuf {
        self.root.join(".gitignore")
    }

    /// Create the data root if missing and seed its `.gitignore` the
    /// first time. Idempotent.
    pub fn ensure_data_root(&self) -> Result<(), PersistError> {
        fs::create_dir_all(&self.root)?;
        let gitignore = self.gitignore_file();
        if !gitignore.exists() {
            fs::write(gitignore, GITIGNORE_CONTENTS)?;
        }
        Ok(())
    }

    /// List recorded sprint ids under the history directory, sorted for
    /// deterministic output.
    pub fn list_sprint_history_ids(&self) -> Result<Vec<String>, PersistError> {
        let dir = self.history_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids: Vec<String> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
