// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Single JSON file persisting the process-learnings collection
//! (`{version: 1, learnings: [...]}`, per spec §6).

use crate::error::PersistError;
use crate::paths::Paths;
use sprintdeck_core::LearningCollection;
use std::fs;

pub struct LearningsStore {
    paths: Paths,
}

impl LearningsStore {
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }

    pub fn load(&self) -> Result<LearningCollection, PersistError> {
        let path = self.paths.learnings_file();
        if !path.exists() {
            return Ok(LearningCollection::default());
        }
        Ok(serde_json::from_slice(&fs::read(path)?)?)
    }

    fn save(&self, collection: &LearningCollection) -> Result<(), PersistError> {
        self.paths.ensure_data_root()?;
        fs::write(self.paths.learnings_file(), serde_json::to_vec_pretty(collection)?)?;
        Ok(())
    }

    /// Upsert one learning by its deterministic id (see
    /// `sprintdeck_core::learning`), and persist the whole collection.
    pub fn upsert(&self, id: impl Into<String>, role: impl Into<String>, summary: impl Into<String>, sprint_id: impl Into<String>) -> Result<(), PersistError> {
        let mut collection = self.load()?;
        collection.upsert(id, role, summary, sprint_id);
        self.save(&collection)
    }

    pub fn remove(&self, id: &str) -> Result<bool, PersistError> {
        let mut collection = self.load()?;
        let removed = collection.remove(id);
        if removed {
            self.save(&collection)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "learnings_store_tests.rs"]
mod tests;
