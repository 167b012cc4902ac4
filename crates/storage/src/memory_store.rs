// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Single JSON file persisting the agent memory collection.

use crate::error::PersistError;
use crate::paths::Paths;
use sprintdeck_core::{Memory, MemoryCollection, MemoryId};
use std::fs;

pub struct MemoryStore {
    paths: Paths,
}

impl MemoryStore {
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }

    pub fn load(&self) -> Result<MemoryCollection, PersistError> {
        let path = self.paths.memories_file();
        if !path.exists() {
            return Ok(MemoryCollection::default());
        }
        // The on-disk shape is a bare array (see §6), not the wrapper struct.
        let memories: Vec<Memory> = serde_json::from_slice(&fs::read(path)?)?;
        Ok(MemoryCollection { memories })
    }

    fn save(&self, collection: &MemoryCollection) -> Result<(), PersistError> {
        self.paths.ensure_data_root()?;
        fs::write(self.paths.memories_file(), serde_json::to_vec_pretty(&collection.memories)?)?;
        Ok(())
    }

    pub fn upsert(&self, memory: Memory) -> Result<(), PersistError> {
        let mut collection = self.load()?;
        collection.upsert(memory);
        self.save(&collection)
    }

    pub fn remove(&self, id: &MemoryId) -> Result<bool, PersistError> {
        let mut collection = self.load()?;
        let removed = collection.remove(id);
        if removed {
            self.save(&collection)?;
        }
        Ok(removed)
    }

    pub fn list(&self, role: Option<&str>, query: Option<&str>) -> Result<Vec<Memory>, PersistError> {
        let collection = self.load()?;
        Ok(collection.list(role, query).into_iter().cloned().collect())
    }
}

#[cfg(test)]
#[path = "memory_store_tests.rs"]
mod tests;
