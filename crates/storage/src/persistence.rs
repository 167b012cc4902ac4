// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Debounced persistence of `SprintState` to a single JSON file, plus the
//! best-effort resume loader. Modeled on the teacher's snapshot writer
//! (atomic write-to-tmp-then-rename, corrupt files moved aside rather than
//! aborting the process) but without the WAL/sequence-number machinery —
//! this layer persists one full snapshot, not a replayable log.

use crate::error::PersistError;
use crate::paths::Paths;
use sprintdeck_core::SprintState;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::warn;

/// Trailing debounce delay: a pending write is cancelled by any newer
/// schedule call within this window.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Debounced single-file persistence for `SprintState`.
pub struct Persistence {
    paths: Paths,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Persistence {
    pub fn new(paths: Paths) -> Self {
        Self {
            paths,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Schedule a debounced write of `state`. Cancels any write already
    /// pending from an earlier call. Writes are never concurrent: the
    /// previous task is aborted before the new one starts.
    pub async fn schedule(&self, state: SprintState) {
        let path = self.paths.state_file();
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(DEBOUNCE_DELAY).await;
            if let Err(err) = write_now(&path, &state) {
                warn!(error = %err, path = %path.display(), "failed to persist sprint state");
            }
        }));
    }

    /// Cancel any pending debounced write and persist `state` synchronously.
    /// Called on shutdown so a SIGINT/SIGTERM never loses the last 500ms
    /// of state.
    pub async fn flush(&self, state: &SprintState) -> Result<(), PersistError> {
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        write_now(&self.paths.state_file(), state)
    }

    /// Load the persisted state, if any, with its three runtime-only
    /// fields stripped. `Ok(None)` covers both "no file" and "corrupt
    /// file" — resume is best-effort, per the spec's malformed-input rule.
    pub fn load(&self) -> Result<Option<SprintState>, PersistError> {
        let path = self.paths.state_file();
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(&path)?;
        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, SprintState>(reader) {
            Ok(mut state) => {
                state.strip_runtime_fields();
                Ok(Some(state))
            }
            Err(err) => {
                warn!(error = %err, path = %path.display(), "corrupt sprint state, starting fresh");
                Ok(None)
            }
        }
    }
}

fn write_now(path: &Path, state: &SprintState) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    {
        let file = File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, state)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
#[path = "persistence_tests.rs"]
mod tests;
