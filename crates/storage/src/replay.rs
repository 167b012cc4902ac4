// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Append-only JSONL recording of a live sprint's broadcast events. One
//! object per line: `{timestamp, event}`, where `timestamp` is
//! milliseconds elapsed since the first recorded event. The time-scaled
//! re-emission to a client (the "replayer") is a scheduling concern and
//! lives in `sprintdeck-engine`; this module only owns the bytes on disk.

use crate::error::PersistError;
use serde::{Deserialize, Serialize};
use sprintdeck_core::Event;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// One recorded line: `event` at `timestamp` milliseconds since the first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub timestamp: u64,
    pub event: Event,
}

/// Append-only writer for one sprint's recording. Attached at sprint
/// start and detached at stop (dropping it is enough; there is no
/// buffered state to flush).
pub struct Recorder {
    path: PathBuf,
    file: File,
    first_epoch_ms: Option<u64>,
}

impl Recorder {
    /// Open (creating parent directories and the file) the recording at
    /// `path`, ready to append.
    pub fn attach(path: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file,
            first_epoch_ms: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `event`, excluding the high-volume types the spec carves
    /// out. `epoch_ms` is the caller's current time; the first call
    /// establishes the recording's zero point.
    pub fn record(&mut self, event: &Event, epoch_ms: u64) -> Result<(), PersistError> {
        if event.bypasses_persistence() {
            return Ok(());
        }
        let first = *self.first_epoch_ms.get_or_insert(epoch_ms);
        let timestamp = epoch_ms.saturating_sub(first);
        let line = RecordedEvent {
            timestamp,
            event: event.clone(),
        };
        let mut bytes = serde_json::to_vec(&line)?;
        bytes.push(b'\n');
        self.file.write_all(&bytes)?;
        Ok(())
    }
}

/// Read a whole recording back into memory, in file order.
pub fn read_recording(path: impl AsRef<Path>) -> Result<Vec<RecordedEvent>, PersistError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut events = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        events.push(serde_json::from_str(&line)?);
    }
    Ok(events)
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
