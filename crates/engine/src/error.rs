// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use thiserror::Error;

/// Errors the engine surfaces to its caller (the daemon's control API).
/// Per-message and per-file malformed input never reaches this type —
/// those are logged and skipped at the point of decode, per the spec's
/// error taxonomy (malformed input is not an invariant break).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("storage error: {0}")]
    Storage(#[from] sprintdeck_storage::PersistError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("no active sprint")]
    NoActiveSprint,
    #[error("unknown sprint recording: {0}")]
    UnknownRecording(String),
}
