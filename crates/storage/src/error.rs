// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use thiserror::Error;

/// Errors raised by the storage layer: path resolution, debounced
/// persistence, history/memory/learning/analytics stores, and the replay
/// recorder. All are I/O-adjacent; callers log and continue rather than
/// treat them as state invariant breaks (see the core error taxonomy).
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
