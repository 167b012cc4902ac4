// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("filesystem watch error: {0}")]
    Notify(#[from] notify::Error),
}
