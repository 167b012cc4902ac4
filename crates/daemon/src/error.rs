// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Errors the control API surfaces to HTTP clients, with the status code
//! and machine-readable code each maps to.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("no active sprint")]
    NoActiveSprint,
    #[error("no such memory")]
    MemoryNotFound,
    #[error("no such process learning")]
    LearningNotFound,
    #[error("no such recording: {0}")]
    RecordingNotFound(String),
    #[error("storage error: {0}")]
    Storage(#[from] sprintdeck_storage::PersistError),
    #[error("watch error: {0}")]
    Watch(#[from] sprintdeck_watch::WatchError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl DaemonError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NoActiveSprint => StatusCode::CONFLICT,
            Self::MemoryNotFound | Self::LearningNotFound | Self::RecordingNotFound(_) => StatusCode::NOT_FOUND,
            Self::Storage(_) | Self::Watch(_) | Self::Io(_) | Self::Config(_) | Self::Serde(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::NoActiveSprint => "NO_ACTIVE_SPRINT",
            Self::MemoryNotFound => "MEMORY_NOT_FOUND",
            Self::LearningNotFound => "LEARNING_NOT_FOUND",
            Self::RecordingNotFound(_) => "RECORDING_NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Watch(_) => "WATCH_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Serde(_) => "SERDE_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl IntoResponse for DaemonError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            code: self.code().to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type DaemonResult<T> = Result<T, DaemonError>;
