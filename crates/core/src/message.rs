// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Message entity and the raw inbox wire shape.

use crate::protocol::ProtocolTag;
use serde::{Deserialize, Serialize};

/// One entry in `<root>/teams/<teamName>/inboxes/<recipientName>.json`, as
/// the host runtime writes it. Tolerant of both `text` and `content` keys
/// and of a raw string body.
#[derive(Debug, Clone, Deserialize)]
pub struct RawInboxMessage {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub usage: Option<RawUsage>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

impl RawInboxMessage {
    /// Textual content from the first available of `text`, `content`.
    /// Callers fall back to an empty body if neither is present.
    pub fn extract_content(&self) -> &str {
        self.text
            .as_deref()
            .or(self.content.as_deref())
            .unwrap_or("")
    }
}

/// A decoded message as it lives in `SprintState`. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// `<timestamp_ms>-<index>`, unique within the sprint.
    pub id: String,
    pub timestamp: String,
    pub from: String,
    pub to: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<ProtocolTag>,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        timestamp: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        content: impl Into<String>,
        protocol: Option<ProtocolTag>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: timestamp.into(),
            from: from.into(),
            to: to.into(),
            content: content.into(),
            protocol,
        }
    }
}

/// Strips well-known envelope markup (a leading `[from]:` style prefix) that
/// some host runtimes prepend to message bodies before the actual content.
/// Never strips the `[idle:...]` sentinel — that is inspected as-is by
/// [`is_idle_sentinel`] afterwards.
pub fn strip_envelope_markup(content: &str) -> &str {
    let trimmed = content.trim_start();
    if trimmed.starts_with("[idle:") {
        return trimmed;
    }
    if let Some(rest) = trimmed.strip_prefix('[') {
        if let Some(close) = rest.find(']') {
            let after = &rest[close + 1..];
            return after.trim_start();
        }
    }
    trimmed
}

/// True if `content` is the idle sentinel (`[idle:...`).
pub fn is_idle_sentinel(content: &str) -> bool {
    content.trim_start().starts_with("[idle:")
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
