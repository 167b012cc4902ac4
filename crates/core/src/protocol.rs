// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Protocol tag decoding.
//!
//! A protocol tag is a recognized uppercase prefix at the start of a
//! message body. Most tags carry a task id, captured from the `#<digits>`
//! or bare `<digits>` token immediately following the tag.

use serde::{Deserialize, Serialize};

/// The closed set of protocol tags the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolTag {
    TaskAssigned,
    ReadyForReview,
    Approved,
    RequestChanges,
    Resubmit,
    Escalate,
    Memory,
    RoadmapReady,
    CycleComplete,
    SprintComplete,
    NextCycle,
    Acceptance,
}

impl ProtocolTag {
    fn literal(self) -> &'static str {
        match self {
            ProtocolTag::TaskAssigned => "TASK_ASSIGNED",
            ProtocolTag::ReadyForReview => "READY_FOR_REVIEW",
            ProtocolTag::Approved => "APPROVED",
            ProtocolTag::RequestChanges => "REQUEST_CHANGES",
            ProtocolTag::Resubmit => "RESUBMIT",
            ProtocolTag::Escalate => "ESCALATE",
            ProtocolTag::Memory => "MEMORY",
            ProtocolTag::RoadmapReady => "ROADMAP_READY",
            ProtocolTag::CycleComplete => "CYCLE_COMPLETE",
            ProtocolTag::SprintComplete => "SPRINT_COMPLETE",
            ProtocolTag::NextCycle => "NEXT_CYCLE",
            ProtocolTag::Acceptance => "ACCEPTANCE",
        }
    }

    /// All tags, longest literal first so a prefix match never shadows a
    /// longer sibling sharing the same stem (e.g. none currently collide,
    /// but this keeps the decoder order-independent of declaration order).
    fn all() -> [ProtocolTag; 12] {
        [
            ProtocolTag::TaskAssigned,
            ProtocolTag::ReadyForReview,
            ProtocolTag::Approved,
            ProtocolTag::RequestChanges,
            ProtocolTag::Resubmit,
            ProtocolTag::Escalate,
            ProtocolTag::Memory,
            ProtocolTag::RoadmapReady,
            ProtocolTag::CycleComplete,
            ProtocolTag::SprintComplete,
            ProtocolTag::NextCycle,
            ProtocolTag::Acceptance,
        ]
    }

    /// Only fires while the team is in autonomous mode.
    pub fn autonomous_only(self) -> bool {
        matches!(
            self,
            ProtocolTag::RoadmapReady
                | ProtocolTag::CycleComplete
                | ProtocolTag::SprintComplete
                | ProtocolTag::NextCycle
                | ProtocolTag::Acceptance
        )
    }
}

/// A message body decoded into a tag plus whatever it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedProtocol {
    pub tag: ProtocolTag,
    pub task_id: Option<String>,
    /// Remaining text after the tag and its id token, trimmed.
    pub rest: String,
}

/// Decode the protocol tag from the start of `content`, if any.
///
/// `content` is expected to already have envelope markup stripped. Matching
/// is strict: the tag must be followed by `:` or whitespace, not be a
/// prefix of a longer identifier.
pub fn decode(content: &str) -> Option<DecodedProtocol> {
    let trimmed = content.trim_start();
    for tag in ProtocolTag::all() {
        let literal = tag.literal();
        if let Some(rest) = trimmed.strip_prefix(literal) {
            let boundary_ok = rest
                .chars()
                .next()
                .map(|c| c == ':' || c.is_whitespace())
                .unwrap_or(true);
            if !boundary_ok {
                continue;
            }
            let rest = rest.trim_start_matches(':').trim_start();
            let (task_id, rest) = extract_task_id(rest);
            return Some(DecodedProtocol {
                tag,
                task_id,
                rest: rest.to_string(),
            });
        }
    }
    None
}

/// Extract a leading `#<digits>` or bare `<digits>` token as a task id,
/// returning the remainder of the string after it.
fn extract_task_id(s: &str) -> (Option<String>, &str) {
    let s = s.trim_start();
    let s_no_hash = s.strip_prefix('#').unwrap_or(s);
    let digit_len = s_no_hash.chars().take_while(|c| c.is_ascii_digit()).count();
    if digit_len == 0 {
        return (None, s);
    }
    let id = s_no_hash[..digit_len].to_string();
    (Some(id), s_no_hash[digit_len..].trim_start())
}

/// Parse a `MEMORY: <key> — <value>` body into its key/value parts.
/// Accepts either an em dash or a plain hyphen as the separator.
pub fn parse_memory_body(rest: &str) -> Option<(String, String)> {
    let (key, value) = rest.split_once('\u{2014}').or_else(|| rest.split_once(" - "))?;
    let key = key.trim();
    let value = value.trim();
    if key.is_empty() || value.is_empty() {
        None
    } else {
        Some((key.to_string(), value.to_string()))
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
