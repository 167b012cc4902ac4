// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;

#[test]
fn extract_content_prefers_text_over_content() {
    let raw = RawInboxMessage {
        from: None,
        to: None,
        text: Some("from text".into()),
        content: Some("from content".into()),
        timestamp: None,
        usage: None,
    };
    assert_eq!(raw.extract_content(), "from text");
}

#[test]
fn extract_content_falls_back_to_content_field() {
    let raw = RawInboxMessage {
        from: None,
        to: None,
        text: None,
        content: Some("from content".into()),
        timestamp: None,
        usage: None,
    };
    assert_eq!(raw.extract_content(), "from content");
}

#[test]
fn strip_envelope_markup_removes_bracket_prefix() {
    assert_eq!(strip_envelope_markup("[sprint-manager] TASK_ASSIGNED: #1"), "TASK_ASSIGNED: #1");
}

#[test]
fn strip_envelope_markup_preserves_idle_sentinel() {
    assert_eq!(strip_envelope_markup("[idle: waiting for review]"), "[idle: waiting for review]");
}

#[test]
fn is_idle_sentinel_detects_prefix() {
    assert!(is_idle_sentinel("[idle: nothing to do]"));
    assert!(!is_idle_sentinel("TASK_ASSIGNED: #1"));
}
