// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use yare::parameterized;

#[parameterized(
    task_assigned = { "TASK_ASSIGNED: #1 — A", ProtocolTag::TaskAssigned, Some("1") },
    ready_for_review = { "READY_FOR_REVIEW: #42", ProtocolTag::ReadyForReview, Some("42") },
    approved_bare_digits = { "APPROVED: 7", ProtocolTag::Approved, Some("7") },
    request_changes = { "REQUEST_CHANGES: #1 needs more tests", ProtocolTag::RequestChanges, Some("1") },
    resubmit = { "RESUBMIT: #1", ProtocolTag::Resubmit, Some("1") },
    escalate = { "ESCALATE: #3 blocked on infra", ProtocolTag::Escalate, Some("3") },
)]
fn decodes_task_tags(body: &str, expected_tag: ProtocolTag, expected_id: Option<&str>) {
    let decoded = decode(body).expect("should decode");
    assert_eq!(decoded.tag, expected_tag);
    assert_eq!(decoded.task_id.as_deref(), expected_id);
}

#[parameterized(
    roadmap_ready = { "ROADMAP_READY: cycle 2", ProtocolTag::RoadmapReady },
    cycle_complete = { "CYCLE_COMPLETE", ProtocolTag::CycleComplete },
    sprint_complete = { "SPRINT_COMPLETE", ProtocolTag::SprintComplete },
    next_cycle = { "NEXT_CYCLE: 3", ProtocolTag::NextCycle },
    acceptance = { "ACCEPTANCE", ProtocolTag::Acceptance },
)]
fn decodes_phase_tags_without_task_id(body: &str, expected_tag: ProtocolTag) {
    let decoded = decode(body).expect("should decode");
    assert_eq!(decoded.tag, expected_tag);
}

#[test]
fn unrecognized_body_decodes_to_none() {
    assert!(decode("just a normal chat message").is_none());
}

#[test]
fn tag_must_be_at_word_boundary() {
    // "APPROVED_BY_SOMEONE" must not be misdetected as APPROVED.
    assert!(decode("APPROVED_BY_SOMEONE: #1").is_none());
}

#[test]
fn memory_body_splits_on_em_dash() {
    let decoded = decode("MEMORY: retry_budget \u{2014} raised to 5").unwrap();
    assert_eq!(decoded.tag, ProtocolTag::Memory);
    let (key, value) = parse_memory_body(&decoded.rest).unwrap();
    assert_eq!(key, "retry_budget");
    assert_eq!(value, "raised to 5");
}

#[test]
fn memory_body_accepts_plain_hyphen_fallback() {
    let (key, value) = parse_memory_body("lint_rule - disabled unused_imports").unwrap();
    assert_eq!(key, "lint_rule");
    assert_eq!(value, "disabled unused_imports");
}

#[test]
fn next_cycle_is_autonomous_only() {
    assert!(ProtocolTag::NextCycle.autonomous_only());
    assert!(!ProtocolTag::TaskAssigned.autonomous_only());
}
