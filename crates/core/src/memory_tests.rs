// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;

fn sample(role: &str, key: &str, value: &str) -> Memory {
    Memory::new(MemoryId::new("m-1"), role, key, value, "sprint-1", "2026-01-01T00:00:00Z")
}

#[test]
fn upsert_inserts_new_record() {
    let mut collection = MemoryCollection::default();
    let replaced = collection.upsert(sample("engineer", "retry_budget", "5"));
    assert!(!replaced);
    assert_eq!(collection.memories.len(), 1);
}

#[test]
fn upsert_replaces_same_role_and_key() {
    let mut collection = MemoryCollection::default();
    collection.upsert(sample("engineer", "retry_budget", "5"));
    let replaced = collection.upsert(sample("engineer", "retry_budget", "7"));
    assert!(replaced);
    assert_eq!(collection.memories.len(), 1);
    assert_eq!(collection.memories[0].value, "7");
}

#[test]
fn upsert_keeps_distinct_keys_separate() {
    let mut collection = MemoryCollection::default();
    collection.upsert(sample("engineer", "retry_budget", "5"));
    collection.upsert(sample("manager", "retry_budget", "3"));
    assert_eq!(collection.memories.len(), 2);
}

#[test]
fn remove_deletes_by_id() {
    let mut collection = MemoryCollection::default();
    collection.upsert(sample("engineer", "retry_budget", "5"));
    assert!(collection.remove(&MemoryId::new("m-1")));
    assert!(collection.memories.is_empty());
    assert!(!collection.remove(&MemoryId::new("m-1")));
}

#[test]
fn list_filters_by_role() {
    let mut collection = MemoryCollection::default();
    collection.upsert(sample("engineer", "retry_budget", "5"));
    collection.upsert(Memory::new(
        MemoryId::new("m-2"),
        "manager",
        "lint_rule",
        "disabled",
        "sprint-1",
        "2026-01-01T00:00:00Z",
    ));
    assert_eq!(collection.list(Some("engineer"), None).len(), 1);
    assert_eq!(collection.list(None, None).len(), 2);
}

#[test]
fn list_filters_by_query_case_insensitively() {
    let mut collection = MemoryCollection::default();
    collection.upsert(sample("engineer", "retry_budget", "raised to 5"));
    assert_eq!(collection.list(None, Some("RAISED")).len(), 1);
    assert_eq!(collection.list(None, Some("nonexistent")).len(), 0);
}

#[test]
fn record_access_increments_count_and_sets_timestamp() {
    let mut memory = sample("engineer", "retry_budget", "5");
    memory.record_access("2026-01-02T00:00:00Z");
    assert_eq!(memory.access_count, 1);
    assert_eq!(memory.last_accessed.as_deref(), Some("2026-01-02T00:00:00Z"));
}
