// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Task-file handler: applies a freshly-read task file (array or single
//! object) to `SprintState`. Entries whose subject names an agent are
//! host-side bookkeeping and are filtered out.

use sprintdeck_core::{Event, RawTask, SprintState};

/// Parse a task file's raw JSON bytes, tolerant of a bare array or a
/// single object coerced to a one-element array.
pub fn parse_raw_tasks(bytes: &[u8]) -> Vec<RawTask> {
    if let Ok(tasks) = serde_json::from_slice::<Vec<RawTask>>(bytes) {
        return tasks;
    }
    match serde_json::from_slice::<RawTask>(bytes) {
        Ok(task) => vec![task],
        Err(_) => Vec::new(),
    }
}

/// Apply every raw task entry to `state`, filtering out agent-name
/// subjects, applying the override table, and cascading completion
/// unblocks. Returns one `task_updated` event per task that actually
/// changed, in a stable order: direct updates first, then cascaded
/// dependents.
pub fn apply_task_file(state: &mut SprintState, raw_tasks: Vec<RawTask>) -> Vec<Event> {
    let mut events = Vec::new();
    let mut newly_completed = Vec::new();

    for raw in raw_tasks {
        if state.agents.contains_key(raw.subject()) {
            continue;
        }
        let task = raw.into_task();
        let id = task.id.clone();
        let became_completed = task.status == sprintdeck_core::TaskStatus::Completed;
        if state.upsert_task(task) {
            events.push(Event::TaskUpdated { task: state.tasks[&id].clone() });
        }
        if became_completed {
            newly_completed.push(id);
        }
    }

    for id in newly_completed {
        for changed_id in state.unblock_dependents(&id) {
            events.push(Event::TaskUpdated { task: state.tasks[&changed_id].clone() });
        }
    }

    events
}

#[cfg(test)]
#[path = "task_handler_tests.rs"]
mod tests;
