// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Carries out the side effects the engine's handlers defer to their
//! caller: firing webhooks and plugin hooks as detached tasks, and
//! persisting memory/process-learning records. None of this touches
//! `Core` except to broadcast a `webhook_status` event once a delivery
//! attempt sequence settles.

use crate::shared::Shared;
use sprintdeck_core::{agent_learning_id, normalize_action, Clock, Event, IdGen, Memory, MemoryId};
use std::sync::Arc;

pub fn spawn_webhook(shared: &Arc<Shared>, event: &'static str, payload: serde_json::Value) {
    let shared = Arc::clone(shared);
    tokio::spawn(async move {
        let outcome = shared.webhook.notify(event, payload).await;
        let mut core = shared.core.lock().await;
        shared
            .broadcast(
                &mut core,
                Event::WebhookStatus { event: event.to_string(), success: outcome.success, attempts: outcome.attempts },
            )
            .await;
    });
}

pub fn spawn_plugin(shared: &Arc<Shared>, hook: &'static str, payload: serde_json::Value) {
    let shared = Arc::clone(shared);
    tokio::spawn(async move {
        shared.plugins.fire(hook, payload).await;
    });
}

/// Persist one `MEMORY:` record, attributed to the sprint in progress
/// when it was emitted (or `"unknown"` if somehow none was active).
pub async fn persist_memory(shared: &Arc<Shared>, role: String, key: String, value: String, sprint_id: Option<String>) {
    let memory = Memory::new(
        MemoryId::new(shared.id_gen.next()),
        role,
        key,
        value,
        sprint_id.unwrap_or_else(|| "unknown".to_string()),
        shared.clock.now().to_rfc3339(),
    );
    if let Err(err) = shared.memory_store.upsert(memory) {
        tracing::warn!(error = %err, "failed to persist memory record");
    }
}

/// Persist one agent-reported `PROCESS_LEARNING:` record, deduplicated by
/// the normalized action text plus role (see `agent_learning_id`).
pub async fn persist_process_learning(shared: &Arc<Shared>, role: String, action: String, sprint_id: Option<String>) {
    let id = agent_learning_id(&normalize_action(&action), &role);
    let sprint_id = sprint_id.unwrap_or_else(|| "unknown".to_string());
    if let Err(err) = shared.learnings_store.upsert(id, role, action, sprint_id) {
        tracing::warn!(error = %err, "failed to persist process learning");
    }
}
