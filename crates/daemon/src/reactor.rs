// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Dispatches one classified [`WatchEvent`] to the matching engine
//! handler. Each handler body runs with `Shared::core`'s lock held for
//! its entire critical section (read the file, mutate `SprintState`,
//! broadcast); only the side effects the handler defers — verification,
//! webhooks, plugin hooks, memory/learning persistence — run afterward,
//! detached, with the lock released (§5).

use crate::effects;
use crate::gate_runner;
use crate::route;
use crate::shared::Shared;
use sprintdeck_core::{Clock, TeamConfigFile};
use sprintdeck_engine::{apply_task_file, apply_team_config, parse_raw_messages, parse_raw_tasks, process_inbox_messages, InboxEffect};
use sprintdeck_watch::{WatchEvent, WatchKind};
use std::sync::Arc;

pub async fn handle(shared: &Arc<Shared>, event: WatchEvent) {
    match event.kind {
        WatchKind::TeamConfig => handle_team_config(shared, &event.path).await,
        WatchKind::Inbox => handle_inbox(shared, &event.path).await,
        WatchKind::Task => handle_task_file(shared, &event.path).await,
    }
}

async fn handle_team_config(shared: &Arc<Shared>, path: &std::path::Path) {
    if route::team_name_from_config_path(path).is_none() {
        return;
    }
    let Ok(bytes) = tokio::fs::read(path).await else { return };
    let Ok(config) = serde_json::from_slice::<TeamConfigFile>(&bytes) else { return };

    let mut core = shared.core.lock().await;
    let outcome = apply_team_config(&mut core.state, &config, &shared.id_gen, &shared.clock);
    let first_time = outcome.newly_discovered_agent_names.is_some();
    if first_time {
        core.state.token_budget_config = Some(shared.config.sprint.budget_config());
    }
    if first_time && core.sprint_id.is_none() {
        let sprint_id = format!("sprint-{}", shared.clock.epoch_ms());
        core.recorder = shared.start_recorder(&sprint_id);
        core.sprint_id = Some(sprint_id);
    }
    shared.broadcast_all(&mut core, outcome.events).await;
    drop(core);

    if let Some(agent_names) = outcome.newly_discovered_agent_names {
        effects::spawn_plugin(
            shared,
            "team_discovered",
            serde_json::json!({ "members": agent_names }),
        );
    }
}

async fn handle_inbox(shared: &Arc<Shared>, path: &std::path::Path) {
    let Some(recipient) = route::recipient_from_inbox_path(path) else { return };
    let Ok(bytes) = tokio::fs::read(path).await else { return };
    let Some(raw_messages) = parse_raw_messages(&bytes) else { return };

    let mut core = shared.core.lock().await;
    if core.state.team_name.is_none() {
        return;
    }
    let range = core.cursors.advance(path, raw_messages.len());
    if range.is_empty() {
        return;
    }
    let new_messages = &raw_messages[range];
    let model = shared.config.agents.model.clone();
    let outcome = process_inbox_messages(&mut core.state, &recipient, new_messages, &shared.price_table, model.as_deref(), &shared.id_gen, &shared.clock);
    let sprint_id = core.sprint_id.clone();
    shared.broadcast_all(&mut core, outcome.events).await;
    drop(core);

    run_inbox_effects(shared, outcome.effects, sprint_id).await;
}

async fn handle_task_file(shared: &Arc<Shared>, path: &std::path::Path) {
    if route::team_name_from_task_path(path).is_none() {
        return;
    }
    let Ok(bytes) = tokio::fs::read(path).await else { return };
    let raw_tasks = parse_raw_tasks(&bytes);

    let mut core = shared.core.lock().await;
    let events = apply_task_file(&mut core.state, raw_tasks);
    shared.broadcast_all(&mut core, events).await;
}

async fn run_inbox_effects(shared: &Arc<Shared>, effects: Vec<InboxEffect>, sprint_id: Option<String>) {
    for effect in effects {
        match effect {
            InboxEffect::ScheduleTaskVerification { task_id } => gate_runner::spawn_task_gate(Arc::clone(shared), task_id),
            InboxEffect::ScheduleCycleVerification | InboxEffect::ScheduleSprintVerification => {
                gate_runner::spawn_cycle_gate(Arc::clone(shared))
            }
            InboxEffect::FireWebhook { event, payload } => effects::spawn_webhook(shared, event, payload),
            InboxEffect::FirePluginHook { hook, payload } => effects::spawn_plugin(shared, hook, payload),
            InboxEffect::PersistMemory { role, key, value } => {
                effects::persist_memory(shared, role, key, value, sprint_id.clone()).await
            }
            InboxEffect::PersistProcessLearning { role, action } => {
                effects::persist_process_learning(shared, role, action, sprint_id.clone()).await
            }
        }
    }
}

#[cfg(test)]
#[path = "reactor_tests.rs"]
mod tests;
