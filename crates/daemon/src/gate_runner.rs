// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Runs the verification gate as a detached task (§4.5, §5): the
//! configured commands execute with no lock held, and only the
//! already-computed [`sprintdeck_engine::GateReport`] is folded into
//! `SprintState` under the lock. A slow or hanging verification command
//! therefore never blocks inbox processing, team/task-file updates, or
//! control-API requests.

use crate::effects;
use crate::shared::Shared;
use sprintdeck_core::TaskId;
use sprintdeck_engine::{apply_cycle_gate_report, apply_task_gate_report, GateEffect};
use std::sync::Arc;

pub fn spawn_task_gate(shared: Arc<Shared>, task_id: TaskId) {
    tokio::spawn(async move {
        let commands = shared.config.verify.commands.clone();
        let report = shared.gate.run(&commands).await;

        let effects = {
            let mut core = shared.core.lock().await;
            let outcome = apply_task_gate_report(&mut core.state, &task_id, &report, &shared.clock);
            shared.broadcast_all(&mut core, outcome.events).await;
            outcome.effects
        };
        run_gate_effects(&shared, effects).await;
    });
}

pub fn spawn_cycle_gate(shared: Arc<Shared>) {
    tokio::spawn(async move {
        let commands = shared.config.verify.commands.clone();
        let report = shared.gate.run(&commands).await;

        let effects = {
            let mut core = shared.core.lock().await;
            let outcome = apply_cycle_gate_report(&mut core.state, &report, &shared.clock);
            shared.broadcast_all(&mut core, outcome.events).await;
            outcome.effects
        };
        run_gate_effects(&shared, effects).await;
    });
}

async fn run_gate_effects(shared: &Arc<Shared>, effects: Vec<GateEffect>) {
    for effect in effects {
        match effect {
            GateEffect::FireWebhook { event, payload } => effects::spawn_webhook(shared, event, payload),
            GateEffect::FirePluginHook { hook, payload } => effects::spawn_plugin(shared, hook, payload),
        }
    }
}
