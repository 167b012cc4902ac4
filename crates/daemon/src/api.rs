// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! The control API (§4.8, §6): a thin HTTP surface over `Shared` plus a
//! single WebSocket endpoint. Every mutating handler holds `Shared::core`'s
//! lock for its whole critical section, exactly like the reactor, and
//! broadcasts through `Shared::broadcast` so persistence/recording stay
//! consistent with the watcher-driven path.

use axum::extract::ws::{Message as WsMessage, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sprintdeck_core::{Clock, Event, IdGen, Memory, MemoryId, Task, TaskId};
use sprintdeck_engine::spawn_replay;
use sprintdeck_storage::{read_recording, AnalyticsRecord, HistoryRecord};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::error::{DaemonError, DaemonResult};
use crate::shared::Shared;

pub fn router(shared: Arc<Shared>) -> Router {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/launch", post(post_launch))
        .route("/api/pause", post(post_pause))
        .route("/api/stop", post(post_stop))
        .route("/api/checkpoint", post(post_checkpoint))
        .route("/api/checkpoint/release", post(post_checkpoint_release))
        .route("/api/dismiss-escalation", post(post_dismiss_escalation))
        .route("/api/dismiss-merge-conflict", post(post_dismiss_merge_conflict))
        .route("/api/resume", post(post_resume))
        .route("/api/memories", get(get_memories).post(post_memories))
        .route("/api/memories/:id", delete(delete_memory))
        .route("/api/process-learnings", get(get_process_learnings))
        .route("/api/process-learnings/:id", delete(delete_process_learning))
        .route("/api/history", get(get_history))
        .route("/api/replay/:sprint_id", get(replay_ws_handler))
        .route("/healthz", get(healthz))
        .route("/ws", get(ws_handler))
        .with_state(shared)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Explicit (re-)launch: reset the inbox cursors and replay a full,
/// unfiltered directory scan through the same reactor path the live
/// watcher uses. Idempotent — safe to call whether or not a sprint is
/// already running, and the only way to pick a sprint back up after
/// `/api/stop` without touching any file on disk.
async fn post_launch(State(shared): State<Arc<Shared>>) -> Json<sprintdeck_core::SprintState> {
    {
        let mut core = shared.core.lock().await;
        core.cursors.reset();
    }
    let events = sprintdeck_watch::scan_root(&shared.project_root, Duration::MAX, SystemTime::now());
    for event in events {
        crate::reactor::handle(&shared, event).await;
    }
    let core = shared.core.lock().await;
    Json(core.state.clone())
}

async fn get_state(State(shared): State<Arc<Shared>>) -> Json<sprintdeck_core::SprintState> {
    let core = shared.core.lock().await;
    Json(core.state.clone())
}

async fn post_pause(State(shared): State<Arc<Shared>>) -> Json<serde_json::Value> {
    let mut core = shared.core.lock().await;
    core.state.paused = !core.state.paused;
    let paused = core.state.paused;
    shared.broadcast(&mut core, Event::Paused { paused }).await;
    Json(serde_json::json!({ "paused": paused }))
}

#[derive(Debug, Serialize)]
struct StopResponse {
    retro: String,
    #[serde(rename = "prSummary")]
    pr_summary: String,
}

/// Stop the active sprint: write the history snapshot, append an
/// analytics row, run the process-learning signal detectors against it,
/// detach the recorder, and reset `SprintState` to a fresh default.
async fn post_stop(State(shared): State<Arc<Shared>>) -> DaemonResult<Json<StopResponse>> {
    let mut core = shared.core.lock().await;
    if core.state.team_name.is_none() {
        return Err(DaemonError::NoActiveSprint);
    }

    let sprint_id = core.sprint_id.clone().unwrap_or_else(|| format!("sprint-{}", shared.clock.epoch_ms()));
    let tasks: Vec<Task> = core.state.tasks.values().cloned().collect();
    let completed_task_count = tasks.iter().filter(|t| t.status == sprintdeck_core::TaskStatus::Completed).count();
    let escalation_count = u32::from(core.state.escalation.is_some());
    let messages_json = serde_json::to_value(&core.state.messages)?;

    let record = HistoryRecord {
        sprint_id: sprint_id.clone(),
        team_name: core.state.team_name.clone(),
        cycle: core.state.cycle,
        token_usage: core.state.token_usage.clone(),
    };
    let retro = render_retro(&core.state, &tasks, completed_task_count);
    shared.history.write(&sprint_id, &tasks, &messages_json, &record, &retro)?;

    let analytics_record = AnalyticsRecord {
        sprint_id: sprint_id.clone(),
        team_name: core.state.team_name.clone(),
        cycle: core.state.cycle,
        token_usage: core.state.token_usage.clone(),
        task_count: tasks.len(),
        completed_task_count,
        escalation_count,
    };
    shared.analytics.append(analytics_record.clone())?;

    for firing in sprintdeck_engine::run_signal_detectors(&analytics_record, &core.state) {
        if let Err(err) = shared.learnings_store.upsert(firing.id, firing.role, firing.summary, sprint_id.clone()) {
            tracing::warn!(error = %err, "failed to persist process-learning signal firing");
        }
    }

    let pr_summary = format!("{completed_task_count} of {} task(s) completed this sprint.", tasks.len());

    core.recorder = None;
    core.cursors.reset();
    core.state.reset();
    core.sprint_id = None;
    shared.persistence.flush(&core.state).await?;
    shared.broadcast(&mut core, Event::Init { state: Box::new(core.state.clone()) }).await;

    Ok(Json(StopResponse { retro, pr_summary }))
}

fn render_retro(state: &sprintdeck_core::SprintState, tasks: &[Task], completed_task_count: usize) -> String {
    let team = state.team_name.as_deref().unwrap_or("unknown");
    let mut out = format!(
        "# Retro — {team}\n\ncycle {} · {completed_task_count}/{} tasks completed · {} tokens used (~${:.2})\n",
        state.cycle,
        tasks.len(),
        state.token_usage.total,
        state.token_usage.estimated_cost_usd,
    );
    if let Some(escalation) = &state.escalation {
        out.push_str(&format!("\nEscalation at stop: {}\n", escalation.message));
    }
    out
}

#[derive(Debug, Deserialize)]
struct CheckpointRequest {
    #[serde(rename = "taskId")]
    task_id: String,
}

async fn post_checkpoint(State(shared): State<Arc<Shared>>, Json(req): Json<CheckpointRequest>) -> Json<serde_json::Value> {
    let mut core = shared.core.lock().await;
    let task_id = TaskId::new(req.task_id.clone());
    core.state.add_checkpoint(task_id);
    shared.broadcast(&mut core, Event::CheckpointRegistered { task_id: req.task_id }).await;
    Json(serde_json::json!({ "ok": true }))
}

async fn post_checkpoint_release(State(shared): State<Arc<Shared>>) -> Json<serde_json::Value> {
    let mut core = shared.core.lock().await;
    core.state.pending_checkpoint = None;
    shared.broadcast(&mut core, Event::CheckpointReleased).await;
    Json(serde_json::json!({ "ok": true }))
}

async fn post_dismiss_escalation(State(shared): State<Arc<Shared>>) -> Json<serde_json::Value> {
    let mut core = shared.core.lock().await;
    core.state.escalation = None;
    shared.broadcast(&mut core, Event::EscalationDismissed).await;
    Json(serde_json::json!({ "ok": true }))
}

async fn post_dismiss_merge_conflict(State(shared): State<Arc<Shared>>) -> Json<serde_json::Value> {
    let mut core = shared.core.lock().await;
    core.state.merge_conflict = None;
    shared.broadcast(&mut core, Event::MergeConflictDismissed).await;
    Json(serde_json::json!({ "ok": true }))
}

/// Restore from the persisted `state.json`, if one exists. Best-effort:
/// absence or a corrupt file is not an error (see `Persistence::load`),
/// it simply leaves the current (likely default) state untouched.
async fn post_resume(State(shared): State<Arc<Shared>>) -> DaemonResult<Json<sprintdeck_core::SprintState>> {
    let mut core = shared.core.lock().await;
    if let Some(resumed) = shared.persistence.load()? {
        core.state = resumed;
        shared.broadcast(&mut core, Event::Init { state: Box::new(core.state.clone()) }).await;
    }
    Ok(Json(core.state.clone()))
}

#[derive(Debug, Deserialize)]
struct MemoriesQuery {
    role: Option<String>,
    q: Option<String>,
}

async fn get_memories(State(shared): State<Arc<Shared>>, Query(query): Query<MemoriesQuery>) -> DaemonResult<Json<Vec<Memory>>> {
    Ok(Json(shared.memory_store.list(query.role.as_deref(), query.q.as_deref())?))
}

#[derive(Debug, Deserialize)]
struct CreateMemoryRequest {
    role: String,
    key: String,
    value: String,
}

async fn post_memories(State(shared): State<Arc<Shared>>, Json(req): Json<CreateMemoryRequest>) -> DaemonResult<Json<Memory>> {
    let sprint_id = {
        let core = shared.core.lock().await;
        core.sprint_id.clone().unwrap_or_else(|| "manual".to_string())
    };
    let memory = Memory::new(
        MemoryId::new(shared.id_gen.next()),
        req.role,
        req.key,
        req.value,
        sprint_id,
        shared.clock.now().to_rfc3339(),
    );
    shared.memory_store.upsert(memory.clone())?;
    Ok(Json(memory))
}

async fn delete_memory(State(shared): State<Arc<Shared>>, Path(id): Path<String>) -> DaemonResult<Json<serde_json::Value>> {
    let removed = shared.memory_store.remove(&MemoryId::new(id))?;
    if !removed {
        return Err(DaemonError::MemoryNotFound);
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}

async fn get_process_learnings(State(shared): State<Arc<Shared>>) -> DaemonResult<Json<sprintdeck_core::LearningCollection>> {
    Ok(Json(shared.learnings_store.load()?))
}

async fn delete_process_learning(State(shared): State<Arc<Shared>>, Path(id): Path<String>) -> DaemonResult<Json<serde_json::Value>> {
    let removed = shared.learnings_store.remove(&id)?;
    if !removed {
        return Err(DaemonError::LearningNotFound);
    }
    Ok(Json(serde_json::json!({ "ok": true })))
}

async fn get_history(State(shared): State<Arc<Shared>>) -> DaemonResult<Json<Vec<String>>> {
    Ok(Json(shared.paths.list_sprint_history_ids()?))
}

async fn ws_handler(State(shared): State<Arc<Shared>>, ws: WebSocketUpgrade) -> axum::response::Response {
    ws.on_upgrade(move |socket| handle_socket(socket, shared))
}

#[derive(Debug, Deserialize)]
struct ReplayQuery {
    speed: Option<f64>,
}

/// Dedicated replay endpoint (§6.1): upgrades straight to a `replay_start`
/// / event / `replay_complete` stream for `sprint_id`, bypassing the
/// `init`-then-live-broadcast shape `/ws` uses.
async fn replay_ws_handler(
    State(shared): State<Arc<Shared>>,
    Path(sprint_id): Path<String>,
    Query(query): Query<ReplayQuery>,
    ws: WebSocketUpgrade,
) -> axum::response::Response {
    let speed = query.speed.unwrap_or(1.0);
    ws.on_upgrade(move |mut socket| async move {
        let _ = replay_to_socket(&shared, &mut socket, &sprint_id, speed).await;
    })
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ClientAction {
    /// Replay a finished sprint's recording to this connection alone, at
    /// `speed` times real time (default 1.0). Does not touch the shared
    /// bus — only this socket receives the replayed events.
    Replay {
        #[serde(rename = "sprintId")]
        sprint_id: String,
        #[serde(default = "default_speed")]
        speed: f64,
    },
}

fn default_speed() -> f64 {
    1.0
}

/// On connect: send `init` with the current snapshot, then forward every
/// broadcast event until the client disconnects. A `replay` action
/// pauses that forwarding for the duration of the scripted playback so
/// the two event streams never interleave on one socket.
async fn handle_socket(mut socket: WebSocket, shared: Arc<Shared>) {
    let init_state = {
        let core = shared.core.lock().await;
        core.state.clone()
    };
    if send_event(&mut socket, &Event::Init { state: Box::new(init_state) }).await.is_err() {
        return;
    }

    let mut rx = shared.bus.register().await;
    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Some(event) => {
                        if send_event(&mut socket, &event).await.is_err() {
                            return;
                        }
                    }
                    None => return,
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(WsMessage::Text(text))) => {
                        if let Ok(ClientAction::Replay { sprint_id, speed }) = serde_json::from_str(&text) {
                            if replay_to_socket(&shared, &mut socket, &sprint_id, speed).await.is_err() {
                                return;
                            }
                        }
                    }
                    Some(Ok(WsMessage::Close(_))) | None => return,
                    Some(Ok(_)) => {}
                    Some(Err(_)) => return,
                }
            }
        }
    }
}

async fn replay_to_socket(shared: &Arc<Shared>, socket: &mut WebSocket, sprint_id: &str, speed: f64) -> Result<(), ()> {
    let path = shared.paths.sprint_replay_file(sprint_id);
    let recording = match read_recording(&path) {
        Ok(recording) => recording,
        Err(err) => {
            tracing::warn!(error = %err, sprint_id, "replay recording unreadable");
            return Ok(());
        }
    };

    let (tx, mut rx) = tokio::sync::mpsc::channel(64);
    let _handle = spawn_replay(recording, speed, tx);
    while let Some(event) = rx.recv().await {
        send_event(socket, &event).await?;
    }
    Ok(())
}

async fn send_event(socket: &mut WebSocket, event: &Event) -> Result<(), ()> {
    let Ok(json) = serde_json::to_string(event) else { return Ok(()) };
    socket.send(WsMessage::Text(json)).await.map_err(|_| ())
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
