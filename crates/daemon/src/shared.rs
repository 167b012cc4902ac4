// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! The daemon's process-lifetime state, split per the concurrency model
//! (§5): everything in [`Shared`] is either immutable after startup or
//! independently synchronized, and [`Core`] is the one piece every
//! handler mutates, reached only through `Shared::core`'s single mutex.
//! A handler holds that lock for its entire critical section and only
//! spawns detached tasks (webhooks, plugin hooks, verification) after
//! releasing it — see `crate::reactor` and `crate::gate_runner`.

use crate::bus::Bus;
use crate::error::DaemonResult;
use sprintdeck_core::{Clock, Event, PriceTable, SprintConfig, SprintState, SystemClock, UuidIdGen};
use sprintdeck_engine::{InboxCursors, NullPluginHooks, NullWebhookNotifier, PluginHooks, ProcessPluginHooks, ProcessVerificationGate, VerificationGate, WebhookNotifier};
use sprintdeck_storage::{AnalyticsStore, HistoryWriter, LearningsStore, MemoryStore, Paths, Persistence, Recorder};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// State owned exclusively behind [`Shared::core`]'s lock: the live
/// sprint, its inbox read cursors, the attached replay recorder (if
/// recording is enabled and a sprint is active), and the current sprint's
/// id.
pub struct Core {
    pub state: SprintState,
    pub cursors: InboxCursors,
    pub recorder: Option<Recorder>,
    pub sprint_id: Option<String>,
}

impl Core {
    fn new() -> Self {
        Self {
            state: SprintState::default(),
            cursors: InboxCursors::new(),
            recorder: None,
            sprint_id: None,
        }
    }
}

pub struct Shared {
    pub project_root: PathBuf,
    pub paths: Paths,
    pub config: SprintConfig,
    pub price_table: PriceTable,
    pub clock: SystemClock,
    pub id_gen: UuidIdGen,
    pub webhook: Arc<dyn WebhookNotifier>,
    pub plugins: Arc<dyn PluginHooks>,
    pub gate: Arc<dyn VerificationGate>,
    pub persistence: Persistence,
    pub memory_store: MemoryStore,
    pub learnings_store: LearningsStore,
    pub analytics: AnalyticsStore,
    pub history: HistoryWriter,
    pub bus: Bus,
    pub core: Mutex<Core>,
}

impl Shared {
    pub fn bootstrap(project_root: PathBuf) -> DaemonResult<Arc<Self>> {
        let config = crate::config::load(&project_root)?;
        let paths = Paths::for_project(&project_root);
        paths.ensure_data_root()?;

        let webhook: Arc<dyn WebhookNotifier> = if config.notifications.webhook.is_some() {
            Arc::new(sprintdeck_engine::HttpWebhookNotifier::new(config.notifications.clone()))
        } else {
            Arc::new(NullWebhookNotifier)
        };
        let plugins: Arc<dyn PluginHooks> = if config.plugins.is_empty() {
            Arc::new(NullPluginHooks)
        } else {
            Arc::new(ProcessPluginHooks::new(config.plugins.clone()))
        };
        let gate: Arc<dyn VerificationGate> = Arc::new(ProcessVerificationGate);

        Ok(Arc::new(Self {
            memory_store: MemoryStore::new(paths.clone()),
            learnings_store: LearningsStore::new(paths.clone()),
            analytics: AnalyticsStore::new(paths.clone()),
            history: HistoryWriter::new(paths.clone()),
            persistence: Persistence::new(paths.clone()),
            paths,
            project_root,
            config,
            price_table: PriceTable::default(),
            clock: SystemClock,
            id_gen: UuidIdGen,
            webhook,
            plugins,
            gate,
            bus: Bus::new(),
            core: Mutex::new(Core::new()),
        }))
    }

    /// Start (or skip, if recording is disabled) the replay recorder for
    /// a freshly-assigned sprint id.
    pub fn start_recorder(&self, sprint_id: &str) -> Option<Recorder> {
        if !self.config.recording.enabled {
            return None;
        }
        match Recorder::attach(self.paths.sprint_replay_file(sprint_id)) {
            Ok(recorder) => Some(recorder),
            Err(err) => {
                tracing::warn!(error = %err, sprint_id, "failed to attach replay recorder");
                None
            }
        }
    }

    /// Fan `event` to every connected client and, unless it bypasses
    /// persistence, schedule a debounced state snapshot and append it to
    /// the active recording.
    pub async fn broadcast(&self, core: &mut Core, event: Event) {
        tracing::debug!(event = %event.log_summary(), "broadcast");
        self.bus.publish(&event).await;
        if event.bypasses_persistence() {
            return;
        }
        self.persistence.schedule(core.state.clone()).await;
        if let Some(recorder) = core.recorder.as_mut() {
            if let Err(err) = recorder.record(&event, self.clock.epoch_ms()) {
                tracing::warn!(error = %err, "failed to append replay record");
            }
        }
    }

    pub async fn broadcast_all(&self, core: &mut Core, events: Vec<Event>) {
        for event in events {
            self.broadcast(core, event).await;
        }
    }
}

#[cfg(test)]
#[path = "shared_tests.rs"]
mod tests;
