// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Plugin hooks: fire-and-forget external commands invoked at a handful
//! of lifecycle points (team discovery, escalation, task completion).
//! Configured under `.sprint.yml`'s `plugins` list — each entry is a
//! command run with the hook name as its first argument and a JSON
//! payload piped to stdin. Modeled on the verification gate's adapter
//! shape: the core never branches on *why* a plugin failed, only whether
//! it ran.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::warn;

#[async_trait]
pub trait PluginHooks: Send + Sync {
    async fn fire(&self, hook: &str, payload: serde_json::Value);
}

/// Runs every configured plugin command for each firing, in order,
/// without waiting for one to finish before starting the next.
pub struct ProcessPluginHooks {
    commands: Vec<String>,
}

impl ProcessPluginHooks {
    pub fn new(commands: Vec<String>) -> Self {
        Self { commands }
    }
}

#[async_trait]
impl PluginHooks for ProcessPluginHooks {
    async fn fire(&self, hook: &str, payload: serde_json::Value) {
        for command in &self.commands {
            let mut child = match Command::new("sh")
                .arg("-c")
                .arg(command)
                .arg(hook)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            {
                Ok(child) => child,
                Err(err) => {
                    warn!(command, hook, error = %err, "plugin hook failed to spawn");
                    continue;
                }
            };
            if let Some(mut stdin) = child.stdin.take() {
                let bytes = serde_json::to_vec(&payload).unwrap_or_default();
                let _ = stdin.write_all(&bytes).await;
            }
            if let Err(err) = child.wait().await {
                warn!(command, hook, error = %err, "plugin hook process error");
            }
        }
    }
}

/// No-op for sprints with no `plugins` configured, and for tests.
pub struct NullPluginHooks;

#[async_trait]
impl PluginHooks for NullPluginHooks {
    async fn fire(&self, _hook: &str, _payload: serde_json::Value) {}
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Default)]
    pub struct RecordingPluginHooks {
        pub calls: Mutex<Vec<(String, serde_json::Value)>>,
    }

    #[async_trait]
    impl PluginHooks for RecordingPluginHooks {
        async fn fire(&self, hook: &str, payload: serde_json::Value) {
            self.calls.lock().push((hook.to_string(), payload));
        }
    }
}
