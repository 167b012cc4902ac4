// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Webhook delivery: bounded timeout, three retries with exponential
//! backoff, fire-and-forget from the caller's perspective. The engine
//! spawns delivery as a detached task and broadcasts a `webhook_status`
//! event once the attempt sequence settles — it never blocks a handler
//! on network I/O.

use async_trait::async_trait;
use sprintdeck_core::NotificationsConfig;
use std::time::Duration;
use tracing::warn;

pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);
pub const MAX_ATTEMPTS: u32 = 3;

/// Outcome of a (possibly retried) delivery attempt sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebhookOutcome {
    pub success: bool,
    pub attempts: u32,
}

/// Delivers one named event with a JSON payload. Implementations decide
/// for themselves whether `event` is actually configured to be sent
/// (`NotificationsConfig::wants`); a notifier with no webhook configured
/// is a trivial no-op success.
#[async_trait]
pub trait WebhookNotifier: Send + Sync {
    async fn notify(&self, event: &str, payload: serde_json::Value) -> WebhookOutcome;
}

/// Real HTTP delivery via `reqwest`, per `NotificationsConfig`.
pub struct HttpWebhookNotifier {
    client: reqwest::Client,
    config: NotificationsConfig,
}

impl HttpWebhookNotifier {
    pub fn new(config: NotificationsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl WebhookNotifier for HttpWebhookNotifier {
    async fn notify(&self, event: &str, payload: serde_json::Value) -> WebhookOutcome {
        if !self.config.wants(event) {
            return WebhookOutcome { success: true, attempts: 0 };
        }
        let Some(url) = self.config.webhook.as_deref() else {
            return WebhookOutcome { success: true, attempts: 0 };
        };

        let mut attempts = 0;
        loop {
            attempts += 1;
            let mut request = self.client.post(url).json(&payload).timeout(WEBHOOK_TIMEOUT);
            for (key, value) in &self.config.headers {
                request = request.header(key, value);
            }
            match request.send().await {
                Ok(resp) if resp.status().is_success() => {
                    return WebhookOutcome { success: true, attempts };
                }
                Ok(resp) => {
                    warn!(event, status = %resp.status(), attempts, "webhook delivery rejected");
                }
                Err(err) => {
                    warn!(event, error = %err, attempts, "webhook delivery failed");
                }
            }
            if attempts >= MAX_ATTEMPTS {
                return WebhookOutcome { success: false, attempts };
            }
            tokio::time::sleep(backoff(attempts)).await;
        }
    }
}

/// Exponential backoff: 200ms, 400ms, 800ms, ...
fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(200 * 2u64.pow(attempt.saturating_sub(1)))
}

/// No-op notifier for sprints with no `notifications.webhook` configured,
/// and for tests that don't care about delivery.
pub struct NullWebhookNotifier;

#[async_trait]
impl WebhookNotifier for NullWebhookNotifier {
    async fn notify(&self, _event: &str, _payload: serde_json::Value) -> WebhookOutcome {
        WebhookOutcome { success: true, attempts: 0 }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_support {
    use super::*;
    use parking_lot::Mutex;

    /// Captures every call for test assertions instead of performing I/O.
    #[derive(Default)]
    pub struct RecordingWebhookNotifier {
        pub calls: Mutex<Vec<(String, serde_json::Value)>>,
    }

    #[async_trait]
    impl WebhookNotifier for RecordingWebhookNotifier {
        async fn notify(&self, event: &str, payload: serde_json::Value) -> WebhookOutcome {
            self.calls.lock().push((event.to_string(), payload));
            WebhookOutcome { success: true, attempts: 1 }
        }
    }
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
