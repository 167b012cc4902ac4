// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! Client registry and fan-out for the broadcast bus (§4.3). Every event
//! a handler produces reaches every connected WebSocket client; an
//! unbounded channel per client means a slow reader never blocks the
//! reactor, only grows its own backlog.

use sprintdeck_core::Event;
use tokio::sync::mpsc;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct Bus {
    clients: Mutex<Vec<mpsc::UnboundedSender<Event>>>,
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new client, returning the receiving half it should
    /// drain into its WebSocket connection.
    pub async fn register(&self) -> mpsc::UnboundedReceiver<Event> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.clients.lock().await.push(tx);
        rx
    }

    /// Fan `event` out to every connected client, dropping any whose
    /// receiver has gone away.
    pub async fn publish(&self, event: &Event) {
        let mut clients = self.clients.lock().await;
        clients.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
