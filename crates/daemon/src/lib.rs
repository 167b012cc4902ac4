// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! sprintdeckd: the live reactor (§2, §5). Ties the filesystem watcher
//! to the engine/state model and serves the control API over the same
//! [`Shared`] the watcher-driven path mutates.
//!
//! Module layout mirrors the concurrency model: [`shared`] owns the one
//! mutex every handler locks, [`reactor`] dispatches classified watch
//! events to the engine, [`gate_runner`] and [`effects`] run the
//! detached side effects a reactor pass defers, and [`api`] is the thin
//! HTTP/WebSocket surface over it all.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod api;
pub mod bus;
pub mod config;
pub mod effects;
pub mod error;
pub mod gate_runner;
pub mod reactor;
pub mod route;
pub mod shared;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::error::DaemonResult;
use crate::shared::Shared;

/// Run the daemon against `project_root` until a shutdown signal
/// arrives. Binds the control API to `shared.config.server.port`,
/// starts the filesystem watcher, and feeds every event it yields
/// through [`reactor::handle`] until `SIGINT`/`SIGTERM` or the watcher
/// channel closes, then flushes the persistence debounce (§7) before
/// returning.
pub async fn run(project_root: PathBuf) -> DaemonResult<()> {
    let shared = Shared::bootstrap(project_root)?;

    if let Some(state) = shared.persistence.load()? {
        let mut core = shared.core.lock().await;
        core.state = state;
    }

    let (_watcher, mut events) = sprintdeck_watch::DirWatcher::start(shared.project_root.clone())?;

    let port = shared.config.server.port;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "control API listening");
    let app = api::router(Arc::clone(&shared));
    let server = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            error!(%err, "control API server exited");
        }
    });

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    loop {
        tokio::select! {
            event = events.recv() => {
                match event {
                    Some(event) => reactor::handle(&shared, event).await,
                    None => {
                        info!("watcher channel closed, shutting down");
                        break;
                    }
                }
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
                break;
            }
            _ = sigint.recv() => {
                info!("received SIGINT, shutting down");
                break;
            }
        }
    }

    server.abort();
    let core = shared.core.lock().await;
    shared.persistence.flush(&core.state).await?;
    info!("daemon stopped");
    Ok(())
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
