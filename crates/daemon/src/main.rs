// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! sprintdeckd - the live observation daemon. Invoked against a project
//! root (defaulting to the current directory) and run until `SIGINT` or
//! `SIGTERM`; see [`sprintdeck_daemon::run`] for the event loop itself.

use std::path::PathBuf;

use sprintdeck_storage::Paths;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    let root = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(err) => {
                eprintln!("error: could not resolve current directory: {err}");
                std::process::exit(1);
            }
        },
    };

    // Held for the process lifetime: dropping it stops the non-blocking
    // writer thread and would silently cut off the file log.
    let _log_guard = match setup_logging(&Paths::for_project(&root)) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("error: could not set up logging: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = sprintdeck_daemon::run(root).await {
        tracing::error!(error = %err, "sprintdeckd exited with an error");
        std::process::exit(1);
    }
}

fn setup_logging(paths: &Paths) -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all(paths.data_root())?;

    let log_path = paths.daemon_log_file();
    let file_appender = tracing_appender::rolling::never(
        log_path.parent().expect("daemon_log_file always has a parent"),
        log_path.file_name().expect("daemon_log_file always has a file name"),
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}
