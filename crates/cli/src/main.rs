// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

//! sprintdeck - control-plane CLI for `sprintdeckd`

mod client;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use client::DaemonClient;

#[derive(Parser)]
#[command(name = "sprintdeck", version, about = "Observe and steer a sprintdeckd sprint")]
struct Cli {
    /// Project directory the daemon is (or will be) watching. Defaults to
    /// the current directory.
    #[arg(short = 'C', long = "root", global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Control API host:port. Overrides the `.sprint.yml` port for
    /// commands that talk to an already-running daemon.
    #[arg(long, global = true, value_name = "HOST:PORT")]
    addr: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run sprintdeckd in the foreground against the project root
    Daemon,
    /// Print the current sprint state as JSON
    State,
    /// Rescan the project root and (re-)start observing it
    Launch,
    /// Toggle pause
    Pause,
    /// Stop the active sprint, writing history and a retro
    Stop,
    /// Checkpoint management
    Checkpoint(CheckpointArgs),
    /// Dismiss the active escalation
    DismissEscalation,
    /// Dismiss the active merge conflict
    DismissMergeConflict,
    /// Restore the last persisted snapshot
    Resume,
    /// Memory management
    Memories(MemoriesArgs),
    /// Process-learning management
    Learnings(LearningsArgs),
    /// List recorded sprint ids
    History,
}

#[derive(clap::Args)]
struct CheckpointArgs {
    #[command(subcommand)]
    command: CheckpointCommand,
}

#[derive(Subcommand)]
enum CheckpointCommand {
    /// Gate a task for human approval
    Add { task_id: String },
    /// Release the currently pending checkpoint
    Release,
}

#[derive(clap::Args)]
struct MemoriesArgs {
    #[command(subcommand)]
    command: MemoriesCommand,
}

#[derive(Subcommand)]
enum MemoriesCommand {
    /// List memories, optionally filtered
    List {
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        q: Option<String>,
    },
    /// Record a new memory
    Add { role: String, key: String, value: String },
    /// Remove a memory by id
    Rm { id: String },
}

#[derive(clap::Args)]
struct LearningsArgs {
    #[command(subcommand)]
    command: LearningsCommand,
}

#[derive(Subcommand)]
enum LearningsCommand {
    /// List accumulated process learnings
    List,
    /// Remove a learning by id
    Rm { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let root = cli.root.unwrap_or(std::env::current_dir().context("resolve current directory")?);

    if matches!(cli.command, Commands::Daemon) {
        return sprintdeck_daemon::run(root).await.context("sprintdeckd exited with an error");
    }

    let addr = cli.addr.unwrap_or_else(|| default_addr(&root));
    let client = DaemonClient::new(format!("http://{addr}"));
    run_command(&client, cli.command).await
}

/// Resolve the control API address for commands that don't run the
/// daemon themselves: read the configured port out of `.sprint.yml` if
/// present, falling back to the compiled-in default.
fn default_addr(root: &std::path::Path) -> String {
    let port = sprintdeck_core::SprintConfig::default().server.port;
    let config_path = root.join(".sprint.yml");
    let port = std::fs::read(&config_path)
        .ok()
        .and_then(|bytes| serde_yaml::from_slice::<sprintdeck_core::SprintConfig>(&bytes).ok())
        .map(|config| config.server.port)
        .unwrap_or(port);
    format!("127.0.0.1:{port}")
}

async fn run_command(client: &DaemonClient, command: Commands) -> Result<()> {
    match command {
        Commands::Daemon => unreachable!("handled before client construction"),
        Commands::State => print_json(client.state().await?),
        Commands::Launch => print_json(client.launch().await?),
        Commands::Pause => print_json(client.pause().await?),
        Commands::Stop => print_json(client.stop().await?),
        Commands::Checkpoint(args) => match args.command {
            CheckpointCommand::Add { task_id } => print_json(client.checkpoint(&task_id).await?),
            CheckpointCommand::Release => print_json(client.checkpoint_release().await?),
        },
        Commands::DismissEscalation => print_json(client.dismiss_escalation().await?),
        Commands::DismissMergeConflict => print_json(client.dismiss_merge_conflict().await?),
        Commands::Resume => print_json(client.resume().await?),
        Commands::Memories(args) => match args.command {
            MemoriesCommand::List { role, q } => print_json(client.memories(role.as_deref(), q.as_deref()).await?),
            MemoriesCommand::Add { role, key, value } => print_json(client.add_memory(&role, &key, &value).await?),
            MemoriesCommand::Rm { id } => {
                client.remove_memory(&id).await?;
                Ok(())
            }
        },
        Commands::Learnings(args) => match args.command {
            LearningsCommand::List => print_json(client.process_learnings().await?),
            LearningsCommand::Rm { id } => {
                client.remove_process_learning(&id).await?;
                Ok(())
            }
        },
        Commands::History => print_json(client.history().await?),
    }
}

fn print_json<T: serde::Serialize>(value: T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&value).context("serialize response")?);
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
