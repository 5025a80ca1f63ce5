// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queuedesk - branch queue desk client.
//!
//! Terminal front end for customer intake, the staff counter console and
//! the public now-serving display.

mod alert;
mod app;
mod branch;
mod counter;
mod display;
mod intake;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use queuedesk_config::QueueDeskConfig;
use queuedesk_core::QueueDeskError;

use crate::app::App;
use crate::counter::CounterCommand;

/// Queuedesk - branch queue desk client.
#[derive(Parser, Debug)]
#[command(name = "queuedesk", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file only.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep client state in memory for this run.
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store the branch carried by a branch link.
    Branch {
        /// Full URL or query string with a `data` parameter.
        link: String,
    },
    /// Register a customer and issue a queue number.
    Intake,
    /// Staff counter console.
    Counter {
        #[command(subcommand)]
        action: CounterCommand,
    },
    /// List the active branch's counters.
    Counters {
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Show now serving and the next numbers, refreshing periodically.
    Display {
        /// Only show this counter.
        #[arg(long)]
        counter: Option<String>,
        /// Render once and exit.
        #[arg(long)]
        once: bool,
    },
    /// Render a push notification as the client would.
    Alert {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
        /// Deliver as if the client window were not focused.
        #[arg(long)]
        background: bool,
        /// Treat sound as already enabled by the user.
        #[arg(long)]
        sound: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => queuedesk_config::load_and_validate_path(path),
        None => queuedesk_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            queuedesk_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.app.log_level);

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: QueueDeskConfig) -> Result<(), QueueDeskError> {
    // Alerts are rendered locally and need no backend or state.
    let command = match cli.command {
        Commands::Alert {
            title,
            body,
            background,
            sound,
        } => {
            alert::run_alert(title, body, background, sound);
            return Ok(());
        }
        command => command,
    };

    let app = App::open(config, cli.ephemeral).await?;
    match command {
        Commands::Branch { link } => branch::run_branch(&app, &link).await,
        Commands::Intake => intake::run_intake(&app).await,
        Commands::Counter { action } => counter::run_counter(&app, action).await,
        Commands::Counters { json } => branch::run_counters(&app, json).await,
        Commands::Display { counter, once } => display::run_display(&app, counter, once).await,
        Commands::Alert { .. } => Ok(()),
    }
}

/// Crates whose events follow the configured level; everything else logs warnings only.
const LOG_TARGETS: &[&str] = &[
    "queuedesk",
    "queuedesk_api",
    "queuedesk_state",
    "queuedesk_push",
    "queuedesk_intake",
    "queuedesk_counter",
    "queuedesk_display",
];

fn filter_directives(log_level: &str) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(LOG_TARGETS.iter().map(|t| format!("{t}={log_level}")));
    directives.join(",")
}

/// Logs to stderr so command output on stdout stays clean.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
