// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `queuedesk display`.

use std::sync::Arc;

use colored::Colorize;
use queuedesk_core::{CounterId, QueueDeskError};
use queuedesk_display::{Board, DisplayPoller, DisplayScope, DisplayState};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::app::App;

pub async fn run_display(
    app: &App,
    counter: Option<String>,
    once: bool,
) -> Result<(), QueueDeskError> {
    let scope = match counter {
        Some(id) => DisplayScope::Counter(CounterId::from(id)),
        None => DisplayScope::AllCounters,
    };
    let poller = Arc::new(DisplayPoller::new(
        app.api.clone(),
        app.branches.clone(),
        scope,
        &app.config.display,
    ));

    if once {
        if let Some(state) = poller.poll_once().await {
            render(&state);
        }
        return Ok(());
    }

    let cancel = install_ctrl_c();
    let mut updates = poller.subscribe();
    let task = tokio::spawn(Arc::clone(&poller).run(cancel.clone()));

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                render(&state);
            }
            _ = cancel.cancelled() => break,
        }
    }

    task.await
        .map_err(|e| QueueDeskError::Internal(format!("display poller panicked: {e}")))?;
    Ok(())
}

/// Cancelled on Ctrl+C.
fn install_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, stopping display");
                trigger.cancel();
            }
            Err(e) => warn!(error = %e, "failed to listen for Ctrl+C"),
        }
    });
    token
}

fn render(state: &DisplayState) {
    match state {
        DisplayState::Loading => println!("{}", "Loading...".dimmed()),
        DisplayState::Failed(message) => println!("{}", message.red()),
        DisplayState::Ready(board) => render_board(board),
    }
}

fn render_board(board: &Board) {
    println!();
    for row in &board.rows {
        println!(
            "  {:<20} {}",
            row.counter.name.bold(),
            row.now_serving.blue().bold()
        );
    }
    if !board.next.is_empty() {
        println!("  {}", "Next Queue Numbers".bold());
        println!("  {}", board.next.join("  "));
    }
}
