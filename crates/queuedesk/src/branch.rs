// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `queuedesk branch` and `queuedesk counters`.

use colored::Colorize;
use queuedesk_core::QueueDeskError;

use crate::app::App;

pub async fn run_branch(app: &App, link: &str) -> Result<(), QueueDeskError> {
    let Some(parsed) = app.branches.apply_link(link).await? else {
        println!("{}", "Link could not be read; active branch unchanged.".yellow());
        return Ok(());
    };

    let active = app.branches.active_branch().await?;
    match parsed.metadata.branch_name.as_deref() {
        Some(name) => println!("Active branch: {} ({active})", name.bold()),
        None => println!("Active branch: {}", active.as_str().bold()),
    }
    if let Some(target) = parsed.navigation_url.as_deref() {
        println!("Continue at: {target}");
    }
    Ok(())
}

pub async fn run_counters(app: &App, json: bool) -> Result<(), QueueDeskError> {
    let counters = app.branches.counter_catalogue(&app.api).await?;

    if json {
        let out = serde_json::to_string_pretty(&counters)
            .map_err(|e| QueueDeskError::Internal(format!("failed to encode counters: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    if counters.is_empty() {
        println!("No counters at this branch.");
        return Ok(());
    }
    for counter in &counters {
        println!(
            "  {:>3}  {:<20} {}  {}",
            counter.number,
            counter.name.bold(),
            counter.id.as_str().dimmed(),
            counter.description
        );
    }
    Ok(())
}
