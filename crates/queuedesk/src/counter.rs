// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `queuedesk counter` subcommands.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Subcommand;
use colored::Colorize;
use queuedesk_core::{
    CounterId, DocumentKind, QueueDeskError, QueueEntry, QueueId, QueueStatus, format_queue_number,
};
use queuedesk_counter::{CounterConsole, ListingQuery};
use queuedesk_intake::{CustomerEditor, DocumentSlot, FormField};
use secrecy::SecretString;

use crate::app::App;

/// Password source for non-interactive sign-in.
pub const PASSWORD_ENV_VAR: &str = "QUEUEDESK_PASSWORD";

#[derive(Subcommand, Debug)]
pub enum CounterCommand {
    /// Sign in to a counter.
    SignIn {
        /// Staff email.
        email: String,
        /// Counter to staff.
        #[arg(long)]
        counter: String,
    },
    /// Show the counter and what it is serving.
    Status,
    /// Call the next pending customer.
    CallNext,
    /// Complete an entry (defaults to the one being served).
    Complete {
        /// Queue id or number.
        queue: Option<String>,
    },
    /// Cancel an entry (defaults to the one being served).
    Cancel {
        /// Queue id or number.
        queue: Option<String>,
    },
    /// List the branch queue.
    List {
        /// Pending, InProgress, Completed or Canceled.
        #[arg(long)]
        status: Option<QueueStatus>,
        /// Queue-number substring.
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        json: bool,
    },
    /// Show or edit the customer of an entry.
    Customer {
        /// Queue id or number.
        queue: String,
        /// Field to change, as `key=value` (e.g. `city=Ipoh`).
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Replace a document, as `kind=path` with kind one of
        /// `id-front`, `id-back`, `passport-front`.
        #[arg(long = "document", value_name = "KIND=PATH")]
        documents: Vec<String>,
    },
    /// Sign out, unless a customer is still being served.
    SignOut,
}

pub async fn run_counter(app: &App, command: CounterCommand) -> Result<(), QueueDeskError> {
    if let CounterCommand::SignIn { email, counter } = command {
        return sign_in(app, &email, &counter).await;
    }

    let mut console = CounterConsole::open(
        app.api.clone(),
        app.sessions.clone(),
        app.branches.active_branch().await?,
        &app.config.counter,
    )
    .await
    .map_err(|e| match e {
        QueueDeskError::Unauthorized => {
            QueueDeskError::Guard("Not signed in. Run `queuedesk counter sign-in` first.".into())
        }
        other => other,
    })?;
    console.load().await?;

    let result = match command {
        CounterCommand::SignIn { .. } => Ok(()),
        CounterCommand::Status => {
            print_status(&console);
            Ok(())
        }
        CounterCommand::CallNext => call_next(&mut console).await,
        CounterCommand::Complete { queue } => {
            close(&mut console, queue.as_deref(), QueueStatus::Completed).await
        }
        CounterCommand::Cancel { queue } => {
            close(&mut console, queue.as_deref(), QueueStatus::Canceled).await
        }
        CounterCommand::List {
            status,
            search,
            page,
            json,
        } => list(&console, ListingQuery { status, search, page }, json),
        CounterCommand::Customer {
            queue,
            set,
            documents,
        } => customer(app, &console, &queue, &set, &documents).await,
        CounterCommand::SignOut => {
            console.sign_out().await?;
            println!("Signed out.");
            Ok(())
        }
    };

    if let Some(notice) = console.notice() {
        eprintln!("{}", notice.yellow());
    }
    result
}

async fn sign_in(app: &App, email: &str, counter: &str) -> Result<(), QueueDeskError> {
    let password = read_password()?;
    let session = app
        .sessions
        .sign_in(email, password, &CounterId::from(counter))
        .await?;
    println!(
        "Signed in as {} at counter {counter}.",
        session.name.as_deref().unwrap_or(&session.id).bold()
    );
    Ok(())
}

/// Reads the password from the environment or an interactive prompt.
fn read_password() -> Result<SecretString, QueueDeskError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(SecretString::from(password));
    }

    if std::io::stdin().is_terminal() {
        eprint!("Password: ");
        let password = rpassword::read_password()
            .map_err(|e| QueueDeskError::InvalidInput(format!("failed to read password: {e}")))?;
        if password.is_empty() {
            return Err(QueueDeskError::InvalidInput("password is required".into()));
        }
        return Ok(SecretString::from(password));
    }

    Err(QueueDeskError::InvalidInput(format!(
        "no password provided; set {PASSWORD_ENV_VAR} or run interactively"
    )))
}

fn print_status(console: &CounterConsole) {
    let staff = console.staff();
    println!();
    match console.counter() {
        Some(counter) => println!(
            "  {} (counter {})  {}",
            counter.name.bold(),
            counter.number,
            staff.name.as_deref().unwrap_or(&staff.id).dimmed()
        ),
        None => println!("  {}", "Assigned counter not found at this branch.".yellow()),
    }
    println!("  {}", "-".repeat(35));
    println!(
        "    Serving:  {}",
        format_queue_number(console.now_serving()).green().bold()
    );
    let pending = console
        .queues()
        .iter()
        .filter(|q| q.status == QueueStatus::Pending)
        .count();
    println!("    Waiting:  {pending}");
    println!();
}

async fn call_next(console: &mut CounterConsole) -> Result<(), QueueDeskError> {
    match console.call_next().await? {
        Some(entry) => println!(
            "Now serving {} ({})",
            format_queue_number(Some(&entry.number)).green().bold(),
            entry.customer.full_name
        ),
        None => println!("No pending customers."),
    }
    Ok(())
}

async fn close(
    console: &mut CounterConsole,
    queue: Option<&str>,
    status: QueueStatus,
) -> Result<(), QueueDeskError> {
    let id = match queue {
        Some(key) => resolve(console.queues(), key)?.id.clone(),
        None => serving_entry(console)?,
    };
    console.update_status(&id, status).await?;
    println!("{} {status}.", id.as_str().bold());
    Ok(())
}

fn serving_entry(console: &CounterConsole) -> Result<QueueId, QueueDeskError> {
    let counter = console.counter().map(|c| c.id.clone());
    console
        .queues()
        .iter()
        .find(|q| {
            q.status == QueueStatus::InProgress
                && q.counter.as_ref().map(|c| &c.id) == counter.as_ref()
        })
        .map(|q| q.id.clone())
        .ok_or_else(|| QueueDeskError::NotFound {
            what: "entry being served at this counter".into(),
        })
}

/// Finds an entry by queue id, full number or display number.
fn resolve<'a>(queues: &'a [QueueEntry], key: &str) -> Result<&'a QueueEntry, QueueDeskError> {
    let key = key.trim();
    queues
        .iter()
        .find(|q| q.id.as_str() == key || q.number.eq_ignore_ascii_case(key))
        .or_else(|| {
            queues
                .iter()
                .find(|q| format_queue_number(Some(&q.number)) == key)
        })
        .ok_or_else(|| QueueDeskError::NotFound {
            what: format!("queue {key}"),
        })
}

fn list(console: &CounterConsole, query: ListingQuery, json: bool) -> Result<(), QueueDeskError> {
    let page = console.listing(&query);

    if json {
        let out = serde_json::to_string_pretty(&page.items)
            .map_err(|e| QueueDeskError::Internal(format!("failed to encode listing: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    if page.items.is_empty() {
        println!("No matching entries.");
        return Ok(());
    }
    for entry in &page.items {
        let status = match entry.status {
            QueueStatus::Pending => entry.status.to_string().yellow(),
            QueueStatus::InProgress => entry.status.to_string().green(),
            QueueStatus::Completed => entry.status.to_string().dimmed(),
            QueueStatus::Canceled => entry.status.to_string().red(),
        };
        let counter = entry
            .counter
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or("-");
        println!(
            "  {:<10} {:<12} {:<24} {}",
            entry.number.bold(),
            status,
            entry.customer.full_name,
            counter
        );
    }
    println!(
        "  {}",
        format!(
            "page {} of {} ({} entries)",
            page.page, page.total_pages, page.total_items
        )
        .dimmed()
    );
    Ok(())
}

async fn customer(
    app: &App,
    console: &CounterConsole,
    queue: &str,
    set: &[String],
    documents: &[String],
) -> Result<(), QueueDeskError> {
    let entry = resolve(console.queues(), queue)?;
    let mut editor = console.edit_customer(&entry.id)?;

    for assignment in set {
        let (key, value) = split_pair(assignment)?;
        let field = FormField::from_key(key)
            .ok_or_else(|| QueueDeskError::InvalidInput(format!("unknown field '{key}'")))?;
        editor.patch(field.patch(value)?);
    }
    for assignment in documents {
        let (kind, path) = split_pair(assignment)?;
        let kind = document_kind(kind)?;
        let path = PathBuf::from(path);
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            QueueDeskError::InvalidInput(format!("cannot read {}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        editor.stage_document(kind, &file_name, bytes)?;
    }

    if editor.is_dirty() {
        editor.save(&app.api).await?;
        println!("{}", queuedesk_intake::edit::CUSTOMER_SAVED.green());
    }
    print_customer(&editor);
    Ok(())
}

fn split_pair(assignment: &str) -> Result<(&str, &str), QueueDeskError> {
    assignment
        .split_once('=')
        .ok_or_else(|| QueueDeskError::InvalidInput(format!("expected KEY=VALUE, got '{assignment}'")))
}

fn document_kind(key: &str) -> Result<DocumentKind, QueueDeskError> {
    match key.trim().to_ascii_lowercase().as_str() {
        "id-front" => Ok(DocumentKind::IdFront),
        "id-back" => Ok(DocumentKind::IdBack),
        "passport-front" => Ok(DocumentKind::PassportFront),
        other => Err(QueueDeskError::InvalidInput(format!(
            "unknown document '{other}'"
        ))),
    }
}

fn print_customer(editor: &CustomerEditor) {
    let record = editor.record();
    let f = &record.fields;
    println!();
    println!("  {}  {}", f.full_name.bold(), editor.customer_id().as_str().dimmed());
    println!("  {}", "-".repeat(35));
    let rows = [
        ("IC/Passport", f.id_number.clone()),
        ("Date of Birth", f.date_of_birth.clone()),
        ("Nationality", f.nationality.clone()),
        ("Address", f.address.clone()),
        ("City", f.city.clone()),
        ("Postcode", f.postcode.clone()),
        ("State", f.state.clone()),
        ("Country", f.country.clone()),
        ("Mobile Number", f.phone_number.clone()),
        (
            "Resident Status",
            f.resident_status.map(|s| s.to_string()).unwrap_or_default(),
        ),
        ("Order Purpose", f.order_purpose.clone()),
        ("Occupation", f.occupation.clone()),
        ("Nature of Business", f.nature_of_business.clone()),
    ];
    for (label, value) in rows {
        println!("    {label:<20} {value}");
    }
    for kind in DocumentKind::ALL {
        let shown = record.document(kind).map(DocumentSlot::preview).unwrap_or("-");
        println!("    {:<20} {shown}", kind.label());
    }
    println!();
}
