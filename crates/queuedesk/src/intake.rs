// SPDX-FileCopyrightText: 2026 Queuedesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `queuedesk intake` interactive registration.
//!
//! Walks a customer through the intake steps at a readline prompt. `/back`
//! returns one step, `/quit` (or Ctrl+C / Ctrl+D) leaves.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use queuedesk_core::{CustomerType, DocumentKind, QueueDeskError};
use queuedesk_intake::{
    FormField, IdentifyOutcome, IntakeSession, ResultScreen, Step, StepFlow, TierOption,
    load_tiers,
};
use queuedesk_push::{ConfiguredTokenSource, PushRegistrar};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::app::App;

enum Input {
    Line(String),
    Back,
    Quit,
}

enum Next {
    Continue,
    Quit,
}

pub async fn run_intake(app: &App) -> Result<(), QueueDeskError> {
    let tiers = load_tiers(&app.api).await?;

    let source = Arc::new(ConfiguredTokenSource::from_config(&app.config.push));
    let registrar = PushRegistrar::new(app.api.clone(), source, app.config.push.enabled);
    let mut session = IntakeSession::new();
    session.set_branch_id(app.branches.active_branch().await?);
    let mut flow = StepFlow::from_config(app.api.clone(), registrar, session, &app.config.intake);

    let mut rl = DefaultEditor::new()
        .map_err(|e| QueueDeskError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "Queue registration".bold().green());
    println!("Type {} to go back, {} to exit.\n", "/back".yellow(), "/quit".yellow());

    loop {
        let outcome = match flow.step() {
            Step::TierSelect => select_tier(&mut rl, &mut flow, &tiers),
            Step::CustomerType => choose_customer_type(&mut rl, &mut flow),
            Step::Identify => identify(&mut rl, &mut flow).await,
            Step::FormDetails => fill_form(&mut rl, &mut flow).await,
            Step::Result => show_result(&mut rl, &mut flow, app).await,
        };
        match outcome {
            Ok(Next::Continue) => {}
            Ok(Next::Quit) => break,
            Err(e) => eprintln!("{}", e.to_string().red()),
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

fn ask(rl: &mut DefaultEditor, prompt: &str) -> Result<Input, QueueDeskError> {
    match rl.readline(&format!("{prompt} ")) {
        Ok(line) => {
            let trimmed = line.trim();
            match trimmed {
                "/quit" | "/exit" => Ok(Input::Quit),
                "/back" => Ok(Input::Back),
                _ => {
                    if !trimmed.is_empty() {
                        let _ = rl.add_history_entry(trimmed);
                    }
                    Ok(Input::Line(trimmed.to_string()))
                }
            }
        }
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(Input::Quit),
        Err(e) => Err(QueueDeskError::Internal(format!("failed to read input: {e}"))),
    }
}

/// Handles `/back` and `/quit`; returns the typed line otherwise.
macro_rules! line_or_return {
    ($input:expr, $flow:expr) => {
        match $input? {
            Input::Line(line) => line,
            Input::Back => {
                $flow.back()?;
                return Ok(Next::Continue);
            }
            Input::Quit => return Ok(Next::Quit),
        }
    };
}

fn select_tier(
    rl: &mut DefaultEditor,
    flow: &mut StepFlow,
    tiers: &[TierOption],
) -> Result<Next, QueueDeskError> {
    println!("{}", "Select your transaction amount".bold());
    for (i, option) in tiers.iter().enumerate() {
        println!(
            "  {}) {:<16} {}  {}",
            i + 1,
            option.name,
            option.amount_band().cyan(),
            option.description.dimmed()
        );
    }
    let line = match ask(rl, ">")? {
        Input::Line(line) => line,
        Input::Back => {
            println!("{}", "This is the first step.".dimmed());
            return Ok(Next::Continue);
        }
        Input::Quit => return Ok(Next::Quit),
    };
    let Some(option) = pick(&line, tiers) else {
        eprintln!("{}", "Enter one of the numbers above.".yellow());
        return Ok(Next::Continue);
    };
    flow.select_tier(option)?;
    Ok(Next::Continue)
}

fn choose_customer_type(rl: &mut DefaultEditor, flow: &mut StepFlow) -> Result<Next, QueueDeskError> {
    println!("{}", "Who is this transaction for?".bold());
    println!("  1) Myself");
    println!("  2) Someone else");
    let line = line_or_return!(ask(rl, ">"), flow);
    let customer_type = match line.as_str() {
        "1" => CustomerType::ForSelf,
        "2" => CustomerType::ThirdParty,
        _ => {
            eprintln!("{}", "Enter 1 or 2.".yellow());
            return Ok(Next::Continue);
        }
    };
    flow.choose_customer_type(customer_type)?;
    Ok(Next::Continue)
}

async fn identify(rl: &mut DefaultEditor, flow: &mut StepFlow) -> Result<Next, QueueDeskError> {
    let id_number = line_or_return!(ask(rl, "IC/Passport number:"), flow);
    if id_number.is_empty() {
        return Ok(Next::Continue);
    }
    let customer_type = flow.session().customer_type();
    let third_party = match customer_type {
        Some(CustomerType::ThirdParty) => {
            Some(line_or_return!(ask(rl, "Third-party IC/Passport number:"), flow))
        }
        _ => None,
    };

    let mut notices = flow.subscribe_notices();
    let printer = tokio::spawn(async move {
        while notices.changed().await.is_ok() {
            if let Some(notice) = notices.borrow_and_update().clone() {
                println!("{}", notice.yellow());
            }
        }
    });
    let outcome = flow.identify(&id_number, third_party.as_deref()).await;
    printer.abort();

    if let IdentifyOutcome::Queued(_) = outcome? {
        println!("{}", "Welcome back! Your queue number is ready.".green());
    }
    Ok(Next::Continue)
}

async fn fill_form(rl: &mut DefaultEditor, flow: &mut StepFlow) -> Result<Next, QueueDeskError> {
    let missing = flow.missing_fields();
    if missing.is_empty() {
        return confirm_submit(rl, flow).await;
    }

    println!("{}", "Please fill in your details".bold());
    for field in missing {
        let prompt = match field {
            FormField::ResidentStatus => format!("{field} (RESIDENT/NON_RESIDENT):"),
            FormField::Document(_) => format!("{field} image file:"),
            _ => format!("{field}:"),
        };
        let value = line_or_return!(ask(rl, &prompt), flow);
        if value.is_empty() {
            continue;
        }
        if let Err(e) = apply_field(flow, field, &value).await {
            eprintln!("{}", e.to_string().red());
        }
    }
    Ok(Next::Continue)
}

async fn apply_field(flow: &mut StepFlow, field: FormField, value: &str) -> Result<(), QueueDeskError> {
    match field {
        FormField::Document(kind) => attach(flow, kind, value).await,
        _ => flow.update_form(field.patch(value)?),
    }
}

async fn attach(flow: &mut StepFlow, kind: DocumentKind, path: &str) -> Result<(), QueueDeskError> {
    let path = PathBuf::from(path);
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        QueueDeskError::InvalidInput(format!("cannot read {}: {e}", path.display()))
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let preview = flow.stage_document(kind, &file_name, bytes)?;
    println!("  {} {}", "attached".dimmed(), preview);
    Ok(())
}

async fn confirm_submit(rl: &mut DefaultEditor, flow: &mut StepFlow) -> Result<Next, QueueDeskError> {
    let answer = line_or_return!(ask(rl, "Submit? [Y/n]"), flow);
    if answer.eq_ignore_ascii_case("n") {
        let key = line_or_return!(ask(rl, "Field to change (e.g. city):"), flow);
        let Some(field) = FormField::from_key(&key) else {
            eprintln!("{}", format!("Unknown field '{key}'.").yellow());
            return Ok(Next::Continue);
        };
        let value = line_or_return!(ask(rl, &format!("{field}:")), flow);
        flow.update_form(field.patch(&value)?)?;
        return Ok(Next::Continue);
    }

    flow.submit().await?;
    Ok(Next::Continue)
}

async fn show_result(
    rl: &mut DefaultEditor,
    flow: &mut StepFlow,
    app: &App,
) -> Result<Next, QueueDeskError> {
    let Some(result) = flow.session().queue_result().cloned() else {
        flow.restart();
        return Ok(Next::Continue);
    };
    let name = flow.session().record().fields.full_name.clone();
    let mut screen = ResultScreen::from_config(&result, &name, &app.config.intake);

    println!();
    println!("  Your queue number  {}", screen.display_number().green().bold());
    println!("  Position           {}", screen.position());
    println!("  Estimated wait     {} min", screen.remaining_minutes());
    println!("  {}", screen.reminder().dimmed());
    println!();

    let email = line_or_return!(ask(rl, "Email for a copy (blank to skip):"), flow);
    if !email.is_empty() {
        match screen.send_email(&app.api, &email).await {
            Ok(()) => {
                if let Some(notice) = screen.notice() {
                    println!("{}", notice.green());
                }
            }
            Err(e) => eprintln!("{}", e.to_string().red()),
        }
    }

    let again = line_or_return!(ask(rl, "Register another customer? [Y/n]"), flow);
    if again.eq_ignore_ascii_case("n") {
        return Ok(Next::Quit);
    }
    flow.restart();
    Ok(Next::Continue)
}

/// Option by 1-based menu number.
fn pick<'a>(line: &str, options: &'a [TierOption]) -> Option<&'a TierOption> {
    let n: usize = line.trim().parse().ok()?;
    options.get(n.checked_sub(1)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use queuedesk_core::Tier;

    fn options() -> Vec<TierOption> {
        Tier::ALL
            .iter()
            .map(|tier| TierOption {
                tier: *tier,
                queue_type_id: format!("t-{}", tier.ordinal()).into(),
                name: format!("{tier}"),
                description: String::new(),
            })
            .collect()
    }

    #[test]
    fn picks_by_menu_number() {
        let options = options();
        assert_eq!(pick("1", &options).unwrap().tier, Tier::Basic);
        assert_eq!(pick(" 3 ", &options).unwrap().tier, Tier::Premium);
        assert!(pick("0", &options).is_none());
        assert!(pick("4", &options).is_none());
        assert!(pick("premium", &options).is_none());
    }
}
