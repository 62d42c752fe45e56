//! Subcommand implementations.

use crate::input;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use sana_core::{
    symptoms, Catalog, EntryKind, SessionEngine, SessionSummary, TriageLevel,
    DEFAULT_SETTLE_DELAY_MS,
};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

pub fn list() -> Result<()> {
    let catalog = Catalog::builtin();
    for info in catalog.listing() {
        println!("{:>9}  {:<20} {}", info.id, info.name, info.category);
    }
    Ok(())
}

pub fn catalog_lint() -> Result<()> {
    let catalog =
        Catalog::new(symptoms::builtin()).context("builtin catalog failed validation")?;
    println!(
        "{} symptoms, all branch targets resolve",
        catalog.len().to_string().green()
    );
    for def in catalog.iter() {
        let hidden = if def.hidden { "  (hidden)" } else { "" };
        println!(
            "{:>9}  {:<20} screening {} / follow-up {}{}",
            def.id,
            def.name,
            def.screening.len(),
            def.follow_up.len(),
            hidden.dimmed()
        );
    }
    Ok(())
}

pub fn check(ids: Vec<String>, json: bool, no_delay: bool) -> Result<()> {
    let mut engine = SessionEngine::new(Arc::new(Catalog::builtin()));
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    engine.start(&id_refs)?;
    debug!(session = %engine.session_id(), "interview started");

    let mut rendered = 0;
    loop {
        rendered = render_new_entries(&engine, rendered);

        if let Some(question) = engine.current_question().cloned() {
            let value = input::read_answer(&question)?;
            if let Err(err) = engine.submit_answer(value) {
                eprintln!("{}", err.to_string().red());
            }
            continue;
        }

        if let Some(generation) = engine.pending_generation() {
            // Input stays closed during the settling window; the engine
            // resumes only when we hand the generation token back.
            if !no_delay {
                thread::sleep(Duration::from_millis(DEFAULT_SETTLE_DELAY_MS));
            }
            engine.advance(generation);
            continue;
        }

        break;
    }
    render_new_entries(&engine, rendered);

    let summary = engine.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Print transcript entries added since `from`; returns the new cursor.
fn render_new_entries(engine: &SessionEngine, from: usize) -> usize {
    let transcript = engine.transcript();
    for entry in &transcript.entries[from..] {
        match &entry.kind {
            EntryKind::Prompt { text } => {
                println!("{} {}", "sana:".cyan().bold(), text);
            }
            // The patient just typed it; no echo needed.
            EntryKind::Answer { .. } => {}
            EntryKind::Message { text } => {
                println!("{} {}", "sana:".cyan().bold(), text.yellow());
            }
            EntryKind::SymptomStart { name, .. } => {
                println!("{}", format!("--- checking: {} ---", name).dimmed());
            }
            EntryKind::SymptomEnd { status, level, .. } => {
                println!("{}", colored_status(*level, &format!("--- {} ---", status)));
            }
            EntryKind::Note { text } => {
                println!("{}", text.dimmed());
            }
        }
    }
    transcript.len()
}

fn colored_status(level: TriageLevel, text: &str) -> String {
    match level {
        TriageLevel::Call911 => text.red().bold().to_string(),
        TriageLevel::NotifyCareTeam => text.yellow().to_string(),
        TriageLevel::ReferProvider => text.cyan().to_string(),
        TriageLevel::None => text.green().to_string(),
    }
}

fn print_summary(summary: &SessionSummary) {
    println!();
    println!("{}", "Session summary".bold());
    for outcome in &summary.symptoms {
        println!(
            "  {:>9}  {:<20} {}",
            outcome.symptom_id,
            outcome.name,
            colored_status(outcome.level, &outcome.status)
        );
    }
    println!(
        "  overall: {}",
        colored_status(summary.highest_severity, summary.overall_status())
    );
    if !summary.reasons.is_empty() {
        println!("{}", "Clinical reasoning".bold());
        for reason in &summary.reasons {
            println!("  - {}", reason);
        }
    }
    if !summary.notes.is_empty() {
        println!("{}", "Notes".bold());
        for note in &summary.notes {
            println!("  {}", note);
        }
    }
}
