//! Headless playback.
//!
//! Drives the same engine and scheduler as the TUI, but prints each chat
//! message and revealed log entry to stdout instead of drawing them.
//! Ends when the log script is exhausted or on Ctrl+C.

use std::io::{self, Write};

use anyhow::{Context, Result};
use prisma_core::{
    ChatEvent, PlaybackEngine, RevealedLogEntry, SessionState, Severity, TickOutcome,
    TickScheduler, interrupt,
};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub format: OutputFormat,
    /// Messages submitted as the user.
    pub messages: Vec<String>,
    /// Log entries revealed before `messages` are submitted. 0 submits them
    /// right after the seeded chat; a count past the script end submits
    /// them once playback finishes.
    pub say_after: usize,
}

/// One line of JSON output.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record<'a> {
    Chat {
        sender: &'static str,
        text: &'a str,
    },
    Log {
        index: usize,
        time: String,
        step: &'static str,
        detail: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        severity: Option<Severity>,
    },
}

impl<'a> Record<'a> {
    fn chat(message: &'a ChatEvent) -> Self {
        Record::Chat {
            sender: message.sender.label(),
            text: &message.text,
        }
    }

    fn log(index: usize, entry: &RevealedLogEntry) -> Self {
        Record::Log {
            index,
            time: entry.time_label(),
            step: entry.event.step,
            detail: entry.event.detail,
            severity: entry.event.severity,
        }
    }
}

/// Formats a chat message as text, continuation lines aligned under the first.
fn chat_text(message: &ChatEvent) -> String {
    let label = format!("[{}] ", message.sender.label());
    let pad = " ".repeat(label.len());
    let mut out = String::new();
    for (i, line) in message.text.lines().enumerate() {
        if i == 0 {
            out.push_str(&label);
        } else {
            out.push('\n');
            out.push_str(&pad);
        }
        out.push_str(line);
    }
    out
}

fn log_text(entry: &RevealedLogEntry) -> String {
    let badge = entry
        .event
        .severity
        .map(|s| format!(" [{}]", s.label()))
        .unwrap_or_default();
    format!(
        "{}{} {}: {}",
        entry.time_label(),
        badge,
        entry.event.step,
        entry.event.detail
    )
}

fn render(
    format: OutputFormat,
    record: &Record<'_>,
    text: impl FnOnce() -> String,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text()),
        OutputFormat::Json => serde_json::to_string(record).context("serialize record"),
    }
}

fn emit(line: &str) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{line}").context("write to stdout")?;
    out.flush().context("flush stdout")
}

fn emit_chat(format: OutputFormat, message: &ChatEvent) -> Result<()> {
    emit(&render(format, &Record::chat(message), || chat_text(message))?)
}

fn submit_messages(session: &mut SessionState, options: &PlayOptions) -> Result<()> {
    for text in &options.messages {
        if !session.submit_user_message(text) {
            warn!("skipping blank message");
            continue;
        }
        if let Some(message) = session.transcript().last() {
            emit_chat(options.format, message)?;
        }
    }
    Ok(())
}

/// Plays the script to the end.
///
/// # Errors
/// Returns `InterruptedError` on Ctrl+C, or an error if stdout fails.
pub async fn run_play(engine: &PlaybackEngine, options: &PlayOptions) -> Result<()> {
    let mut session = SessionState::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut scheduler = TickScheduler::new(tx, |id| id);

    let first = engine.start(&mut session);
    for message in session.transcript() {
        emit_chat(options.format, message)?;
    }

    let mut unsent = true;
    if options.say_after == 0 {
        submit_messages(&mut session, options)?;
        unsent = false;
    }

    scheduler.schedule(first);

    loop {
        let id = tokio::select! {
            id = rx.recv() => match id {
                Some(id) => id,
                None => break,
            },
            () = interrupt::wait_for_interrupt() => {
                scheduler.cancel();
                info!(revealed = session.cursor(), "playback interrupted");
                return Err(interrupt::InterruptedError.into());
            }
        };

        match engine.tick(&mut session, id) {
            TickOutcome::Revealed { index, next } => {
                let entry = &session.revealed_logs()[index];
                emit(&render(options.format, &Record::log(index, entry), || {
                    log_text(entry)
                })?)?;
                if unsent && index + 1 == options.say_after {
                    submit_messages(&mut session, options)?;
                    unsent = false;
                }
                scheduler.schedule(next);
            }
            TickOutcome::Exhausted => break,
            TickOutcome::Stale => {}
        }
    }

    if unsent {
        submit_messages(&mut session, options)?;
    }

    eprintln!(
        "Playback finished: {} log entries revealed.",
        session.revealed_logs().len()
    );
    Ok(())
}
