//! Per-session mutable state.
//!
//! One `SessionState` exists per active session and is owned by whoever runs
//! the session loop. Engine and transcript operations take it by `&mut`.

use chrono::{DateTime, Local};

use crate::script::LogEvent;
use crate::transcript::Transcript;

/// Identifier of a scheduled tick.
///
/// Only the tick whose id matches [`SessionState::pending_tick`] may act;
/// any other wake-up is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

/// A scripted log entry stamped with the wall-clock time it was revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealedLogEntry {
    pub event: LogEvent,
    pub revealed_at: DateTime<Local>,
}

impl RevealedLogEntry {
    /// Formats the reveal time as `HH:MM:SS`.
    pub fn time_label(&self) -> String {
        self.revealed_at.format("%H:%M:%S").to_string()
    }
}

/// Coarse playback phase derived from `running` and the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not started, or reset.
    Stopped,
    /// Running with entries left to reveal.
    Playing,
    /// Running, but the log script is exhausted.
    Idle,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Stopped => "Stopped",
            Phase::Playing => "Playing",
            Phase::Idle => "Idle",
        }
    }
}

/// Mutable state for one demo session.
#[derive(Debug, Default)]
pub struct SessionState {
    pub(crate) transcript: Transcript,
    pub(crate) revealed_logs: Vec<RevealedLogEntry>,
    pub(crate) cursor: usize,
    pub(crate) running: bool,
    pub(crate) pending_tick: Option<TickId>,
    next_tick: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn revealed_logs(&self) -> &[RevealedLogEntry] {
        &self.revealed_logs
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending_tick(&self) -> Option<TickId> {
        self.pending_tick
    }

    /// Appends a user message; see [`Transcript::submit_user_message`].
    pub fn submit_user_message(&mut self, text: &str) -> bool {
        self.transcript.submit_user_message(text)
    }

    /// Issues a new tick id and marks it as the only one allowed to fire.
    pub(crate) fn issue_tick(&mut self) -> TickId {
        let id = TickId(self.next_tick);
        self.next_tick = self.next_tick.wrapping_add(1);
        self.pending_tick = Some(id);
        id
    }

    /// Clears the reveal progress. The tick id counter keeps counting so
    /// ids from an earlier run can never match again.
    pub(crate) fn clear_playback(&mut self) {
        self.revealed_logs.clear();
        self.cursor = 0;
        self.pending_tick = None;
    }
}
