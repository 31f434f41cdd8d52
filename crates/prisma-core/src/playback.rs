//! Playback engine: reveals the log script one entry per tick.
//!
//! The engine never sleeps or spawns anything itself. Every transition that
//! wants a future tick returns a [`TickRequest`]; whoever drives the session
//! hands that request to a scheduler and feeds the resulting wake-up back
//! into [`PlaybackEngine::tick`].
//!
//! ```text
//! Stopped --start--> Playing --cursor reaches end--> Idle
//! Playing --reset--> Stopped
//! Idle    --reset--> Stopped
//! any     --start--> Playing   (restart)
//! ```
//!
//! A tick only acts when its id is the session's pending tick and the
//! session is running. Everything else is stale and leaves state untouched,
//! which is how `reset` supersedes a timer that is already sleeping.

use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::script::Script;
use crate::session::{Phase, RevealedLogEntry, SessionState, TickId};

/// Delay between two reveals in the reference demo.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1100);

/// Source of reveal timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Request to run `tick(id)` after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRequest {
    pub id: TickId,
    pub delay: Duration,
}

/// Result of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One entry was revealed at `index`; `next` must be scheduled.
    Revealed { index: usize, next: TickRequest },
    /// The log script is exhausted. Nothing further is scheduled.
    Exhausted,
    /// The tick was superseded or the session is not running.
    Stale,
}

/// Drives one script through any number of sessions.
#[derive(Debug, Clone)]
pub struct PlaybackEngine<C: Clock = SystemClock> {
    script: Script,
    interval: Duration,
    clock: C,
}

impl PlaybackEngine<SystemClock> {
    pub fn new(script: Script, interval: Duration) -> Self {
        Self::with_clock(script, interval, SystemClock)
    }
}

impl Default for PlaybackEngine<SystemClock> {
    fn default() -> Self {
        Self::new(Script::reference(), DEFAULT_TICK_INTERVAL)
    }
}

impl<C: Clock> PlaybackEngine<C> {
    pub fn with_clock(script: Script, interval: Duration, clock: C) -> Self {
        Self {
            script,
            interval,
            clock,
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts (or restarts) playback.
    ///
    /// Seeds the transcript with the scripted chat and clears any reveal
    /// progress. The returned request has no delay so the first entry shows
    /// up immediately.
    pub fn start(&self, session: &mut SessionState) -> TickRequest {
        session.clear_playback();
        session.running = true;
        session.transcript.load_script(&self.script);
        let id = session.issue_tick();
        info!(
            chat = self.script.chat_len(),
            logs = self.script.log_len(),
            "playback started"
        );
        TickRequest {
            id,
            delay: Duration::ZERO,
        }
    }

    /// Stops playback and clears transcript and revealed logs.
    pub fn reset(&self, session: &mut SessionState) {
        let was_running = session.running;
        session.running = false;
        session.clear_playback();
        session.transcript.clear();
        info!(was_running, "playback reset");
    }

    /// Handles a scheduled wake-up.
    pub fn tick(&self, session: &mut SessionState, id: TickId) -> TickOutcome {
        if session.pending_tick != Some(id) || !session.running {
            debug!(tick = id.0, pending = ?session.pending_tick, "stale tick ignored");
            return TickOutcome::Stale;
        }
        session.pending_tick = None;

        match self.advance(session) {
            Some(index) => TickOutcome::Revealed {
                index,
                next: TickRequest {
                    id: session.issue_tick(),
                    delay: self.interval,
                },
            },
            None => {
                info!(revealed = session.cursor, "log script exhausted");
                TickOutcome::Exhausted
            }
        }
    }

    /// Reveals the entry under the cursor, if any.
    ///
    /// Returns the index of the revealed entry. Does nothing when the session
    /// is not running or the cursor is at the end of the script.
    pub fn advance(&self, session: &mut SessionState) -> Option<usize> {
        if !session.running {
            return None;
        }
        let index = session.cursor;
        let event = *self.script.log_event(index)?;

        let now = self.clock.now();
        let revealed_at = match session.revealed_logs.last() {
            Some(prev) if prev.revealed_at > now => prev.revealed_at,
            _ => now,
        };
        session.revealed_logs.push(RevealedLogEntry { event, revealed_at });
        session.cursor += 1;
        debug!(index, step = event.step, "log entry revealed");
        Some(index)
    }

    pub fn phase(&self, session: &SessionState) -> Phase {
        if !session.running {
            Phase::Stopped
        } else if session.cursor < self.script.log_len() {
            Phase::Playing
        } else {
            Phase::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;
    use crate::script::{Sender, Severity};

    /// Clock that advances by `step_secs` on every read (may be negative).
    struct StepClock {
        next: Cell<i64>,
        step_secs: i64,
    }

    impl StepClock {
        fn new(step_secs: i64) -> Self {
            Self {
                next: Cell::new(1_700_000_000),
                step_secs,
            }
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Local> {
            let secs = self.next.get();
            self.next.set(secs + self.step_secs);
            Local.timestamp_opt(secs, 0).unwrap()
        }
    }

    fn engine() -> PlaybackEngine<StepClock> {
        PlaybackEngine::with_clock(Script::reference(), DEFAULT_TICK_INTERVAL, StepClock::new(1))
    }

    /// Runs every tick the engine asks for, starting from `request`.
    fn drain(
        engine: &PlaybackEngine<StepClock>,
        session: &mut SessionState,
        mut request: TickRequest,
    ) -> usize {
        let mut reveals = 0;
        while let TickOutcome::Revealed { next, .. } = engine.tick(session, request.id) {
            reveals += 1;
            request = next;
        }
        reveals
    }

    fn assert_reset_state(session: &SessionState) {
        assert!(session.transcript().is_empty());
        assert!(session.revealed_logs().is_empty());
        assert_eq!(session.cursor(), 0);
        assert!(!session.is_running());
    }

    #[test]
    fn test_reset_is_idempotent_from_every_phase() {
        let engine = engine();

        let mut session = SessionState::new();
        engine.reset(&mut session);
        engine.reset(&mut session);
        assert_reset_state(&session);

        let request = engine.start(&mut session);
        engine.tick(&mut session, request.id);
        engine.reset(&mut session);
        engine.reset(&mut session);
        assert_reset_state(&session);

        let request = engine.start(&mut session);
        drain(&engine, &mut session, request);
        assert_eq!(engine.phase(&session), Phase::Idle);
        engine.reset(&mut session);
        assert_reset_state(&session);
        assert_eq!(engine.phase(&session), Phase::Stopped);
    }

    #[test]
    fn test_start_reseeds_transcript_deterministically() {
        let engine = engine();
        let mut session = SessionState::new();
        session.submit_user_message("before start");

        engine.start(&mut session);
        assert_eq!(session.transcript().messages(), Script::reference().chat());
        assert_eq!(session.transcript().len(), 9);

        session.submit_user_message("mid run");
        engine.start(&mut session);
        assert_eq!(session.transcript().messages(), Script::reference().chat());
    }

    #[test]
    fn test_first_tick_is_immediate_then_interval() {
        let engine = engine();
        let mut session = SessionState::new();
        let request = engine.start(&mut session);
        assert_eq!(request.delay, Duration::ZERO);

        let TickOutcome::Revealed { index, next } = engine.tick(&mut session, request.id) else {
            panic!("expected a reveal");
        };
        assert_eq!(index, 0);
        assert_eq!(next.delay, DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn test_reveal_is_monotonic_prefix() {
        let engine = engine();
        let mut session = SessionState::new();
        let mut request = engine.start(&mut session);
        let script = Script::reference();

        while let TickOutcome::Revealed { next, .. } = engine.tick(&mut session, request.id) {
            let revealed = session.revealed_logs();
            assert_eq!(revealed.len(), session.cursor());
            for (entry, scripted) in revealed.iter().zip(script.logs()) {
                assert_eq!(&entry.event, scripted);
            }
            for pair in revealed.windows(2) {
                assert!(pair[0].revealed_at <= pair[1].revealed_at);
            }
            request = next;
        }
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let engine = PlaybackEngine::with_clock(
            Script::reference(),
            DEFAULT_TICK_INTERVAL,
            StepClock::new(-5),
        );
        let mut session = SessionState::new();
        let mut request = engine.start(&mut session);
        while let TickOutcome::Revealed { next, .. } = engine.tick(&mut session, request.id) {
            request = next;
        }
        for pair in session.revealed_logs().windows(2) {
            assert!(pair[0].revealed_at <= pair[1].revealed_at);
        }
    }

    #[test]
    fn test_exhaustion_halts_growth() {
        let engine = engine();
        let mut session = SessionState::new();
        let request = engine.start(&mut session);
        assert_eq!(drain(&engine, &mut session, request), 15);
        assert_eq!(session.cursor(), 15);
        assert_eq!(session.pending_tick(), None);

        for _ in 0..5 {
            assert_eq!(engine.advance(&mut session), None);
        }
        assert_eq!(session.cursor(), 15);
        assert_eq!(session.revealed_logs().len(), 15);
        assert!(session.is_running());
        assert_eq!(engine.phase(&session), Phase::Idle);
    }

    #[test]
    fn test_final_tick_reports_exhausted() {
        let engine = engine();
        let mut session = SessionState::new();
        let mut request = engine.start(&mut session);
        for _ in 0..15 {
            match engine.tick(&mut session, request.id) {
                TickOutcome::Revealed { next, .. } => request = next,
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!(engine.tick(&mut session, request.id), TickOutcome::Exhausted);
        assert_eq!(engine.tick(&mut session, request.id), TickOutcome::Stale);
    }

    #[test]
    fn test_user_submission_is_independent_of_playback() {
        let engine = engine();
        let mut session = SessionState::new();
        let request = engine.start(&mut session);
        let TickOutcome::Revealed { next, .. } = engine.tick(&mut session, request.id) else {
            panic!("expected a reveal");
        };
        engine.tick(&mut session, next.id);

        let cursor = session.cursor();
        let revealed = session.revealed_logs().to_vec();
        let pending = session.pending_tick();
        let before = session.transcript().len();

        assert!(session.submit_user_message("What is the hospital backup status?"));

        assert_eq!(session.transcript().len(), before + 1);
        assert_eq!(session.transcript().last().unwrap().sender, Sender::User);
        assert_eq!(session.cursor(), cursor);
        assert_eq!(session.revealed_logs(), revealed.as_slice());
        assert_eq!(session.pending_tick(), pending);
    }

    #[test]
    fn test_blank_submission_is_noop() {
        let engine = engine();
        let mut session = SessionState::new();
        engine.start(&mut session);
        let before = session.transcript().clone();

        assert!(!session.submit_user_message(""));
        assert!(!session.submit_user_message("    "));
        assert_eq!(session.transcript(), &before);
    }

    #[test]
    fn test_tick_before_reset_is_stale() {
        let engine = engine();
        let mut session = SessionState::new();
        let request = engine.start(&mut session);
        engine.reset(&mut session);

        assert_eq!(engine.tick(&mut session, request.id), TickOutcome::Stale);
        assert_reset_state(&session);
    }

    #[test]
    fn test_tick_from_previous_run_is_stale_after_restart() {
        let engine = engine();
        let mut session = SessionState::new();
        let old = engine.start(&mut session);
        let new = engine.start(&mut session);

        assert_eq!(engine.tick(&mut session, old.id), TickOutcome::Stale);
        assert_eq!(session.cursor(), 0);
        assert!(matches!(
            engine.tick(&mut session, new.id),
            TickOutcome::Revealed { index: 0, .. }
        ));
    }

    #[test]
    fn test_duplicate_tick_is_stale() {
        let engine = engine();
        let mut session = SessionState::new();
        let request = engine.start(&mut session);
        assert!(matches!(
            engine.tick(&mut session, request.id),
            TickOutcome::Revealed { .. }
        ));
        assert_eq!(engine.tick(&mut session, request.id), TickOutcome::Stale);
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn test_advance_requires_running() {
        let engine = engine();
        let mut session = SessionState::new();
        assert_eq!(engine.advance(&mut session), None);
        assert!(session.revealed_logs().is_empty());
    }

    #[test]
    fn test_scenario_full_run_then_reset() {
        let engine = engine();
        let mut session = SessionState::new();
        let mut request = engine.start(&mut session);

        for _ in 0..15 {
            if let TickOutcome::Revealed { next, .. } = engine.tick(&mut session, request.id) {
                request = next;
            }
        }

        let fourth = &session.revealed_logs()[3];
        assert_eq!(fourth.event.severity, Some(Severity::High));
        assert_eq!(fourth.event.step, Script::reference().logs()[3].step);
        assert!(fourth.event.step.contains("Scenario 1"));
        assert!(fourth.event.detail.contains("Hospital"));

        engine.reset(&mut session);
        assert_reset_state(&session);
    }

    #[test]
    fn test_time_label_format() {
        let entry = RevealedLogEntry {
            event: Script::reference().logs()[0],
            revealed_at: Local.with_ymd_and_hms(2025, 3, 1, 19, 5, 7).unwrap(),
        };
        assert_eq!(entry.time_label(), "19:05:07");
    }

    #[derive(Debug, Clone)]
    enum Op {
        Start,
        Reset,
        TickPending,
        TickAny(u64),
        Advance,
        Submit(String),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            1 => Just(Op::Start),
            1 => Just(Op::Reset),
            6 => Just(Op::TickPending),
            2 => (0u64..64).prop_map(Op::TickAny),
            2 => Just(Op::Advance),
            1 => "[ a-z]{0,6}".prop_map(Op::Submit),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// The cursor stays in range and the revealed list is always a prefix
        /// of the script, whatever order operations arrive in.
        #[test]
        fn prop_cursor_bounded_and_prefix(ops in prop::collection::vec(op(), 0..80)) {
            let engine = engine();
            let script = Script::reference();
            let mut session = SessionState::new();

            for op in ops {
                match op {
                    Op::Start => { engine.start(&mut session); }
                    Op::Reset => engine.reset(&mut session),
                    Op::TickPending => {
                        if let Some(id) = session.pending_tick() {
                            engine.tick(&mut session, id);
                        }
                    }
                    Op::TickAny(raw) => { engine.tick(&mut session, TickId(raw)); }
                    Op::Advance => { engine.advance(&mut session); }
                    Op::Submit(text) => { session.submit_user_message(&text); }
                }

                prop_assert!(session.cursor() <= script.log_len());
                prop_assert_eq!(session.revealed_logs().len(), session.cursor());
                for (entry, scripted) in session.revealed_logs().iter().zip(script.logs()) {
                    prop_assert_eq!(&entry.event, scripted);
                }
                if !session.is_running() {
                    prop_assert_eq!(session.cursor(), 0);
                    prop_assert_eq!(session.pending_tick(), None);
                }
            }
        }
    }
}
