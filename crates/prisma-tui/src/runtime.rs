//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the only place side effects happen. The reducer stays pure and
//! returns effects; timers fire into the inbox as `UiEvent::PlaybackTick`.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use prisma_core::{Phase, PlaybackEngine, TickScheduler, interrupt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::{self, Tui};
use crate::{render, update};

/// Render cadence while something is animating or the user is typing.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Render cadence when nothing is happening.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen runtime.
///
/// Must be created inside a tokio runtime: playback timers are spawned
/// tasks.
pub struct TuiRuntime {
    terminal: Tui,
    pub state: AppState,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    scheduler: TickScheduler<UiEvent>,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    pub fn new(engine: PlaybackEngine) -> Result<Self> {
        // Before entering the alternate screen.
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let scheduler = TickScheduler::new(inbox_tx, UiEvent::PlaybackTick);

        let now = Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(engine),
            inbox_rx,
            scheduler,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs until the user quits or Ctrl+C arrives as a signal.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            if interrupt::is_interrupted() {
                info!("interrupted, leaving TUI");
                break;
            }

            for event in self.collect_events()? {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Renders are batched to the tick cadence.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        self.scheduler.cancel();
        Ok(())
    }

    /// Collects inbox and terminal events, blocking at most until the next
    /// render tick is due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let animating = self.state.phase() == Phase::Playing;
        let typing = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if animating || typing {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::ScheduleTick(request) => {
                debug!(
                    tick = request.id.0,
                    delay_ms = request.delay.as_millis(),
                    "arming playback timer"
                );
                self.scheduler.schedule(request);
            }
            UiEffect::CancelTick => {
                self.scheduler.cancel();
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
