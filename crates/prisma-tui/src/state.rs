//! Application state owned by the runtime.

use std::cell::Cell;

use prisma_core::{Phase, PlaybackEngine, SessionState};
use ratatui::layout::Rect;

use crate::common::ScrollState;
use crate::features::controls::Progress;
use crate::features::input::InputState;

pub struct AppState {
    pub engine: PlaybackEngine,
    pub session: SessionState,
    pub input: InputState,
    pub chat_scroll: ScrollState,
    pub logs_scroll: ScrollState,
    pub spinner_frame: usize,
    pub should_quit: bool,
    /// Panel areas from the last render, used to route mouse scrolling.
    pub chat_area: Cell<Rect>,
    pub logs_area: Cell<Rect>,
}

impl AppState {
    pub fn new(engine: PlaybackEngine) -> Self {
        Self {
            engine,
            session: SessionState::new(),
            input: InputState::new(),
            chat_scroll: ScrollState::new(),
            logs_scroll: ScrollState::new(),
            spinner_frame: 0,
            should_quit: false,
            chat_area: Cell::new(Rect::default()),
            logs_area: Cell::new(Rect::default()),
        }
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase(&self.session)
    }

    pub fn progress(&self) -> Progress {
        Progress {
            phase: self.phase(),
            revealed: self.session.cursor(),
            total: self.engine.script().log_len(),
            messages: self.session.transcript().len(),
        }
    }
}
