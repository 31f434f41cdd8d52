//! Frame layout.
//!
//! ```text
//! ┌ GIS Map (mock) ────────────────────────┐
//! └────────────────────────────────────────┘
//!  [F5] Start  [F6] Reset  ● phase  counters
//! ┌ Orchestrator Chat ─┐┌ Agent Brain Logs ─┐
//! │                    ││                   │
//! └────────────────────┘└───────────────────┘
//! ┌ Message ───────────────────────────────┐
//! └────────────────────────────────────────┘
//!  key hints
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::features::controls::{render_controls, render_status};
use crate::features::input::{INPUT_HEIGHT, render_input};
use crate::features::{chat, logs, map};
use crate::state::AppState;

pub fn render(app: &AppState, frame: &mut Frame) {
    let [map_area, controls_area, body, input_area, status_area] = Layout::vertical([
        Constraint::Length(map::MAP_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(6),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let [chat_area, logs_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(body);
    app.chat_area.set(chat_area);
    app.logs_area.set(logs_area);

    map::render_map(app.session.is_running(), frame, map_area);
    render_controls(app.progress(), frame, controls_area);
    chat::render_chat(app.session.transcript(), &app.chat_scroll, frame, chat_area);
    logs::render_logs(
        app.session.revealed_logs(),
        app.phase(),
        app.spinner_frame,
        &app.logs_scroll,
        frame,
        logs_area,
    );
    render_input(&app.input, frame, input_area);
    render_status(frame, status_area);
}
