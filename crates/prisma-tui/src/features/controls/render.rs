use prisma_core::Phase;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme::{Role, style};

/// Playback counters shown next to the buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub phase: Phase,
    pub revealed: usize,
    pub total: usize,
    pub messages: usize,
}

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, style(Role::Key))
}

pub fn controls_line(progress: Progress) -> Line<'static> {
    Line::from(vec![
        Span::raw(" "),
        key("[F5]"),
        Span::raw(" ▶ Start Demo   "),
        key("[F6]"),
        Span::raw(" ⟲ Reset   "),
        Span::styled(
            format!("● {}", progress.phase.label()),
            style(Role::Phase(progress.phase)),
        ),
        Span::styled(
            format!(
                "   logs {}/{}   messages {}",
                progress.revealed, progress.total, progress.messages
            ),
            style(Role::Timestamp),
        ),
    ])
}

pub fn render_controls(progress: Progress, frame: &mut Frame, area: Rect) {
    frame.render_widget(Paragraph::new(controls_line(progress)), area);
}

pub fn render_status(frame: &mut Frame, area: Rect) {
    let hint = style(Role::Hint);
    let line = Line::from(vec![
        Span::raw(" "),
        key("Enter"),
        Span::styled(" send  ", hint),
        key("PgUp/PgDn"),
        Span::styled(" chat  ", hint),
        key("Ctrl+↑/↓"),
        Span::styled(" logs  ", hint),
        key("Esc"),
        Span::styled(" quit", hint),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
