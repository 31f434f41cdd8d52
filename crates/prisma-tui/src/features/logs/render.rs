//! Log cards: step, optional severity badge, and reveal time on the first
//! line, then the indented detail text.

use prisma_core::{Phase, RevealedLogEntry};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::{ScrollState, truncate_with_ellipsis, wrap_text};
use crate::theme::{Role, style};

pub const LOGS_TITLE: &str = " 🧠 Agent Brain & A2A Logs ";

const DETAIL_INDENT: &str = "  ";
const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Lays out one revealed entry as a card `width` columns wide.
pub fn log_card_lines(entry: &RevealedLogEntry, width: usize) -> Vec<Line<'static>> {
    let time = entry.time_label();
    let badge = entry
        .event
        .severity
        .map(|severity| (format!(" {} ", severity.label()), severity));

    // Header: step, badge, right-aligned time.
    let reserved = time.width() + 1 + badge.as_ref().map_or(0, |(b, _)| b.width() + 1);
    let step = truncate_with_ellipsis(entry.event.step, width.saturating_sub(reserved).max(1));
    let gap = width.saturating_sub(step.width() + reserved) + 1;

    let mut header = vec![Span::styled(step, style(Role::LogStep))];
    if let Some((label, severity)) = badge {
        header.push(Span::raw(" "));
        header.push(Span::styled(label, style(Role::Badge(severity))));
    }
    header.push(Span::raw(" ".repeat(gap)));
    header.push(Span::styled(time, style(Role::Timestamp)));

    let mut lines = vec![Line::from(header)];
    let detail_width = width.saturating_sub(DETAIL_INDENT.len()).max(1);
    for row in wrap_text(entry.event.detail, detail_width) {
        lines.push(Line::from(vec![
            Span::raw(DETAIL_INDENT),
            Span::styled(row, style(Role::LogDetail)),
        ]));
    }
    lines.push(Line::default());
    lines
}

pub fn render_logs(
    entries: &[RevealedLogEntry],
    phase: Phase,
    spinner_frame: usize,
    scroll: &ScrollState,
    frame: &mut Frame,
    area: Rect,
) {
    let mut block = Block::bordered()
        .title(Span::styled(LOGS_TITLE, style(Role::PanelTitle)))
        .border_style(style(Role::SenderLabel));
    if !scroll.is_following() {
        block = block.title_bottom(Line::styled(" ↓ newer ", style(Role::Hint)).right_aligned());
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = usize::from(inner.width);
    let mut lines: Vec<Line<'static>> = entries
        .iter()
        .flat_map(|entry| log_card_lines(entry, width))
        .collect();

    match phase {
        Phase::Playing => {
            let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
            lines.push(Line::styled(format!("{spinner} thinking…"), style(Role::Hint)));
        }
        Phase::Stopped if entries.is_empty() => {
            lines.push(Line::styled("Waiting for an incident…", style(Role::Hint)));
        }
        Phase::Stopped | Phase::Idle => {}
    }

    let window = scroll.window(lines.len(), usize::from(inner.height));
    let visible: Vec<Line<'static>> = lines[window].to_vec();
    frame.render_widget(Paragraph::new(visible), inner);
}
