//! Chat bubbles.
//!
//! Orchestrator-side senders (Agent, System) sit on the left, human senders
//! (Operator, User) on the right. Each message is a label line, the padded
//! bubble, and a spacer.

use prisma_core::{ChatEvent, Transcript};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::common::{ScrollState, pad_to_width, sanitize_for_display, wrap_text};
use crate::theme::{Role, style};

pub const CHAT_TITLE: &str = " 💬 Orchestrator Chat ";

const EMPTY_HINT: &str = "Press F5 to start the demo.";

/// Bubbles never shrink below this unless the panel itself is narrower.
const MIN_BUBBLE_WIDTH: usize = 16;

/// Lays out the transcript as styled lines for a panel `width` columns wide.
pub fn chat_lines(transcript: &Transcript, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in transcript {
        push_bubble(&mut lines, message, width);
    }
    lines
}

fn push_bubble(lines: &mut Vec<Line<'static>>, message: &ChatEvent, width: usize) {
    if width == 0 {
        return;
    }

    let max_bubble = (width * 4 / 5).max(MIN_BUBBLE_WIDTH).min(width);
    // One column of padding on each side of the text.
    let text_width = max_bubble.saturating_sub(2).max(1);

    let text = sanitize_for_display(&message.text);
    let wrapped = wrap_text(&text, text_width);
    let content_width = wrapped.iter().map(|l| l.width()).max().unwrap_or(0);
    let bubble_width = (content_width + 2).min(width);

    let left = message.sender.is_orchestrator();
    let indent = |used: usize| {
        if left {
            String::new()
        } else {
            " ".repeat(width.saturating_sub(used))
        }
    };

    let label = message.sender.label();
    lines.push(Line::from(vec![
        Span::raw(indent(label.width())),
        Span::styled(label, style(Role::SenderLabel)),
    ]));

    let bubble = style(Role::Bubble(message.sender));
    for row in wrapped {
        let body = format!(" {} ", pad_to_width(&row, content_width));
        lines.push(Line::from(vec![
            Span::raw(indent(bubble_width)),
            Span::styled(body, bubble),
        ]));
    }

    lines.push(Line::default());
}

pub fn render_chat(transcript: &Transcript, scroll: &ScrollState, frame: &mut Frame, area: Rect) {
    let mut block = Block::bordered()
        .title(Span::styled(CHAT_TITLE, style(Role::PanelTitle)))
        .border_style(style(Role::SenderLabel));
    if !scroll.is_following() {
        block = block.title_bottom(Line::styled(" ↓ newer ", style(Role::Hint)).right_aligned());
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if transcript.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled(EMPTY_HINT, style(Role::Hint))),
            inner,
        );
        return;
    }

    let lines = chat_lines(transcript, usize::from(inner.width));
    let window = scroll.window(lines.len(), usize::from(inner.height));
    let visible: Vec<Line<'static>> = lines[window].to_vec();
    frame.render_widget(Paragraph::new(visible), inner);
}
