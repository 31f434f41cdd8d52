//! Input box view.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::InputState;
use crate::theme::{Role, style};

pub const PLACEHOLDER: &str = "Type a message to the Orchestrator…";

/// Height of the input box, borders included.
pub const INPUT_HEIGHT: u16 = 3;

pub fn render_input(input: &InputState, frame: &mut Frame, area: Rect) {
    let block = Block::bordered()
        .title(Span::styled(" Message ", style(Role::PanelTitle)))
        .border_style(style(Role::SenderLabel));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let (line, cursor_col) = if input.is_empty() {
        (Line::from(Span::styled(PLACEHOLDER, style(Role::Hint))), 0)
    } else {
        let (visible, col) = input.visible_window(usize::from(inner.width));
        (Line::raw(visible), col)
    };

    frame.render_widget(Paragraph::new(line), inner);

    let cursor_x = inner.x.saturating_add(u16::try_from(cursor_col).unwrap_or(u16::MAX));
    if cursor_x < inner.x + inner.width {
        frame.set_cursor_position((cursor_x, inner.y));
    }
}
