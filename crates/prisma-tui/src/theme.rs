//! Color palette and semantic styles.
//!
//! Renderers ask for a [`Role`] and get a terminal style back, so the
//! palette lives in one place.

use prisma_core::{Phase, Sender, Severity};
use ratatui::style::{Color, Modifier, Style};

const INK: Color = Color::Rgb(0x11, 0x18, 0x27);
const MUTED: Color = Color::Rgb(0x6B, 0x72, 0x80);

/// Semantic style identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Chat bubble body for a sender.
    Bubble(Sender),
    /// Small label above a chat bubble.
    SenderLabel,
    /// Severity badge on a log card.
    Badge(Severity),
    /// Log card step name.
    LogStep,
    /// Log card detail text.
    LogDetail,
    /// Reveal time on a log card.
    Timestamp,
    /// Panel borders and titles.
    PanelTitle,
    /// Placeholder and hint text.
    Hint,
    /// Key names in the controls and status rows.
    Key,
    /// Phase indicator.
    Phase(Phase),
    /// District tile on the map banner.
    District { affected: bool },
}

pub fn style(role: Role) -> Style {
    match role {
        Role::Bubble(sender) => Style::new().fg(INK).bg(bubble_color(sender)),
        Role::SenderLabel => Style::new().fg(MUTED),
        Role::Badge(severity) => {
            let (bg, fg) = badge_colors(severity);
            Style::new().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
        }
        Role::LogStep => Style::new().add_modifier(Modifier::BOLD),
        Role::LogDetail => Style::new().fg(Color::Gray),
        Role::Timestamp => Style::new().fg(MUTED),
        Role::PanelTitle => Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        Role::Hint => Style::new().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        Role::Key => Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Role::Phase(Phase::Stopped) => Style::new().fg(Color::DarkGray),
        Role::Phase(Phase::Playing) => Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
        Role::Phase(Phase::Idle) => Style::new().fg(Color::Blue),
        Role::District { affected: true } => Style::new()
            .fg(Color::White)
            .bg(Color::Rgb(0xDC, 0x26, 0x26))
            .add_modifier(Modifier::BOLD),
        Role::District { affected: false } => {
            Style::new().fg(INK).bg(Color::Rgb(0xDC, 0xFC, 0xE7))
        }
    }
}

fn bubble_color(sender: Sender) -> Color {
    match sender {
        Sender::Agent => Color::Rgb(0xD1, 0xFA, 0xE5),
        Sender::System => Color::Rgb(0xFE, 0xF3, 0xC7),
        Sender::Operator => Color::Rgb(0xDB, 0xEA, 0xFE),
        Sender::User => Color::Rgb(0xE5, 0xE7, 0xEB),
    }
}

/// Returns (background, foreground) for a severity badge.
fn badge_colors(severity: Severity) -> (Color, Color) {
    match severity {
        Severity::High => (Color::Rgb(0xFE, 0xE2, 0xE2), Color::Rgb(0xDC, 0x26, 0x26)),
        Severity::Medium => (Color::Rgb(0xFF, 0xED, 0xD5), Color::Rgb(0xEA, 0x58, 0x0C)),
        Severity::Low => (Color::Rgb(0xDC, 0xFC, 0xE7), Color::Rgb(0x16, 0xA3, 0x4A)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_sender_gets_its_own_bubble() {
        let senders = [Sender::Agent, Sender::System, Sender::Operator, Sender::User];
        for (i, a) in senders.iter().enumerate() {
            for b in &senders[i + 1..] {
                assert_ne!(style(Role::Bubble(*a)).bg, style(Role::Bubble(*b)).bg);
            }
        }
    }

    #[test]
    fn test_high_badge_is_red() {
        let s = style(Role::Badge(Severity::High));
        assert_eq!(s.fg, Some(Color::Rgb(0xDC, 0x26, 0x26)));
        assert_eq!(s.bg, Some(Color::Rgb(0xFE, 0xE2, 0xE2)));
    }
}
