//! Mock GIS banner: a row of district tiles. The incident district turns
//! red once the demo is running.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::common::pad_to_width;
use crate::theme::{Role, style};

pub const MAP_TITLE: &str = " 🌍 GIS Map (mock) ";

/// Height of the banner, borders included.
pub const MAP_HEIGHT: u16 = 5;

const DISTRICTS: [&str; 5] = [
    "District 1",
    "District 2",
    "District 3",
    "District 4",
    "District 5",
];
const INCIDENT_DISTRICT: usize = 2;
const TILE_WIDTH: usize = 14;

fn tile_row(incident_active: bool, text: impl Fn(usize) -> &'static str) -> Line<'static> {
    let mut spans = Vec::with_capacity(DISTRICTS.len() * 2);
    for i in 0..DISTRICTS.len() {
        let affected = incident_active && i == INCIDENT_DISTRICT;
        spans.push(Span::styled(
            pad_to_width(&format!(" {}", text(i)), TILE_WIDTH),
            style(Role::District { affected }),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Builds the three banner rows.
pub fn map_lines(incident_active: bool) -> Vec<Line<'static>> {
    let names = tile_row(incident_active, |i| DISTRICTS[i]);
    let status = tile_row(incident_active, |i| {
        if incident_active && i == INCIDENT_DISTRICT {
            "⚡ BLACKOUT"
        } else {
            "grid nominal"
        }
    });
    let legend = Line::from(vec![Span::styled(
        "🏥 hospitals   🚇 transit   📡 cell towers",
        style(Role::Hint),
    )]);
    vec![names, status, legend]
}

pub fn render_map(incident_active: bool, frame: &mut Frame, area: Rect) {
    let block = Block::bordered()
        .title(Span::styled(MAP_TITLE, style(Role::PanelTitle)))
        .border_style(style(Role::SenderLabel));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(map_lines(incident_active)), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_quiet_map_shows_all_districts_nominal() {
        let lines = map_lines(false);
        assert!(line_text(&lines[0]).contains("District 3"));
        assert!(!line_text(&lines[1]).contains("BLACKOUT"));
    }

    #[test]
    fn test_incident_marks_district_three() {
        let lines = map_lines(true);
        let tile = &lines[1].spans[INCIDENT_DISTRICT * 2];
        assert!(tile.content.contains("BLACKOUT"));
        assert_eq!(tile.style, style(Role::District { affected: true }));
        assert_eq!(
            lines[1].spans[0].style,
            style(Role::District { affected: false })
        );
    }
}
