//! Agent reasoning log panel.

mod render;

pub use render::{log_card_lines, render_logs};
