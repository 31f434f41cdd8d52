//! Controls row and key-hint status line.

mod render;

pub use render::{Progress, controls_line, render_controls, render_status};
