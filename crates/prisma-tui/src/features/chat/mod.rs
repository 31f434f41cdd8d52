//! Orchestrator chat panel.

mod render;

pub use render::{chat_lines, render_chat};
