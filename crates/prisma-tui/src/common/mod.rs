//! Shared rendering helpers.

pub mod scroll;
pub mod text;

pub use scroll::ScrollState;
pub use text::{pad_to_width, sanitize_for_display, truncate_with_ellipsis, wrap_text};
