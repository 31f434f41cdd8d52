//! GIS map banner.

mod render;

pub use render::{MAP_HEIGHT, render_map};
