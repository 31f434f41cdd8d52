//! Runtime execution modes.
//!
//! - `headless`: scripted playback printed to stdout
//! - `tui`: full-screen interactive console (optional feature)

pub mod headless;

#[cfg(feature = "tui")]
pub use prisma_tui::run_demo;

#[cfg(not(feature = "tui"))]
pub async fn run_demo(_engine: prisma_core::PlaybackEngine) -> anyhow::Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
