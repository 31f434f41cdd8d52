//! Full-screen PRISMA demo console.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use prisma_core::PlaybackEngine;
pub use runtime::TuiRuntime;

/// Runs the interactive demo until the user quits.
///
/// Must be called from within a tokio runtime.
pub async fn run_demo(engine: PlaybackEngine) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The demo console requires a terminal.\n\
             Use `prisma play` for non-interactive playback."
        );
    }

    let mut err = stderr();
    writeln!(err, "PRISMA emergency response demo")?;
    writeln!(
        err,
        "Script: {} chat messages, {} log entries, one every {} ms",
        engine.script().chat_len(),
        engine.script().log_len(),
        engine.interval().as_millis()
    )?;
    err.flush()?;

    let mut runtime = TuiRuntime::new(engine)?;
    let result = runtime.run();
    drop(runtime);

    writeln!(stderr(), "Goodbye!")?;
    result
}
