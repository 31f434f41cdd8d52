//! Headless playback handler.

use anyhow::{Context, Result};
use prisma_core::PlaybackEngine;

use crate::modes;
use crate::modes::headless::{OutputFormat, PlayOptions};

pub async fn run(
    engine: PlaybackEngine,
    json: bool,
    say: Vec<String>,
    say_after: usize,
) -> Result<()> {
    let options = PlayOptions {
        format: if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        },
        messages: say,
        say_after,
    };

    modes::headless::run_play(&engine, &options)
        .await
        .context("headless playback")
}
