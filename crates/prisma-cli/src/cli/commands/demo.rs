//! Interactive demo handler.

use anyhow::Result;
use prisma_core::PlaybackEngine;

use crate::modes;

pub async fn run(engine: PlaybackEngine) -> Result<()> {
    modes::run_demo(engine).await
}
