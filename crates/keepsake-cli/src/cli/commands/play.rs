//! Play command handler.

use anyhow::{Context, Result};
use keepsake_core::config::Config;
use tracing::info;

use super::resolve;
use crate::cli::PlaybackArgs;

pub async fn run(config: &Config, playback: &PlaybackArgs, no_haptics: bool) -> Result<()> {
    let (script, timing) = resolve(config, playback)?;
    let haptics = config.haptics && !no_haptics;
    info!(speed = timing.speed, haptics, "starting presentation");

    keepsake_tui::run_presentation(script, timing, haptics)
        .await
        .context("presentation failed")
}
