//! CLI command handlers.

pub mod config;
pub mod play;
pub mod rehearse;
pub mod script;

use anyhow::{Context, Result};
use keepsake_core::config::Config;
use keepsake_core::script::Script;
use keepsake_core::timing::Timing;

use super::PlaybackArgs;

/// Resolves the script and timing a playback command runs with.
///
/// Command-line flags win over the config file.
fn resolve(config: &Config, playback: &PlaybackArgs) -> Result<(Script, Timing)> {
    let script = config
        .load_script(playback.script.as_deref())
        .context("load script")?;
    let timing = match playback.speed {
        Some(speed) if !(speed.is_finite() && speed > 0.0) => {
            anyhow::bail!("--speed must be a positive number, got {speed}")
        }
        Some(speed) => config.timing.clone().with_speed(speed),
        None => config.timing.clone(),
    };
    Ok((script, timing))
}
