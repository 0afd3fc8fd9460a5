//! Rehearse command handler.

use std::io::{Write, stdout};

use anyhow::Result;
use keepsake_core::config::Config;
use keepsake_core::rehearsal;

use super::resolve;
use crate::cli::PlaybackArgs;

pub fn run(config: &Config, playback: &PlaybackArgs) -> Result<()> {
    let (script, timing) = resolve(config, playback)?;
    let timeline = rehearsal::rehearse(script, timing)?;

    let mut out = stdout().lock();
    for entry in &timeline {
        writeln!(out, "{entry}")?;
    }
    Ok(())
}
