//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use keepsake_core::{config, interrupt};

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "keepsake")]
#[command(version = "0.1")]
#[command(about = "An eight-page interactive keepsake for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    playback: PlaybackArgs,
}

/// Options shared by the commands that play the presentation.
#[derive(clap::Args, Debug, Clone, Default)]
struct PlaybackArgs {
    /// Script file replacing the configured one
    #[arg(long, value_name = "PATH", global = true)]
    script: Option<PathBuf>,

    /// Playback speed; divides every delay (2.0 plays twice as fast)
    #[arg(long, value_name = "FACTOR", global = true)]
    speed: Option<f64>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Play the presentation (default)
    Play {
        /// Disable the bell and frame flash for haptic pulses
        #[arg(long = "no-haptics")]
        no_haptics: bool,
    },
    /// Run the presentation headless and print its timeline
    Rehearse,
    /// Print the built-in script as TOML
    Script,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    interrupt::init()?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli { command, playback } = cli;

    match command.unwrap_or(Commands::Play { no_haptics: false }) {
        Commands::Play { no_haptics } => {
            let _guard = logging::init()?;
            let config = config::Config::load().context("load config")?;
            commands::play::run(&config, &playback, no_haptics).await
        }
        Commands::Rehearse => {
            let _guard = logging::init()?;
            let config = config::Config::load().context("load config")?;
            commands::rehearse::run(&config, &playback)
        }
        Commands::Script => commands::script::print(),
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
