//! CLI entry and dispatch.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use prisma_core::config::Config;
use prisma_core::{PlaybackEngine, Script, interrupt, logging};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

mod commands;

#[derive(Parser)]
#[command(name = "prisma")]
#[command(version)]
#[command(about = "PRISMA scripted emergency-response demo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Delay between log reveals in the TUI, overriding the config
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Play the demo without a TUI, printing events as they happen
    Play {
        /// Delay between log reveals, overriding the config
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,

        /// Submit a message to the Orchestrator after the demo starts (repeatable)
        #[arg(long, value_name = "TEXT")]
        say: Vec<String>,

        /// Submit the --say messages after N log entries are revealed
        #[arg(long, value_name = "N", default_value_t = 0)]
        say_after: usize,
    },

    /// Print the scripted chat and log sequences
    Script {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

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
    /// Generate a fresh config from Rust defaults
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    interrupt::init()?;

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        interval_ms,
    } = cli;

    // default to the TUI
    let Some(command) = command else {
        let (engine, _log_guard) = prepare(interval_ms)?;
        return commands::demo::run(engine).await;
    };

    match command {
        Commands::Play {
            interval_ms: play_interval_ms,
            json,
            say,
            say_after,
        } => {
            let (engine, _log_guard) = prepare(play_interval_ms.or(interval_ms))?;
            commands::play::run(engine, json, say, say_after).await
        }
        Commands::Script { json } => commands::script::run(&Script::reference(), json),
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
    }
}

/// Loads config, installs file logging, and builds the engine.
///
/// Keep the returned guard alive until playback ends.
fn prepare(interval_ms: Option<u64>) -> Result<(PlaybackEngine, WorkerGuard)> {
    let config = Config::load().context("load config")?;
    let guard = logging::init(&config.log).context("init logging")?;

    let interval = interval_ms.map_or_else(|| config.tick_interval(), Duration::from_millis);
    info!(
        interval_ms = interval.as_millis(),
        overridden = interval_ms.is_some(),
        "configuration loaded"
    );

    Ok((PlaybackEngine::new(Script::reference(), interval), guard))
}
