//! Fusion - a food-combination discovery game
//!
//! Headless entry point: loads a recipe set and plays it from the terminal.
//!
//! Usage: `fusion [CONFIG]`, where CONFIG is a `.toml` or `.json` game config.
//! Without one, the built-in food set is used.

mod console;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use fusion_game::{CombinationEngine, GameConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::console::{Console, ConsoleHost};

fn main() -> Result<()> {
    // Initialize logging (stderr, so it does not interleave with the game text)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => GameConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => GameConfig::builtin().context("Built-in recipe set is invalid")?,
    };

    let engine = CombinationEngine::new(config, ConsoleHost::default())
        .context("Failed to start the combination engine")?;
    info!("Starting Fusion...");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(engine);
    console.run(stdin.lock(), stdout.lock())?;

    info!("Session ended with {} discoveries", console.engine().progress());
    Ok(())
}
