//! Strictly Memory - terminal memory-matching game

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use strictly_memory_game::{tui, AppConfig, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (RUST_LOG)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?.with_overrides(cli.dimension, cli.seed, cli.log_file);

    tui::run_tui(config).await
}
