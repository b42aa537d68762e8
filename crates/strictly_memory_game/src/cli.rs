//! Command-line interface for strictly_memory_game.

use clap::Parser;
use std::path::PathBuf;

/// Strictly Memory - flip cards, find pairs, beat the clock
#[derive(Parser, Debug)]
#[command(name = "strictly_memory_game")]
#[command(about = "Memory-matching card game for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional; defaults apply if missing)
    #[arg(short, long, default_value = "strictly_memory.toml")]
    pub config: PathBuf,

    /// Cards per row and column (positive, even); overrides the config file
    #[arg(short, long)]
    pub dimension: Option<usize>,

    /// Seed for a reproducible board; overrides the config file
    #[arg(long)]
    pub seed: Option<u64>,

    /// File receiving trace output while the TUI owns the terminal
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["strictly_memory_game"]);
        assert_eq!(cli.config, PathBuf::from("strictly_memory.toml"));
        assert_eq!(cli.dimension, None);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["strictly_memory_game", "-d", "2", "--seed", "9"]);
        assert_eq!(cli.dimension, Some(2));
        assert_eq!(cli.seed, Some(9));
    }
}
