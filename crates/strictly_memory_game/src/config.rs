//! Game configuration loaded from TOML and the command line.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_memory::{
    default_alphabet, generate, Board, CardValue, FlipEngine, MemoryResult, RandomPicker,
    Scheduler, DEFAULT_DIMENSION,
};
use tracing::{debug, info, instrument};

/// Settings for one game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Cards per row and column.
    #[serde(default = "default_dimension")]
    dimension: usize,

    /// Symbols to draw pairs from. The built-in deck when absent.
    #[serde(default)]
    alphabet: Option<Vec<String>>,

    /// Seed for a reproducible layout. Entropy when absent.
    #[serde(default)]
    seed: Option<u64>,

    /// Where trace output goes while the TUI is running.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_dimension() -> usize {
    DEFAULT_DIMENSION
}

fn default_log_file() -> PathBuf {
    PathBuf::from("strictly_memory_game.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
            alphabet: None,
            seed: None,
            log_file: default_log_file(),
        }
    }
}

impl AppConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml_str(&content)?;
        info!(dimension = config.dimension, seeded = config.seed.is_some(), "Config loaded");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides on top of file values.
    #[must_use]
    pub fn with_overrides(
        mut self,
        dimension: Option<usize>,
        seed: Option<u64>,
        log_file: Option<PathBuf>,
    ) -> Self {
        if let Some(dimension) = dimension {
            self.dimension = dimension;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(log_file) = log_file {
            self.log_file = log_file;
        }
        self
    }

    /// The configured alphabet as card values.
    pub fn alphabet_values(&self) -> Vec<CardValue> {
        match &self.alphabet {
            Some(symbols) => symbols.iter().map(|s| CardValue::new(s.as_str())).collect(),
            None => default_alphabet(),
        }
    }

    /// Generates a board from these settings.
    ///
    /// # Errors
    ///
    /// Fails when the dimension is invalid or the alphabet is too small.
    #[instrument(skip(self), fields(dimension = self.dimension, seed = ?self.seed))]
    pub fn build_board(&self) -> MemoryResult<Board> {
        let mut picker = match self.seed {
            Some(seed) => RandomPicker::seeded(seed),
            None => RandomPicker::from_entropy(),
        };
        generate(self.dimension, &self.alphabet_values(), &mut picker)
    }

    /// Generates a board and wraps it in a fresh engine.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::build_board`].
    pub fn build_engine<S: Scheduler>(&self, scheduler: S) -> MemoryResult<FlipEngine<S>> {
        Ok(FlipEngine::new(self.build_board()?, scheduler))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new config error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
