//! Strictly Memory game - terminal front end for `strictly_memory`
//!
//! Hosts the flip engine on a tokio loop, delivers real timers through
//! [`TokioScheduler`], and renders the board with ratatui.
//!
//! # Architecture
//!
//! - **Config**: TOML file plus command-line overrides
//! - **Runtime**: tokio-backed scheduler feeding timer events to the loop
//! - **TUI**: layout hit testing, keyboard cursor, status line, win banner

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod runtime;
pub mod tui;

pub use cli::Cli;
pub use config::{AppConfig, ConfigError};
pub use runtime::TokioScheduler;
