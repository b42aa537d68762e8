//! Strictly Memory - pure memory-matching game logic
//!
//! A grid of face-down cards, flipped two at a time. Matching pairs stay up,
//! mismatches turn back over after a pause, and clearing the board ends the
//! session with a move count and elapsed time.
//!
//! # Architecture
//!
//! - **Picker**: seeded shuffle and sample-without-replacement
//! - **Generator**: validated boards of shuffled pairs
//! - **Clock**: move counter and one-second tick
//! - **Scheduler**: deferred work as [`TimerEvent`]s, with a virtual-time
//!   [`ManualScheduler`]
//! - **Engine**: the flip/match/reset state machine ([`FlipEngine`])
//! - **Dispatch**: maps host interactions onto the engine
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use strictly_memory::{
//!     default_alphabet, generate, FlipEngine, ManualScheduler, RandomPicker,
//! };
//!
//! let board = generate(4, &default_alphabet(), &mut RandomPicker::seeded(7))?;
//! let mut game = FlipEngine::new(board, ManualScheduler::new());
//!
//! game.start();
//! game.advance(Duration::from_secs(3));
//! assert_eq!(game.status().elapsed_seconds, 3);
//! # Ok::<(), strictly_memory::MemoryError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod clock;
mod dispatch;
mod engine;
mod error;
mod events;
mod generator;
mod picker;
mod scheduler;
mod session;

pub use board::{Board, Card, CardId, CardState, CardValue};
pub use clock::GameClock;
pub use dispatch::{DirectResolver, Dispatch, InputDispatcher, Interaction, TargetResolver};
pub use engine::{FlipEngine, FlipOutcome};
pub use error::{MemoryError, MemoryErrorKind, MemoryResult};
pub use events::{CardView, GameEvent, StatusLine, WinSummary};
pub use generator::{default_alphabet, generate, DEFAULT_ALPHABET, DEFAULT_DIMENSION};
pub use picker::RandomPicker;
pub use scheduler::{
    ManualScheduler, Scheduler, TimerEvent, TimerHandle, RESOLVE_DELAY, TICK_INTERVAL, WIN_DELAY,
};
pub use session::{GameSession, WinProgress};
