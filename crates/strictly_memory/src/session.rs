//! Per-game session state.

use crate::clock::GameClock;
use crate::events::{StatusLine, WinSummary};
use serde::Serialize;

/// How far the session is from a finished board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum WinProgress {
    /// Unmatched cards remain.
    Playing,
    /// Every card is matched; the announcement is scheduled.
    Pending,
    /// The win was announced. Terminal.
    Won(WinSummary),
}

/// Started flag, transient flip counter, clock and win progress.
///
/// The session watches the board but does not own it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    started: bool,
    flipped_count: u32,
    clock: GameClock,
    progress: WinProgress,
}

impl GameSession {
    /// Creates a session that has not started.
    pub fn new() -> Self {
        Self {
            started: false,
            flipped_count: 0,
            clock: GameClock::new(),
            progress: WinProgress::Playing,
        }
    }

    /// Whether the first flip or the start control has started the game.
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Flips accepted since the last resolution. Can exceed two.
    pub fn flipped_count(&self) -> u32 {
        self.flipped_count
    }

    /// The move counter and clock.
    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    /// Accepted flips so far.
    pub fn total_moves(&self) -> u64 {
        self.clock.total_moves()
    }

    /// Seconds on the clock.
    pub fn elapsed_seconds(&self) -> u64 {
        self.clock.elapsed_seconds()
    }

    /// Whether the clock is ticking.
    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Current win progress.
    pub fn progress(&self) -> WinProgress {
        self.progress
    }

    /// The announced result, once won.
    pub fn summary(&self) -> Option<WinSummary> {
        match self.progress {
            WinProgress::Won(summary) => Some(summary),
            WinProgress::Playing | WinProgress::Pending => None,
        }
    }

    /// Whether the win has been announced.
    pub fn is_won(&self) -> bool {
        matches!(self.progress, WinProgress::Won(_))
    }

    /// Counters as a status line.
    pub fn status(&self) -> StatusLine {
        self.clock.status()
    }

    pub(crate) fn mark_started(&mut self) -> bool {
        let was_started = self.started;
        self.started = true;
        !was_started
    }

    pub(crate) fn bump_flipped(&mut self) -> u32 {
        self.flipped_count += 1;
        self.flipped_count
    }

    pub(crate) fn reset_flipped(&mut self) {
        self.flipped_count = 0;
    }

    pub(crate) fn clock_mut(&mut self) -> &mut GameClock {
        &mut self.clock
    }

    pub(crate) fn set_progress(&mut self, progress: WinProgress) {
        self.progress = progress;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
