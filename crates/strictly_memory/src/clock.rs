//! Move counter and elapsed-time clock.

use crate::events::StatusLine;
use crate::scheduler::{Scheduler, TimerEvent, TimerHandle, TICK_INTERVAL};
use tracing::{debug, info, instrument};

/// Counts moves and seconds for one session.
///
/// The clock runs from [`GameClock::start`] until [`GameClock::stop`]; a
/// stopped clock stays stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameClock {
    total_moves: u64,
    elapsed_seconds: u64,
    tick: Option<TimerHandle>,
    stopped: bool,
}

impl GameClock {
    /// Creates a clock at zero, not running.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the one-second tick. Returns `false` if already running or stopped.
    #[instrument(skip_all, fields(running = self.is_running(), stopped = self.stopped))]
    pub fn start<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        if self.tick.is_some() || self.stopped {
            debug!("Clock start ignored");
            return false;
        }
        self.tick = Some(scheduler.schedule_repeating(TICK_INTERVAL, TimerEvent::ClockTick));
        info!("Clock started");
        true
    }

    /// Cancels the tick. Returns `false` when the clock was not running.
    #[instrument(skip_all, fields(elapsed = self.elapsed_seconds))]
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.tick.take() {
            Some(handle) => {
                scheduler.cancel(handle);
                self.stopped = true;
                info!("Clock stopped");
                true
            }
            None => false,
        }
    }

    /// Counts one second if running and returns the refreshed status line.
    pub fn tick(&mut self) -> Option<StatusLine> {
        if self.tick.is_none() {
            return None;
        }
        self.elapsed_seconds += 1;
        Some(self.status())
    }

    /// Counts one move, running or not. Returns the new total.
    pub fn record_move(&mut self) -> u64 {
        self.total_moves += 1;
        self.total_moves
    }

    /// Whether the tick is armed.
    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    /// Whether the clock has been stopped for good.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Accepted flips so far.
    pub fn total_moves(&self) -> u64 {
        self.total_moves
    }

    /// Seconds counted so far.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Current counters as a status line.
    pub fn status(&self) -> StatusLine {
        StatusLine {
            total_moves: self.total_moves,
            elapsed_seconds: self.elapsed_seconds,
        }
    }
}
