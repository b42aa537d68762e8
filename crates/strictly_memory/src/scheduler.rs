//! Deferred work: one-shot and repeating timers.
//!
//! The engine never sleeps. It asks a [`Scheduler`] to deliver a
//! [`TimerEvent`] later, and the host feeds delivered events back through
//! `FlipEngine::fire`. [`ManualScheduler`] runs on virtual time and is what
//! tests and headless hosts use; the terminal game ships a tokio-backed
//! implementation.

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, trace};

/// Pause before unmatched face-up cards turn back over.
pub const RESOLVE_DELAY: Duration = Duration::from_secs(1);

/// Pause between the final match and the win announcement.
pub const WIN_DELAY: Duration = Duration::from_secs(1);

/// Granularity of the game clock.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Work the engine defers to later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimerEvent {
    /// Turn unmatched face-up cards back over and reset the flip counter.
    ResolvePending,
    /// Publish the win summary and stop the clock.
    AnnounceWin,
    /// Advance the game clock by one second.
    ClockTick,
}

/// Identifies a scheduled timer so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wraps a raw id. Schedulers hand these out; hosts rarely need to.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Source of delayed and periodic callbacks.
pub trait Scheduler {
    /// Delivers `event` once after `delay`.
    fn schedule_once(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle;

    /// Delivers `event` every `interval`, first after one full interval.
    fn schedule_repeating(&mut self, interval: Duration, event: TimerEvent) -> TimerHandle;

    /// Stops a timer. Unknown or already finished handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    due: Duration,
    period: Option<Duration>,
    event: TimerEvent,
    seq: u64,
}

/// Deterministic scheduler driven by explicit calls to advance time.
///
/// Timers due at the same instant fire in the order they were armed.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    timers: Vec<PendingTimer>,
}

impl ManualScheduler {
    /// Creates a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Whether the given timer is still armed.
    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Moves time forward and returns every event that came due, in order.
    #[instrument(skip(self), fields(now = ?self.now))]
    pub fn advance(&mut self, by: Duration) -> Vec<TimerEvent> {
        let deadline = self.now + by;
        let mut fired = Vec::new();
        while let Some(event) = self.pop_due(deadline) {
            fired.push(event);
        }
        self.settle(deadline);
        fired
    }

    /// Fires the earliest timer due at or before `deadline`.
    ///
    /// Virtual time jumps to that timer's due instant. Repeating timers are
    /// re-armed one period later.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerEvent> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(i, _)| i)?;

        let due = self.timers[index].due;
        self.now = self.now.max(due);

        let event = self.timers[index].event;
        match self.timers[index].period {
            Some(period) => {
                let seq = self.bump_seq();
                let timer = &mut self.timers[index];
                timer.due += period;
                timer.seq = seq;
            }
            None => {
                self.timers.remove(index);
            }
        }

        trace!(?event, at = ?self.now, "Timer fired");
        Some(event)
    }

    /// Sets virtual time to `deadline` once all due timers have fired.
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    fn arm(&mut self, delay: Duration, period: Option<Duration>, event: TimerEvent) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let seq = self.bump_seq();
        self.timers.push(PendingTimer {
            handle,
            due: self.now + delay,
            period,
            event,
            seq,
        });
        debug!(?event, ?delay, ?period, handle = handle.raw(), "Timer armed");
        handle
    }

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle {
        self.arm(delay, None, event)
    }

    fn schedule_repeating(&mut self, interval: Duration, event: TimerEvent) -> TimerHandle {
        self.arm(interval, Some(interval), event)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|t| t.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_fires_after_delay() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule_once(Duration::from_millis(1000), TimerEvent::ResolvePending);

        assert!(scheduler.advance(Duration::from_millis(999)).is_empty());
        assert_eq!(
            scheduler.advance(Duration::from_millis(1)),
            vec![TimerEvent::ResolvePending]
        );
        assert!(scheduler.advance(Duration::from_secs(10)).is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_repeating_rearms() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule_repeating(TICK_INTERVAL, TimerEvent::ClockTick);

        let fired = scheduler.advance(Duration::from_millis(3500));
        assert_eq!(fired, vec![TimerEvent::ClockTick; 3]);
        assert_eq!(scheduler.now(), Duration::from_millis(3500));
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_cancel_prevents_delivery() {
        let mut scheduler = ManualScheduler::new();
        let tick = scheduler.schedule_repeating(TICK_INTERVAL, TimerEvent::ClockTick);
        assert!(scheduler.is_armed(tick));

        scheduler.cancel(tick);

        assert!(!scheduler.is_armed(tick));
        assert!(scheduler.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_ties_fire_in_arming_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule_once(Duration::from_secs(1), TimerEvent::ResolvePending);
        scheduler.schedule_once(Duration::from_secs(1), TimerEvent::AnnounceWin);

        assert_eq!(
            scheduler.advance(Duration::from_secs(1)),
            vec![TimerEvent::ResolvePending, TimerEvent::AnnounceWin]
        );
    }

    #[test]
    fn test_events_ordered_by_deadline() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule_once(Duration::from_secs(2), TimerEvent::AnnounceWin);
        scheduler.schedule_once(Duration::from_secs(1), TimerEvent::ResolvePending);

        assert_eq!(
            scheduler.advance(Duration::from_secs(2)),
            vec![TimerEvent::ResolvePending, TimerEvent::AnnounceWin]
        );
    }

    #[test]
    fn test_cancel_unknown_handle_is_ignored() {
        let mut scheduler = ManualScheduler::new();
        scheduler.cancel(TimerHandle::new(77));
        assert_eq!(scheduler.pending(), 0);
    }
}
