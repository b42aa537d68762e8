//! Real-time scheduler on the tokio runtime.
//!
//! Each timer is a spawned task that only sends a [`TimerEvent`] into a
//! channel. The game loop receives it and applies it to the engine it owns,
//! so game state never leaves the loop's task.

use std::collections::HashMap;
use std::time::Duration;
use strictly_memory::{Scheduler, TimerEvent, TimerHandle};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant};
use tracing::{debug, instrument};

/// [`Scheduler`] backed by tokio timers.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<TimerEvent>,
    next_id: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Creates a scheduler and the receiver its timers deliver to.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            tx,
            next_id: 0,
            tasks: HashMap::new(),
        };
        (scheduler, rx)
    }

    /// Number of timers that have not finished or been cancelled.
    pub fn active(&self) -> usize {
        self.tasks.values().filter(|task| !task.is_finished()).count()
    }

    fn track(&mut self, task: JoinHandle<()>) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        self.tasks.insert(handle, task);
        handle
    }
}

impl Scheduler for TokioScheduler {
    #[instrument(skip(self))]
    fn schedule_once(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            sleep(delay).await;
            if tx.send(event).is_err() {
                debug!(?event, "Game loop gone, timer dropped");
            }
        });
        self.track(task)
    }

    #[instrument(skip(self))]
    fn schedule_repeating(&mut self, interval: Duration, event: TimerEvent) -> TimerHandle {
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            loop {
                ticker.tick().await;
                if tx.send(event).is_err() {
                    debug!(?event, "Game loop gone, stopping repeating timer");
                    break;
                }
            }
        });
        self.track(task)
    }

    #[instrument(skip(self))]
    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
            debug!(handle = handle.raw(), "Timer cancelled");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}
