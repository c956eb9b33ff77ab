//! Simulated-clock scheduler
//!
//! Time only moves when `advance` is called, which makes timing behaviour
//! reproducible in tests.

use super::{Callback, Scheduler, TimerId, TimerIds};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::trace;

/// Scheduler driven by an explicit, simulated clock
#[derive(Default)]
pub struct ManualScheduler {
    clock: Mutex<Clock>,
    ids: TimerIds,
}

#[derive(Default)]
struct Clock {
    /// Simulated time since creation
    now: Duration,

    /// Due callbacks keyed by (deadline, id); ids break deadline ties in
    /// scheduling order
    queue: BTreeMap<(Duration, TimerId), Callback>,

    /// Reverse index for cancellation
    deadlines: HashMap<TimerId, Duration>,
}

impl ManualScheduler {
    /// Create a scheduler with the clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time
    pub fn now(&self) -> Duration {
        self.clock.lock().now
    }

    /// Number of timers waiting to fire
    pub fn pending_timers(&self) -> usize {
        self.clock.lock().queue.len()
    }

    /// Move the clock forward by `by`, firing every callback that falls due
    ///
    /// Callbacks fire in deadline order with `now()` set to their deadline.
    /// No lock is held while a callback runs, so it may schedule or cancel;
    /// anything it schedules inside the window fires too. A panicking
    /// callback unwinds out of this call.
    pub fn advance(&self, by: Duration) {
        let target = self.now().saturating_add(by);

        loop {
            let callback = {
                let mut clock = self.clock.lock();
                let due = match clock.queue.keys().next() {
                    Some(&(deadline, id)) if deadline <= target => (deadline, id),
                    _ => break,
                };
                clock.now = due.0;
                clock.deadlines.remove(&due.1);
                trace!(id = %due.1, now = ?due.0, "timer fired");
                clock.queue.remove(&due)
            };

            if let Some(callback) = callback {
                callback();
            }
        }

        self.clock.lock().now = target;
    }

    /// Fire callbacks that are already due without moving the clock
    pub fn run_pending(&self) {
        self.advance(Duration::ZERO);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, callback: Callback) -> TimerId {
        let id = self.ids.next();
        let mut clock = self.clock.lock();
        let deadline = clock.now.saturating_add(delay);
        clock.queue.insert((deadline, id), callback);
        clock.deadlines.insert(id, deadline);
        trace!(%id, ?deadline, "timer scheduled");
        id
    }

    fn cancel(&self, id: TimerId) {
        let mut clock = self.clock.lock();
        if let Some(deadline) = clock.deadlines.remove(&id) {
            clock.queue.remove(&(deadline, id));
            trace!(%id, "timer cancelled");
        }
    }
}
