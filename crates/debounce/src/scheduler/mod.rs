//! Timer scheduling
//!
//! A `Scheduler` runs a callback once after a delay and can cancel it
//! before it fires. The debouncer only ever talks to this trait, so it can
//! be driven by the tokio runtime or by a simulated clock.

mod manual;
mod realtime;

pub use manual::ManualScheduler;
pub use realtime::TokioScheduler;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Deferred callback handed to a scheduler
pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Handle for one scheduled callback
///
/// Unique within the scheduler that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Raw counter value
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Monotonic `TimerId` source
#[derive(Debug, Default)]
pub(crate) struct TimerIds(AtomicU64);

impl TimerIds {
    pub(crate) fn next(&self) -> TimerId {
        TimerId(self.0.fetch_add(1, Ordering::Relaxed))
    }
}

/// Schedule/cancel capability
pub trait Scheduler: Send + Sync + 'static {
    /// Run `callback` once, no earlier than `delay` from now
    ///
    /// Implementations never run the callback before returning, even for a
    /// zero delay.
    fn schedule_after(&self, delay: Duration, callback: Callback) -> TimerId;

    /// Prevent the callback for `id` from running
    ///
    /// Unknown or already-fired ids are ignored.
    fn cancel(&self, id: TimerId);
}
