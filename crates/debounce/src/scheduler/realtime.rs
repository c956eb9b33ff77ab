//! Tokio-backed scheduler
//!
//! Each timer is a spawned task that sleeps and then runs its callback.
//! Live tasks are tracked by id so they can be aborted.

use super::{Callback, Scheduler, TimerId, TimerIds};
use crate::error::{DebounceError, Result};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::trace;

/// Scheduler that fires callbacks on a tokio runtime
pub struct TokioScheduler {
    /// Runtime the timer tasks are spawned on
    handle: Handle,

    /// Outstanding timers; a task removes its own entry before firing
    timers: Arc<DashMap<TimerId, JoinHandle<()>>>,

    ids: TimerIds,
}

impl TokioScheduler {
    /// Create a scheduler bound to the current runtime
    ///
    /// Fails with `DebounceError::NoRuntime` outside of a runtime context.
    pub fn new() -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| DebounceError::NoRuntime)?;
        Ok(Self::with_handle(handle))
    }

    /// Create a scheduler bound to an explicit runtime
    pub fn with_handle(handle: Handle) -> Self {
        Self {
            handle,
            timers: Arc::new(DashMap::new()),
            ids: TimerIds::default(),
        }
    }

    /// Number of timers scheduled but not yet fired or cancelled
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_after(&self, delay: Duration, callback: Callback) -> TimerId {
        let id = self.ids.next();
        let timers = Arc::clone(&self.timers);

        // The entry guard is held across the spawn so the task cannot look
        // itself up before its handle is registered.
        match self.timers.entry(id) {
            Entry::Vacant(slot) => {
                let task = self.handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    // Losing this race to `cancel` means the timer was cancelled.
                    if timers.remove(&id).is_some() {
                        trace!(%id, "timer fired");
                        callback();
                    }
                });
                slot.insert(task);
            }
            Entry::Occupied(_) => unreachable!("timer ids are never reused"),
        }

        trace!(%id, ?delay, "timer scheduled");
        id
    }

    fn cancel(&self, id: TimerId) {
        if let Some((_, task)) = self.timers.remove(&id) {
            task.abort();
            trace!(%id, "timer cancelled");
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for entry in self.timers.iter() {
            entry.value().abort();
        }
        self.timers.clear();
    }
}
