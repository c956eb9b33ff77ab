//! Debounced callables
//!
//! A `Debouncer` wraps a function and a delay. Every call cancels the
//! previously scheduled execution and schedules a new one, so a burst of
//! calls spaced closer than the delay results in a single execution that
//! receives the arguments of the last call.
//!
//! There is no implicit receiver: anything the wrapped function needs from
//! the call site (a "context" or "self" value) travels inside the argument
//! type, e.g. `Debouncer<(Receiver, Query)>`.

use crate::scheduler::{Scheduler, TimerId};
use parking_lot::Mutex;
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tracing::{debug, trace};

/// Observable state of a debounce session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceState {
    /// No execution scheduled
    Idle,
    /// One execution scheduled and not yet fired
    Pending,
}

/// Wrap `target` so that bursts of calls collapse into one delayed call
///
/// Equivalent to `Debouncer::new`.
pub fn debounce<A, F, S>(target: F, delay: Duration, scheduler: Arc<S>) -> Debouncer<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
    S: Scheduler,
{
    Debouncer::new(target, delay, scheduler)
}

/// Rate-limited proxy for a function
///
/// Clones are handles to the same session: calling any of them supersedes
/// a call made through another. Once every handle is dropped, a pending
/// execution is cancelled.
pub struct Debouncer<A> {
    inner: Arc<Inner<A>>,
}

type Target<A> = Box<dyn Fn(A) + Send + Sync>;

struct Inner<A> {
    delay: Duration,
    target: Target<A>,
    scheduler: Arc<dyn Scheduler>,
    session: Mutex<Session<A>>,
}

struct Session<A> {
    /// At most one scheduled execution
    pending: Option<Pending<A>>,

    /// Incremented per call; lets a fired timer recognise that it has been
    /// superseded even if its cancellation arrived too late
    generation: u64,
}

struct Pending<A> {
    timer: TimerId,
    generation: u64,
    args: A,
}

impl<A> Debouncer<A>
where
    A: Send + 'static,
{
    /// Create a debouncer for `target` with a fixed `delay`
    pub fn new<F, S>(target: F, delay: Duration, scheduler: Arc<S>) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
        S: Scheduler,
    {
        Self {
            inner: Arc::new(Inner {
                delay,
                target: Box::new(target),
                scheduler,
                session: Mutex::new(Session {
                    pending: None,
                    generation: 0,
                }),
            }),
        }
    }

    /// Invoke the debounced function
    ///
    /// Cancels any pending execution and schedules `target(args)` to run
    /// once `delay` has passed without another call. Never runs the target
    /// synchronously.
    pub fn call(&self, args: A) {
        let mut session = self.inner.session.lock();

        if let Some(previous) = session.pending.take() {
            self.inner.scheduler.cancel(previous.timer);
            trace!(timer = %previous.timer, "superseded pending call");
        }

        session.generation += 1;
        let generation = session.generation;
        let weak = Arc::downgrade(&self.inner);
        let timer = self.inner.scheduler.schedule_after(
            self.inner.delay,
            Box::new(move || Inner::fire(weak, generation)),
        );

        session.pending = Some(Pending {
            timer,
            generation,
            args,
        });
        trace!(%timer, delay = ?self.inner.delay, "scheduled debounced call");
    }

    /// Drop the pending execution without running it
    ///
    /// Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        let pending = self.inner.session.lock().pending.take();
        match pending {
            Some(pending) => {
                self.inner.scheduler.cancel(pending.timer);
                debug!(timer = %pending.timer, "cancelled pending call");
                true
            }
            None => false,
        }
    }

    /// Run the pending execution now, on the calling thread
    ///
    /// Returns whether the target ran. A panic in the target unwinds into
    /// the caller.
    pub fn flush(&self) -> bool {
        let pending = self.inner.session.lock().pending.take();
        match pending {
            Some(pending) => {
                self.inner.scheduler.cancel(pending.timer);
                debug!(timer = %pending.timer, "flushing pending call");
                (self.inner.target)(pending.args);
                true
            }
            None => false,
        }
    }

    /// Whether an execution is scheduled
    pub fn is_pending(&self) -> bool {
        self.inner.session.lock().pending.is_some()
    }

    /// Current state of the session (`Idle` or `Pending`)
    pub fn state(&self) -> DebounceState {
        if self.is_pending() {
            DebounceState::Pending
        } else {
            DebounceState::Idle
        }
    }

    /// Quiet period set at construction
    pub fn delay(&self) -> Duration {
        self.inner.delay
    }

    /// Convert into a plain callable with the target's parameter list
    pub fn into_fn(self) -> impl Fn(A) + Send + Sync + 'static {
        move |args| self.call(args)
    }
}

impl<A> Inner<A> {
    fn fire(weak: Weak<Self>, generation: u64) {
        // Every handle dropped: nothing left to run.
        let Some(inner) = weak.upgrade() else {
            return;
        };

        let args = {
            let mut session = inner.session.lock();
            match &session.pending {
                Some(pending) if pending.generation == generation => {
                    session.pending.take().map(|pending| pending.args)
                }
                _ => None,
            }
        };

        match args {
            Some(args) => {
                debug!(generation, "running debounced call");
                (inner.target)(args);
            }
            None => trace!(generation, "stale timer ignored"),
        }
    }
}

impl<A> Drop for Inner<A> {
    fn drop(&mut self) {
        if let Some(pending) = self.session.get_mut().pending.take() {
            self.scheduler.cancel(pending.timer);
            trace!(timer = %pending.timer, "debouncer dropped with pending call");
        }
    }
}

impl<A> Clone for Debouncer<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.inner.delay)
            .field("pending", &self.inner.session.lock().pending.is_some())
            .finish()
    }
}
