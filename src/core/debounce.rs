//! Coalesces bursts of calls into a single deferred run.

use crate::core::lock_state;
use crate::domain::ports::{Scheduler, TimerHandle};
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct Pending {
    generation: u64,
    timer: Option<TimerHandle>,
}

/// Wraps an action so that it runs once, with the last call's arguments,
/// after `delay` has passed without another call.
///
/// Clones share the same pending slot, so they count as the same wrapped action.
pub struct Debouncer<A> {
    action: Arc<dyn Fn(A) + Send + Sync>,
    delay: Duration,
    scheduler: Arc<dyn Scheduler>,
    pending: Arc<Mutex<Pending>>,
}

impl<A> Clone for Debouncer<A> {
    fn clone(&self) -> Self {
        Self {
            action: Arc::clone(&self.action),
            delay: self.delay,
            scheduler: Arc::clone(&self.scheduler),
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new<F>(scheduler: Arc<dyn Scheduler>, delay: Duration, action: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            action: Arc::new(action),
            delay,
            scheduler,
            pending: Arc::new(Mutex::new(Pending::default())),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any not-yet-fired run with one carrying `args`.
    pub fn call(&self, args: A) {
        let mut pending = lock_state(&self.pending);
        if let Some(previous) = pending.timer.take() {
            previous.cancel();
        }
        pending.generation += 1;
        let generation = pending.generation;

        let action = Arc::clone(&self.action);
        let slot = Arc::clone(&self.pending);
        let timer = self.scheduler.schedule_once(
            self.delay,
            Box::new(move || {
                {
                    let mut pending = lock_state(&slot);
                    if pending.generation == generation {
                        pending.timer = None;
                    }
                }
                action(args);
            }),
        );
        pending.timer = Some(timer);
    }

    /// Drops the pending run, if any.
    pub fn cancel(&self) {
        if let Some(timer) = lock_state(&self.pending).timer.take() {
            timer.cancel();
        }
    }
}

impl<A> Debouncer<A> {
    pub fn is_pending(&self) -> bool {
        lock_state(&self.pending).timer.is_some()
    }
}
