use crate::domain::ports::{RepeatingTask, Scheduler, Task, TimerHandle};
use crate::utils::error::{Result, SiteError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{Instant, MissedTickBehavior};

// tokio::time::interval 不接受零週期
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Wall-clock [`Scheduler`] backed by tokio timers.
///
/// Callbacks run on the runtime's worker; with a `current_thread` runtime they
/// interleave on one thread the way browser timers do.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
    next_id: Arc<AtomicU64>,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Binds to the runtime the caller is running in.
    pub fn try_current() -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| SiteError::RuntimeUnavailable {
            message: e.to_string(),
        })?;
        Ok(Self::new(runtime))
    }

    fn next_handle(&self) -> TimerHandle {
        TimerHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_once(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = self.next_handle();
        let timer = handle.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if !timer.is_cancelled() {
                task();
            }
        });
        handle
    }

    fn schedule_repeating(&self, interval: Duration, mut task: RepeatingTask) -> TimerHandle {
        let handle = self.next_handle();
        let timer = handle.clone();
        let period = interval.max(MIN_INTERVAL);
        self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if timer.is_cancelled() {
                    tracing::debug!(timer = timer.id(), "repeating timer stopped");
                    break;
                }
                task();
            }
        });
        handle
    }
}
