use crate::domain::model::ContactForm;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub type Task = Box<dyn FnOnce() + Send + 'static>;
pub type RepeatingTask = Box<dyn FnMut() + Send + 'static>;

/// Cancellation handle for a scheduled task.
///
/// Dropping the handle does not cancel the task; only [`TimerHandle::cancel`] does.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Cancelling a task that already fired is a no-op.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// "Run this after N ms" capability of the host event loop.
pub trait Scheduler: Send + Sync {
    fn schedule_once(&self, delay: Duration, task: Task) -> TimerHandle;

    /// First run happens one full `interval` after scheduling.
    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) -> TimerHandle;
}

impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    fn schedule_once(&self, delay: Duration, task: Task) -> TimerHandle {
        (**self).schedule_once(delay, task)
    }

    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) -> TimerHandle {
        (**self).schedule_repeating(interval, task)
    }
}

/// An element the presentation layer can mark visible or hidden.
pub trait DisplayUnit: Send {
    fn set_active(&mut self, active: bool);
}

#[async_trait]
pub trait FormSubmitter: Send + Sync {
    async fn submit(&self, form: &ContactForm) -> Result<()>;
}
