//! Deterministic virtual clock for replays and tests.

use crate::core::lock_state;
use crate::domain::ports::{RepeatingTask, Scheduler, Task, TimerHandle};
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// 避免零間隔的重複任務在同一時刻無限觸發
const MIN_INTERVAL: Duration = Duration::from_millis(1);

enum Job {
    Once(Task),
    Repeating {
        interval: Duration,
        task: RepeatingTask,
    },
}

struct Entry {
    due: Duration,
    seq: u64,
    handle: TimerHandle,
    job: Job,
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    entries: Vec<Entry>,
}

impl ClockState {
    fn push(&mut self, due: Duration, handle: TimerHandle, job: Job) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            due,
            seq,
            handle,
            job,
        });
    }

    fn next_handle(&mut self) -> TimerHandle {
        self.next_id += 1;
        TimerHandle::new(self.next_id)
    }

    /// Removes the earliest live entry due at or before `target`.
    fn pop_due(&mut self, target: Duration) -> Option<Entry> {
        self.entries.retain(|e| !e.handle.is_cancelled());
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= target)
            .min_by_key(|(_, e)| (e.due, e.seq))
            .map(|(i, _)| i)?;
        Some(self.entries.swap_remove(index))
    }
}

/// A [`Scheduler`] whose time only moves when told to.
///
/// Tasks due at the same instant run in the order they were scheduled. Tasks
/// run with the clock unlocked, so they may schedule or cancel other tasks.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Arc<Mutex<ClockState>>,
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock_state(&self.state);
        f.debug_struct("ManualScheduler")
            .field("now", &state.now)
            .field("entries", &state.entries.len())
            .finish()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        lock_state(&self.state).now
    }

    /// Number of scheduled tasks that have not been cancelled.
    pub fn pending_timers(&self) -> usize {
        lock_state(&self.state)
            .entries
            .iter()
            .filter(|e| !e.handle.is_cancelled())
            .count()
    }

    /// Moves time forward by `by`, running every task that falls due. Returns
    /// how many task runs happened.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        self.advance_to(target)
    }

    /// Moves time to `target` (never backwards).
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut fired = 0;
        loop {
            let entry = {
                let mut state = lock_state(&self.state);
                match state.pop_due(target) {
                    Some(entry) => {
                        state.now = state.now.max(entry.due);
                        entry
                    }
                    None => {
                        state.now = state.now.max(target);
                        break;
                    }
                }
            };

            fired += 1;
            match entry.job {
                Job::Once(task) => task(),
                Job::Repeating { interval, mut task } => {
                    task();
                    if !entry.handle.is_cancelled() {
                        let mut state = lock_state(&self.state);
                        state.push(
                            entry.due + interval,
                            entry.handle,
                            Job::Repeating { interval, task },
                        );
                    }
                }
            }
        }
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_once(&self, delay: Duration, task: Task) -> TimerHandle {
        let mut state = lock_state(&self.state);
        let handle = state.next_handle();
        let due = state.now + delay;
        state.push(due, handle.clone(), Job::Once(task));
        handle
    }

    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) -> TimerHandle {
        let interval = interval.max(MIN_INTERVAL);
        let mut state = lock_state(&self.state);
        let handle = state.next_handle();
        let due = state.now + interval;
        state.push(due, handle.clone(), Job::Repeating { interval, task });
        handle
    }
}
