//! Review slider: one active card out of a fixed, ordered set, with wraparound
//! navigation and timer-driven rotation.

use crate::core::lock_state;
use crate::domain::ports::{DisplayUnit, Scheduler, TimerHandle};
use crate::utils::error::{Result, SiteError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Exactly one item is active at any time: the one at `current`.
#[derive(Debug)]
pub struct Carousel<U: DisplayUnit> {
    items: Vec<U>,
    current: usize,
}

impl<U: DisplayUnit> Carousel<U> {
    /// Activates the first item and deactivates the rest.
    pub fn new(mut items: Vec<U>) -> Result<Self> {
        if items.is_empty() {
            tracing::warn!("refusing to build a carousel without items");
            return Err(SiteError::EmptyCarousel);
        }

        for (index, item) in items.iter_mut().enumerate() {
            item.set_active(index == 0);
        }

        Ok(Self { items, current: 0 })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[U] {
        &self.items
    }

    pub fn current(&self) -> &U {
        &self.items[self.current]
    }

    pub fn advance(&mut self) -> usize {
        let next = if self.current + 1 == self.items.len() {
            0
        } else {
            self.current + 1
        };
        self.show(next);
        next
    }

    pub fn retreat(&mut self) -> usize {
        // 明確處理從 0 往回繞到最後一張
        let prev = if self.current == 0 {
            self.items.len() - 1
        } else {
            self.current - 1
        };
        self.show(prev);
        prev
    }

    /// Out-of-range indices are rejected and leave the carousel untouched.
    pub fn go_to(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            tracing::warn!(index, len = self.items.len(), "carousel index out of range");
            return Err(SiteError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.show(index);
        Ok(())
    }

    fn show(&mut self, index: usize) {
        if index == self.current {
            return;
        }
        self.items[self.current].set_active(false);
        self.items[index].set_active(true);
        tracing::debug!(from = self.current, to = index, "carousel moved");
        self.current = index;
    }
}

/// Shared handle to a [`Carousel`], usable from UI handlers and timer callbacks alike.
#[derive(Debug)]
pub struct CarouselController<U: DisplayUnit> {
    state: Arc<Mutex<Carousel<U>>>,
}

impl<U: DisplayUnit> Clone for CarouselController<U> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<U: DisplayUnit + 'static> CarouselController<U> {
    pub fn new(items: Vec<U>) -> Result<Self> {
        Ok(Self {
            state: Arc::new(Mutex::new(Carousel::new(items)?)),
        })
    }

    pub fn advance(&self) -> usize {
        lock_state(&self.state).advance()
    }

    pub fn retreat(&self) -> usize {
        lock_state(&self.state).retreat()
    }

    pub fn go_to(&self, index: usize) -> Result<()> {
        lock_state(&self.state).go_to(index)
    }

    pub fn current_index(&self) -> usize {
        lock_state(&self.state).current_index()
    }

    pub fn item_count(&self) -> usize {
        lock_state(&self.state).item_count()
    }

    /// Runs `f` against the carousel under its lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&Carousel<U>) -> R) -> R {
        f(&lock_state(&self.state))
    }

    /// Advances every `interval` for as long as the scheduler runs.
    ///
    /// Manual `advance`/`retreat` calls do not reset this timer, so a click just
    /// before a tick moves the carousel twice in quick succession.
    pub fn start_auto_rotate<S>(&self, scheduler: &S, interval: Duration) -> TimerHandle
    where
        S: Scheduler + ?Sized,
    {
        let state = Arc::clone(&self.state);
        tracing::info!(interval_ms = interval.as_millis() as u64, "🔄 review auto-rotation started");
        scheduler.schedule_repeating(
            interval,
            Box::new(move || {
                lock_state(&state).advance();
            }),
        )
    }
}
