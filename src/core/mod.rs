pub mod carousel;
pub mod contact;
pub mod debounce;
pub mod lightbox;
pub mod navigation;
pub mod reveal;
pub mod script;
pub mod scroll;
pub mod session;

pub use crate::domain::model::{Alert, AlertKind, ContactForm, ReviewCard};
pub use crate::domain::ports::{DisplayUnit, FormSubmitter, Scheduler, TimerHandle};
pub use crate::utils::error::Result;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Handlers never leave state half-updated, so a poisoned lock is still usable.
pub(crate) fn lock_state<T: ?Sized>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
