//! Process-wide tracker.
//!
//! Passing a [`ScopeTracker`] by `&mut` is the primary API. Code that cannot thread one
//! through (deep call stacks, plugins) can use this shared instance instead:
//!
//! ```no_run
//! peeklog::shared::configure_verbosity(1);
//! peeklog::shared::with_shared(|log| -> Result<(), peeklog::model::ScopeError> {
//!     log.up("Loading")?;
//!     log.log("reading input")?;
//!     log.down(Some("ok"))
//! })?;
//! # Ok::<(), peeklog::model::ScopeError>(())
//! ```
//!
//! The instance is created once: either explicitly with [`init_shared`] or lazily, writing
//! to stdout with default options, on first use. A panic while the lock is held does not
//! poison it for later callers.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use crate::output::stdout_sink;
use crate::tracker::ScopeTracker;

static SHARED: OnceLock<Mutex<ScopeTracker>> = OnceLock::new();

/// Install `tracker` as the shared instance.
///
/// # Errors
///
/// Gives `tracker` back if the shared instance already exists.
pub fn init_shared(tracker: ScopeTracker) -> Result<(), ScopeTracker> {
    SHARED
        .set(Mutex::new(tracker))
        .map_err(|rejected| rejected.into_inner().unwrap_or_else(PoisonError::into_inner))
}

/// Lock the shared instance, creating a stdout tracker on first use.
///
/// Locking again while the returned guard is alive deadlocks.
pub fn tracker() -> MutexGuard<'static, ScopeTracker> {
    SHARED
        .get_or_init(|| Mutex::new(ScopeTracker::new(stdout_sink())))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Run `f` with the shared instance locked.
///
/// The lock is not reentrant. Calling [`tracker`], [`configure_verbosity`],
/// [`reset_shared`] or `with_shared` from inside `f` deadlocks; use the `&mut` handle `f`
/// receives instead.
pub fn with_shared<R>(f: impl FnOnce(&mut ScopeTracker) -> R) -> R {
    f(&mut tracker())
}

/// Set the shared instance's verbosity threshold.
pub fn configure_verbosity(verbosity: i32) {
    tracker().set_verbosity(verbosity);
}

/// Return the shared instance to its root state. Meant for tests and long-running hosts.
pub fn reset_shared() {
    tracker().reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::TryLockError;

    #[test]
    fn lock_is_held_for_the_whole_closure() {
        let blocked = with_shared(|_log| {
            SHARED
                .get()
                .map(|lock| matches!(lock.try_lock(), Err(TryLockError::WouldBlock)))
        });

        assert_eq!(blocked, Some(true));
        assert!(SHARED.get().is_some_and(|lock| lock.try_lock().is_ok()));
    }
}
