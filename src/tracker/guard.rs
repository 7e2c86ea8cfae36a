//! RAII helpers around [`ScopeTracker`].
//!
//! - [`VerbosityGuard`] - temporary threshold, restored on every exit path
//! - [`ScopeGuard`] - `up()` now, `down()` when finished or dropped

use std::ops::{Deref, DerefMut};

use super::ScopeTracker;
use crate::model::ScopeError;

// ===== VerbosityGuard =====

/// Temporarily overrides the verbosity threshold.
///
/// Derefs to the tracker, so the override applies to everything done through the guard.
/// The previous threshold comes back when the guard is dropped, including early returns
/// via `?` and panics that unwind.
#[derive(Debug)]
pub struct VerbosityGuard<'a> {
    tracker: &'a mut ScopeTracker,
    previous: i32,
}

impl Deref for VerbosityGuard<'_> {
    type Target = ScopeTracker;

    fn deref(&self) -> &Self::Target {
        self.tracker
    }
}

impl DerefMut for VerbosityGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.tracker
    }
}

impl Drop for VerbosityGuard<'_> {
    fn drop(&mut self) {
        self.tracker.set_verbosity(self.previous);
    }
}

// ===== ScopeGuard =====

/// An open scope that closes itself.
///
/// Prefer [`finish`](Self::finish): it reports sink errors. Dropping the guard closes the
/// scope with the default exit glyph and can only report failures through `tracing`.
#[derive(Debug)]
pub struct ScopeGuard<'a> {
    tracker: &'a mut ScopeTracker,
    open: bool,
}

impl ScopeGuard<'_> {
    /// Close the scope with an exit message.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if writing the closer fails.
    pub fn finish(mut self, exit: Option<&str>) -> Result<(), ScopeError> {
        self.open = false;
        self.tracker.down(exit)
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = ScopeTracker;

    fn deref(&self) -> &Self::Target {
        self.tracker
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.tracker
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if self.open {
            if let Err(err) = self.tracker.down(None) {
                tracing::error!(%err, "failed to close scope on drop");
            }
        }
    }
}

impl ScopeTracker {
    /// Override the verbosity until the returned guard is dropped.
    pub fn with_verbosity(&mut self, verbosity: i32) -> VerbosityGuard<'_> {
        let previous = self.verbosity();
        self.set_verbosity(verbosity);
        VerbosityGuard {
            tracker: self,
            previous,
        }
    }

    /// Run `f` with an overridden verbosity, restoring it afterwards.
    pub fn scoped_verbosity<R>(&mut self, verbosity: i32, f: impl FnOnce(&mut Self) -> R) -> R {
        let mut guard = self.with_verbosity(verbosity);
        f(&mut *guard)
    }

    /// Enter a scope that is closed when the returned guard is finished or dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if writing the opener fails.
    pub fn scope(&mut self, header: &str) -> Result<ScopeGuard<'_>, ScopeError> {
        self.up(header)?;
        Ok(ScopeGuard {
            tracker: self,
            open: true,
        })
    }
}
