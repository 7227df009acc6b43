//! One-shot commit latch

use std::sync::OnceLock;

/// Latch that accepts exactly one value per lifetime.
///
/// The first [`try_commit`](Self::try_commit) wins and every later call
/// returns `false` without touching the stored value. Safe to share across
/// tasks: the race between a timer and a resolution callback is settled by
/// the latch itself.
#[derive(Debug)]
pub struct RedirectGuard<T> {
    committed: OnceLock<T>,
}

impl<T> RedirectGuard<T> {
    pub const fn new() -> Self {
        Self { committed: OnceLock::new() }
    }

    /// Record `value` if nothing has been committed yet.
    ///
    /// Returns `true` for the single winning call.
    pub fn try_commit(&self, value: T) -> bool {
        self.committed.set(value).is_ok()
    }

    pub fn committed(&self) -> Option<&T> {
        self.committed.get()
    }

    pub fn is_committed(&self) -> bool {
        self.committed.get().is_some()
    }
}

impl<T> Default for RedirectGuard<T> {
    fn default() -> Self {
        Self::new()
    }
}
