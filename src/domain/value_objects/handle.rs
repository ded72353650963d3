//! Opaque identifier for one kernel subscription.

use std::fmt;

/// Handle returned by a `Notifier` when a path is bound.
///
/// A handle names one file object, not a path: when the object behind a path
/// is replaced, re-binding the path yields a new handle and notifications
/// still carrying the old one are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WatchHandle(u64);

impl WatchHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WatchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
