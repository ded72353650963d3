//! Notifier port - the kernel change-notification facility
//!
//! Backends (inotify, kqueue, a scripted double) hide their wire format behind
//! this trait. A backend must be able to bind an open file object, report
//! modify / delete / rename-away for it, and block without timeout until at
//! least one notification is queued.

use std::path::Path;

use crate::domain::value_objects::{ChangeKind, WatchHandle};
use crate::error::WatchrunResult;

/// One item delivered by `Notifier::wait_for_batch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Something happened to the object bound through `handle`
    Change { handle: WatchHandle, kind: ChangeKind },
    /// The backend hit a problem it could not attribute to one target
    Fault { message: String },
    /// Out-of-band request to stop waiting and shut down
    Interrupted,
}

impl Notification {
    pub fn change(handle: WatchHandle, kind: ChangeKind) -> Self {
        Notification::Change { handle, kind }
    }
}

/// Kernel-level change notification for a small fixed set of files
pub trait Notifier {
    /// Subscribe to content-modify, delete and rename-away on the object
    /// currently at `path`.
    ///
    /// Fails with `NotFound`, `PermissionDenied` or `ResourceExhausted`.
    fn register(&mut self, path: &Path) -> WatchrunResult<WatchHandle>;

    /// Drop a subscription. Unknown or already-dead handles are ignored.
    fn unregister(&mut self, handle: WatchHandle);

    /// Block until notifications are available, then return every one that is
    /// queued at that instant.
    fn wait_for_batch(&mut self) -> WatchrunResult<Vec<Notification>>;
}
