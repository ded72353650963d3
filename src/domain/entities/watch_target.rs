//! WatchTarget entity - a path bound to the notification facility
//!
//! State machine:
//!
//! ```text
//! Active --(removed / renamed away)--> AwaitingReopen --(rebind)--> Active
//!                                                    \--(fail)----> Failed
//! ```
//!
//! `Failed` is terminal. The path never changes after creation.

use crate::domain::value_objects::WatchHandle;

/// Subscription state of a watch target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetState {
    /// Subscribed to the file object currently at the path
    Active,
    /// The object went away, the path needs binding again
    AwaitingReopen,
    /// Binding the path again failed, the target is out of the run
    Failed,
}

/// One watched path and its live subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    path: String,
    handle: Option<WatchHandle>,
    state: TargetState,
}

impl WatchTarget {
    /// Create an Active target bound through `handle`
    pub fn new(path: impl Into<String>, handle: WatchHandle) -> Self {
        Self {
            path: path.into(),
            handle: Some(handle),
            state: TargetState::Active,
        }
    }

    /// The path exactly as it was requested
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Current handle; `None` once the object is gone
    pub fn handle(&self) -> Option<WatchHandle> {
        self.handle
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TargetState::Active
    }

    pub fn is_failed(&self) -> bool {
        self.state == TargetState::Failed
    }

    /// Active -> AwaitingReopen. Returns the handle that must be released.
    pub fn detach(&mut self) -> Option<WatchHandle> {
        if self.state != TargetState::Active {
            return None;
        }
        self.state = TargetState::AwaitingReopen;
        self.handle.take()
    }

    /// AwaitingReopen -> Active, bound to the new object at the same path.
    pub fn rebind(&mut self, handle: WatchHandle) {
        debug_assert_eq!(self.state, TargetState::AwaitingReopen);
        self.handle = Some(handle);
        self.state = TargetState::Active;
    }

    /// AwaitingReopen -> Failed.
    pub fn fail(&mut self) {
        debug_assert_eq!(self.state, TargetState::AwaitingReopen);
        self.handle = None;
        self.state = TargetState::Failed;
    }
}
