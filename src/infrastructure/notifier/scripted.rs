//! Scripted notifier - replays prepared batches instead of waiting on the kernel
//!
//! Changes are scripted by path and resolved to the newest handle bound for
//! that path when the batch is delivered, so a script keeps working across a
//! reopen. Once the script runs out every wait returns `Interrupted`, which
//! guarantees a loop under test terminates.

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::ports::{Notification, Notifier};
use crate::domain::value_objects::{ChangeKind, WatchHandle};
use crate::error::{WatchrunError, WatchrunResult};

/// One scripted notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedEvent {
    /// A change to whatever is currently bound at the path
    Change(PathBuf, ChangeKind),
    /// Delivered as-is, e.g. a change for a stale handle
    Raw(Notification),
}

impl ScriptedEvent {
    pub fn modify(path: impl AsRef<Path>) -> Self {
        ScriptedEvent::Change(path.as_ref().to_path_buf(), ChangeKind::Modified)
    }

    pub fn remove(path: impl AsRef<Path>) -> Self {
        ScriptedEvent::Change(path.as_ref().to_path_buf(), ChangeKind::Removed)
    }

    pub fn rename(path: impl AsRef<Path>) -> Self {
        ScriptedEvent::Change(path.as_ref().to_path_buf(), ChangeKind::Renamed)
    }

    pub fn fault(message: impl Into<String>) -> Self {
        ScriptedEvent::Raw(Notification::Fault {
            message: message.into(),
        })
    }

    pub fn interrupt() -> Self {
        ScriptedEvent::Raw(Notification::Interrupted)
    }
}

/// In-memory `Notifier` for tests
#[derive(Debug, Default)]
pub struct ScriptedNotifier {
    next_handle: u64,
    registered: BTreeMap<WatchHandle, PathBuf>,
    batches: VecDeque<Vec<ScriptedEvent>>,
    watch_limit: Option<usize>,
    waits: Arc<AtomicUsize>,
}

impl ScriptedNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse registrations beyond `limit` live watches
    pub fn with_watch_limit(mut self, limit: usize) -> Self {
        self.watch_limit = Some(limit);
        self
    }

    /// Queue a batch to be returned by a later wait
    pub fn with_batch(mut self, batch: impl IntoIterator<Item = ScriptedEvent>) -> Self {
        self.push_batch(batch);
        self
    }

    pub fn push_batch(&mut self, batch: impl IntoIterator<Item = ScriptedEvent>) {
        self.batches.push_back(batch.into_iter().collect());
    }

    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }

    /// Newest live handle bound for `path`
    pub fn handle_for(&self, path: impl AsRef<Path>) -> Option<WatchHandle> {
        let path = path.as_ref();
        self.registered
            .iter()
            .rev()
            .find(|(_, bound)| bound.as_path() == path)
            .map(|(handle, _)| *handle)
    }

    /// Shared counter of `wait_for_batch` calls
    pub fn wait_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.waits)
    }

    pub fn remaining_batches(&self) -> usize {
        self.batches.len()
    }

    fn resolve(&self, event: ScriptedEvent) -> Option<Notification> {
        match event {
            ScriptedEvent::Change(path, kind) => self
                .handle_for(&path)
                .map(|handle| Notification::change(handle, kind)),
            ScriptedEvent::Raw(notification) => Some(notification),
        }
    }
}

impl Notifier for ScriptedNotifier {
    fn register(&mut self, path: &Path) -> WatchrunResult<WatchHandle> {
        if self
            .watch_limit
            .is_some_and(|limit| self.registered.len() >= limit)
        {
            return Err(WatchrunError::ResourceExhausted {
                path: path.to_path_buf(),
                message: "watch limit reached".to_string(),
            });
        }

        self.next_handle += 1;
        let handle = WatchHandle::new(self.next_handle);
        self.registered.insert(handle, path.to_path_buf());
        Ok(handle)
    }

    fn unregister(&mut self, handle: WatchHandle) {
        self.registered.remove(&handle);
    }

    fn wait_for_batch(&mut self) -> WatchrunResult<Vec<Notification>> {
        self.waits.fetch_add(1, Ordering::SeqCst);

        let Some(batch) = self.batches.pop_front() else {
            return Ok(vec![Notification::Interrupted]);
        };
        Ok(batch
            .into_iter()
            .filter_map(|event| self.resolve(event))
            .collect())
    }
}
