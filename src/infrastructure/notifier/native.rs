//! Native notifier backed by `notify`
//!
//! Each target is watched non-recursively on the file itself, so the
//! subscription follows the file object: once it is deleted or renamed away
//! nothing more is reported for the path until it is registered again.
//!
//! `notify` runs its callback on an internal thread. Events are bridged to the
//! dispatch loop through an mpsc channel; the same channel carries interrupt
//! requests so a termination signal wakes a blocked wait.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::domain::ports::{Notification, Notifier};
use crate::domain::value_objects::{ChangeKind, WatchHandle};
use crate::error::{WatchrunError, WatchrunResult};

enum BackendMessage {
    Event(Event),
    Fault(String),
    Interrupt,
}

/// Wakes a blocked `NativeNotifier::wait_for_batch` with `Notification::Interrupted`.
///
/// Cheap to clone and safe to move into a signal handler.
#[derive(Clone)]
pub struct Interrupter {
    tx: Sender<BackendMessage>,
}

impl Interrupter {
    pub fn interrupt(&self) {
        // The receiver only goes away together with the loop
        let _ = self.tx.send(BackendMessage::Interrupt);
    }
}

/// Kernel notifier for a fixed set of files
pub struct NativeNotifier {
    watcher: RecommendedWatcher,
    tx: Sender<BackendMessage>,
    rx: Receiver<BackendMessage>,
    next_handle: u64,
    paths: HashMap<WatchHandle, PathBuf>,
    // Distinct spellings of one file share a kernel watch
    handles: HashMap<PathBuf, Vec<WatchHandle>>,
}

impl NativeNotifier {
    pub fn new() -> WatchrunResult<Self> {
        let (tx, rx) = channel();
        let events = tx.clone();

        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let message = match res {
                    Ok(event) => BackendMessage::Event(event),
                    Err(e) => BackendMessage::Fault(e.to_string()),
                };
                let _ = events.send(message);
            },
            Config::default(),
        )
        .map_err(|e| WatchrunError::Io(io::Error::other(e.to_string())))?;

        Ok(Self {
            watcher,
            tx,
            rx,
            next_handle: 1,
            paths: HashMap::new(),
            handles: HashMap::new(),
        })
    }

    pub fn interrupter(&self) -> Interrupter {
        Interrupter {
            tx: self.tx.clone(),
        }
    }

    /// Number of live subscriptions
    pub fn watch_count(&self) -> usize {
        self.paths.len()
    }

    fn translate(&self, message: BackendMessage) -> Vec<Notification> {
        match message {
            BackendMessage::Interrupt => vec![Notification::Interrupted],
            BackendMessage::Fault(message) => vec![Notification::Fault { message }],
            BackendMessage::Event(event) => {
                if event.need_rescan() {
                    return vec![Notification::Fault {
                        message: "kernel event queue overflowed, changes may have been missed"
                            .to_string(),
                    }];
                }
                let Some(kind) = classify(&event.kind) else {
                    return Vec::new();
                };
                event
                    .paths
                    .iter()
                    .filter_map(|path| self.handles.get(path))
                    .flatten()
                    .map(|&handle| Notification::change(handle, kind))
                    .collect()
            }
        }
    }
}

impl Notifier for NativeNotifier {
    fn register(&mut self, path: &Path) -> WatchrunResult<WatchHandle> {
        let absolute = absolute_path(path)?;
        self.watcher
            .watch(&absolute, RecursiveMode::NonRecursive)
            .map_err(|e| map_watch_error(path, e))?;

        let handle = WatchHandle::new(self.next_handle);
        self.next_handle += 1;

        self.handles.entry(absolute.clone()).or_default().push(handle);
        self.paths.insert(handle, absolute);
        Ok(handle)
    }

    fn unregister(&mut self, handle: WatchHandle) {
        let Some(path) = self.paths.remove(&handle) else {
            return;
        };
        if let Some(siblings) = self.handles.get_mut(&path) {
            siblings.retain(|&h| h != handle);
            if !siblings.is_empty() {
                return;
            }
            self.handles.remove(&path);
        }
        // The kernel drops the watch of a deleted object by itself, so
        // WatchNotFound is expected here.
        let _ = self.watcher.unwatch(&path);
    }

    fn wait_for_batch(&mut self) -> WatchrunResult<Vec<Notification>> {
        let first = self.rx.recv().map_err(|_| WatchrunError::NotifierClosed)?;
        let messages: Vec<BackendMessage> = std::iter::once(first).chain(self.rx.try_iter()).collect();

        Ok(messages
            .into_iter()
            .flat_map(|message| self.translate(message))
            .collect())
    }
}

/// Map a raw `notify` event kind onto the changes the loop subscribes to.
///
/// Metadata-only changes (including the link-count drop that precedes a
/// delete), access, and create events are not subscribed.
pub(crate) fn classify(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Renamed),
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(ChangeKind::Modified),
        EventKind::Remove(_) => Some(ChangeKind::Removed),
        _ => None,
    }
}

/// `notify` reports events under the absolute form of the watched path.
fn absolute_path(path: &Path) -> WatchrunResult<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn map_watch_error(path: &Path, err: notify::Error) -> WatchrunError {
    let message = err.to_string();
    let path = path.to_path_buf();
    match err.kind {
        notify::ErrorKind::MaxFilesWatch => WatchrunError::ResourceExhausted { path, message },
        notify::ErrorKind::PathNotFound => WatchrunError::NotFound {
            path,
            source: io::Error::new(io::ErrorKind::NotFound, message),
        },
        notify::ErrorKind::Io(source) => WatchrunError::from_open(path, source),
        _ => WatchrunError::Watch { path, message },
    }
}
