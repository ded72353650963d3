//! Notifier Implementations
//!
//! - `NativeNotifier` - inotify / kqueue through the `notify` crate
//! - `ScriptedNotifier` - replays scripted batches, for tests

mod native;
mod scripted;

pub use native::{Interrupter, NativeNotifier};
pub use scripted::{ScriptedEvent, ScriptedNotifier};
