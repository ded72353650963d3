//! watchrun - run a command whenever one of a fixed set of files changes
//!
//! The list of files is read once at startup (one path per line). Each file is
//! registered with the kernel change-notification facility; bursts of changes
//! are coalesced into one command run, and files replaced via
//! delete-and-recreate or rename-over are picked up again at the same path.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{read_path_list, register, register_all, DispatchLoop, LoopExit, WatchEvent};
pub use config::Config;
pub use domain::entities::{CommandSpec, TargetState, WatchSet, WatchTarget};
pub use domain::ports::{Invocation, Invoker, Notification, Notifier};
pub use domain::value_objects::{ChangeKind, WatchHandle};
pub use error::{WatchrunError, WatchrunResult};
pub use infrastructure::{NativeNotifier, ProcessInvoker, RunMode};
