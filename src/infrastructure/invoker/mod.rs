//! Invoker Implementations
//!
//! - `ProcessInvoker` - spawns the command as a child process
//! - `RecordingInvoker` - records invocations instead of spawning, for tests

mod process;
mod recording;

pub use process::{ProcessInvoker, RunMode};
pub use recording::RecordingInvoker;
