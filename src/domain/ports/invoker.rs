//! Invoker port - runs the command for a dispatch cycle

use crate::domain::entities::CommandSpec;
use crate::error::WatchrunResult;

/// Result of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    /// The command ran to completion (`code` is `None` when killed by a signal)
    Exited { code: Option<i32> },
    /// The command was started and keeps running in the background
    Running { pid: u32 },
}

/// Runs a `CommandSpec`
pub trait Invoker {
    /// Run the command once. Fails with `SpawnFailed` if it cannot be executed.
    fn invoke(&mut self, command: &CommandSpec) -> WatchrunResult<Invocation>;

    /// Stop anything still running. Called once when the loop shuts down.
    fn shutdown(&mut self) -> WatchrunResult<()> {
        Ok(())
    }
}
