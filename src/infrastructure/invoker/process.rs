//! Child process invoker
//!
//! The child inherits stdin, stdout and stderr so interactive output stays
//! visible. In blocking mode the loop waits for the child; in restart mode
//! the previous child is terminated and reaped before the next one starts, so
//! at most one child is alive at any time.

use std::io;
use std::process::{Child, Command};

use crate::domain::entities::CommandSpec;
use crate::domain::ports::{Invocation, Invoker};
use crate::error::{WatchrunError, WatchrunResult};

/// How the command is run on each dispatch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Wait for the command to finish before watching again
    #[default]
    Blocking,
    /// Start the command in the background, terminating the previous run
    Restart,
}

#[derive(Debug, Default)]
pub struct ProcessInvoker {
    mode: RunMode,
    child: Option<Child>,
}

impl ProcessInvoker {
    pub fn new(mode: RunMode) -> Self {
        Self { mode, child: None }
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Pid of the child started by the last restart-mode invocation, if alive
    pub fn running_pid(&mut self) -> Option<u32> {
        let child = self.child.as_mut()?;
        match child.try_wait() {
            Ok(None) => Some(child.id()),
            _ => None,
        }
    }

    fn terminate(&mut self) -> io::Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };
        if child.try_wait()?.is_none() {
            child.kill()?;
        }
        child.wait()?;
        Ok(())
    }
}

impl Invoker for ProcessInvoker {
    fn invoke(&mut self, command: &CommandSpec) -> WatchrunResult<Invocation> {
        match self.mode {
            RunMode::Blocking => {
                let status = build(command).status().map_err(|source| spawn_failed(command, source))?;
                Ok(Invocation::Exited {
                    code: status.code(),
                })
            }
            RunMode::Restart => {
                self.terminate()?;
                let child = build(command).spawn().map_err(|source| spawn_failed(command, source))?;
                let pid = child.id();
                self.child = Some(child);
                Ok(Invocation::Running { pid })
            }
        }
    }

    fn shutdown(&mut self) -> WatchrunResult<()> {
        self.terminate()?;
        Ok(())
    }
}

impl Drop for ProcessInvoker {
    fn drop(&mut self) {
        let _ = self.terminate();
    }
}

fn build(command: &CommandSpec) -> Command {
    let mut cmd = Command::new(command.program());
    cmd.args(command.args());
    cmd
}

fn spawn_failed(command: &CommandSpec, source: io::Error) -> WatchrunError {
    WatchrunError::SpawnFailed {
        program: command.program().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_missing_program_is_spawn_failed() {
        let mut invoker = ProcessInvoker::new(RunMode::Blocking);
        let command = CommandSpec::new("watchrun-definitely-not-a-program", Vec::<String>::new());

        let err = invoker.invoke(&command).unwrap_err();
        assert!(matches!(err, WatchrunError::SpawnFailed { .. }));
        assert!(err.to_string().contains("watchrun-definitely-not-a-program"));
    }

    #[cfg(unix)]
    #[test]
    fn test_blocking_reports_exit_code() {
        let mut invoker = ProcessInvoker::new(RunMode::Blocking);

        let ok = invoker.invoke(&CommandSpec::new("true", Vec::<String>::new())).unwrap();
        assert_eq!(ok, Invocation::Exited { code: Some(0) });

        let failed = invoker
            .invoke(&CommandSpec::new("sh", ["-c", "exit 3"]))
            .unwrap();
        assert_eq!(failed, Invocation::Exited { code: Some(3) });
    }

    #[cfg(unix)]
    #[test]
    fn test_blocking_waits_for_child() {
        let mut invoker = ProcessInvoker::new(RunMode::Blocking);
        let started = Instant::now();
        invoker.invoke(&CommandSpec::new("sleep", ["0.2"])).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(200));
    }

    #[cfg(unix)]
    #[test]
    fn test_restart_terminates_previous_child() {
        let mut invoker = ProcessInvoker::new(RunMode::Restart);
        let sleeper = CommandSpec::new("sleep", ["30"]);

        let first = invoker.invoke(&sleeper).unwrap();
        assert!(matches!(first, Invocation::Running { .. }));

        let started = Instant::now();
        let second = invoker.invoke(&sleeper).unwrap();
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_ne!(first, second);
        assert!(invoker.running_pid().is_some());

        invoker.shutdown().unwrap();
        assert_eq!(invoker.running_pid(), None);
    }
}
