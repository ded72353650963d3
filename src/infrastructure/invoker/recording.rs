//! Recording invoker - the test double for `ProcessInvoker`

use std::io;

use crate::domain::entities::CommandSpec;
use crate::domain::ports::{Invocation, Invoker};
use crate::error::{WatchrunError, WatchrunResult};

type Hook = Box<dyn FnMut(&CommandSpec) + Send>;

/// Records every invocation instead of spawning a process.
///
/// An optional hook runs inside each invocation, standing in for the time
/// the real command would take.
#[derive(Default)]
pub struct RecordingInvoker {
    calls: Vec<CommandSpec>,
    shutdowns: usize,
    hook: Option<Hook>,
    failing: bool,
}

impl RecordingInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hook(mut self, hook: impl FnMut(&CommandSpec) + Send + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Every invocation fails with `SpawnFailed` (after being recorded)
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn calls(&self) -> &[CommandSpec] {
        &self.calls
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns
    }
}

impl Invoker for RecordingInvoker {
    fn invoke(&mut self, command: &CommandSpec) -> WatchrunResult<Invocation> {
        self.calls.push(command.clone());
        if let Some(hook) = self.hook.as_mut() {
            hook(command);
        }

        if self.failing {
            return Err(WatchrunError::SpawnFailed {
                program: command.program().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            });
        }
        Ok(Invocation::Exited { code: Some(0) })
    }

    fn shutdown(&mut self) -> WatchrunResult<()> {
        self.shutdowns += 1;
        Ok(())
    }
}
