//! Dispatch loop implementation

use std::collections::BTreeSet;

use crate::application::registrar;
use crate::domain::entities::{CommandSpec, WatchSet};
use crate::domain::ports::{Invocation, Invoker, Notification, Notifier};
use crate::error::{WatchrunError, WatchrunResult};

use super::event::{CycleOutcome, LoopExit, WatchEvent};

/// Waits on the notifier, classifies each batch and runs the command.
///
/// Owns the watch set, the notifier and the invoker for its whole life; no
/// other component touches them while a run is in progress.
pub struct DispatchLoop<N, I> {
    targets: WatchSet,
    command: CommandSpec,
    notifier: N,
    invoker: I,
}

impl<N: Notifier, I: Invoker> DispatchLoop<N, I> {
    pub fn new(targets: WatchSet, command: CommandSpec, notifier: N, invoker: I) -> Self {
        Self {
            targets,
            command,
            notifier,
            invoker,
        }
    }

    /// Run dispatch cycles until interrupted, until every target is lost, or
    /// until `max_cycles` cycles have run.
    ///
    /// Blocks on the notifier between cycles and on the invoker while the
    /// command runs; notifications that arrive meanwhile stay queued and form
    /// the next batch.
    pub fn run<F>(&mut self, max_cycles: Option<usize>, on_event: F) -> WatchrunResult<LoopExit>
    where
        F: Fn(WatchEvent),
    {
        let mut cycles = 0usize;

        loop {
            if max_cycles.is_some_and(|limit| cycles >= limit) {
                return Ok(LoopExit::CycleLimit);
            }

            let batch = self.notifier.wait_for_batch()?;
            let outcome = self.dispatch(batch, &on_event);

            if outcome.interrupted {
                self.stop(&on_event);
                return Ok(LoopExit::Interrupted);
            }

            if self.targets.active_count() == 0 {
                self.stop(&on_event);
                return Err(WatchrunError::AllTargetsLost);
            }

            if !outcome.relevant {
                continue;
            }
            cycles += 1;

            if outcome.should_invoke {
                self.invoke_now(&on_event);
            }
        }
    }

    /// Run the command once outside of any cycle (startup run).
    ///
    /// Spawn failures are reported through `on_event` and otherwise ignored.
    pub fn invoke_now<F>(&mut self, on_event: F)
    where
        F: Fn(WatchEvent),
    {
        on_event(WatchEvent::CommandStarted {
            command: self.command.to_string(),
        });

        match self.invoker.invoke(&self.command) {
            Ok(Invocation::Exited { code }) => on_event(WatchEvent::CommandFinished { code }),
            Ok(Invocation::Running { pid }) => on_event(WatchEvent::CommandSpawned { pid }),
            Err(e) => on_event(WatchEvent::Error {
                message: e.to_string(),
            }),
        }
    }

    pub fn targets(&self) -> &WatchSet {
        &self.targets
    }

    pub fn command(&self) -> &CommandSpec {
        &self.command
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Classify one batch and apply target state transitions.
    fn dispatch(&mut self, batch: Vec<Notification>, on_event: &impl Fn(WatchEvent)) -> CycleOutcome {
        let mut outcome = CycleOutcome::default();
        let mut changed = BTreeSet::new();

        for notification in batch {
            match notification {
                Notification::Interrupted => outcome.interrupted = true,
                Notification::Fault { message } => on_event(WatchEvent::Warning { message }),
                Notification::Change { handle, kind } => {
                    // Stale: the object was already replaced or the target failed
                    let Some(index) = self.targets.position_of(handle) else {
                        continue;
                    };
                    outcome.relevant = true;

                    if kind.detaches() && !self.reacquire(index, on_event) {
                        continue;
                    }
                    changed.insert(index);
                    outcome.should_invoke = true;
                }
            }
        }

        if outcome.interrupted {
            return outcome;
        }

        for index in changed {
            if let Some(target) = self.targets.get(index).filter(|t| t.is_active()) {
                on_event(WatchEvent::FileChanged {
                    path: target.path().to_string(),
                });
            }
        }

        outcome
    }

    /// Bind the path of a detached target again. One attempt, no retry.
    fn reacquire(&mut self, index: usize, on_event: &impl Fn(WatchEvent)) -> bool {
        let Some(target) = self.targets.get_mut(index) else {
            return false;
        };
        if let Some(old) = target.detach() {
            self.notifier.unregister(old);
        }

        let path = target.path().to_string();
        match registrar::bind(&mut self.notifier, &path) {
            Ok(handle) => {
                target.rebind(handle);
                on_event(WatchEvent::TargetReopened { path });
                true
            }
            Err(reason) => {
                target.fail();
                let err = WatchrunError::ReopenFailed {
                    path: path.clone().into(),
                    reason: Box::new(reason),
                };
                on_event(WatchEvent::TargetLost {
                    path,
                    message: err.to_string(),
                });
                false
            }
        }
    }

    fn stop(&mut self, on_event: &impl Fn(WatchEvent)) {
        if let Err(e) = self.invoker.shutdown() {
            on_event(WatchEvent::Error {
                message: e.to_string(),
            });
        }
        on_event(WatchEvent::Shutdown);
    }
}
