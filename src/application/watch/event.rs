//! Watch event types and loop options

/// Event reported by the dispatch loop, rendered by the CLI as text or NDJSON
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    WatchStarted {
        targets: usize,
    },
    FileChanged {
        path: String,
    },
    TargetReopened {
        path: String,
    },
    TargetLost {
        path: String,
        message: String,
    },
    CommandStarted {
        command: String,
    },
    CommandFinished {
        code: Option<i32>,
    },
    CommandSpawned {
        pid: u32,
    },
    Warning {
        message: String,
    },
    Error {
        message: String,
    },
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Events worth showing even when output is quiet
    pub fn is_error(&self) -> bool {
        matches!(self, WatchEvent::Error { .. })
    }

    /// Events worth showing at normal verbosity
    pub fn is_notice(&self) -> bool {
        matches!(
            self,
            WatchEvent::Error { .. } | WatchEvent::Warning { .. } | WatchEvent::TargetLost { .. }
        )
    }
}

/// How the loop ended without an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// An interrupt was delivered through the notifier
    Interrupted,
    /// The requested number of dispatch cycles ran
    CycleLimit,
}

/// Outcome of processing one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct CycleOutcome {
    /// At least one change belonged to a bound target
    pub(crate) relevant: bool,
    /// The command must run for this batch
    pub(crate) should_invoke: bool,
    /// Shutdown was requested
    pub(crate) interrupted: bool,
}
