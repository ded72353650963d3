//! Error types for watchrun
//!
//! Uses `thiserror` for library errors. Startup errors (`NotFound`,
//! `PermissionDenied`, `ResourceExhausted`) abort before the dispatch loop
//! starts; `ReopenFailed` and `SpawnFailed` are reported and the loop keeps
//! going; `AllTargetsLost` ends the loop.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for watchrun operations
pub type WatchrunResult<T> = Result<T, WatchrunError>;

/// Main error type for watchrun operations
#[derive(Error, Debug)]
pub enum WatchrunError {
    /// Path does not exist at registration time
    #[error("cannot open '{}': {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Path exists but cannot be opened for reading
    #[error("cannot open '{}': {source}", path.display())]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The notification facility refused another subscription
    #[error("cannot watch '{}': {message} (raise the open file or watch limit)", path.display())]
    ResourceExhausted { path: PathBuf, message: String },

    /// The notification facility rejected the path for another reason
    #[error("cannot watch '{}': {message}", path.display())]
    Watch { path: PathBuf, message: String },

    /// A deleted or renamed target could not be bound again
    #[error("lost '{}': {reason}", path.display())]
    ReopenFailed {
        path: PathBuf,
        #[source]
        reason: Box<WatchrunError>,
    },

    /// The command could not be executed
    #[error("failed to execute '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Every watched file has gone away
    #[error("all watched files are gone, nothing left to watch")]
    AllTargetsLost,

    /// The notification backend stopped delivering events
    #[error("file notification backend stopped unexpectedly")]
    NotifierClosed,

    /// The input stream produced no paths
    #[error("no files to watch: pipe a list of paths on stdin, one per line")]
    NoTargets,

    /// Invalid configuration file
    #[error("invalid configuration in {}: {message}", file.display())]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl WatchrunError {
    /// Classify a failure to open `path` for reading.
    pub fn from_open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => WatchrunError::NotFound { path, source },
            io::ErrorKind::PermissionDenied => WatchrunError::PermissionDenied { path, source },
            _ if is_exhaustion(&source) => WatchrunError::ResourceExhausted {
                path,
                message: source.to_string(),
            },
            _ => WatchrunError::Watch {
                path,
                message: source.to_string(),
            },
        }
    }
}

// errno values shared by Linux and the BSDs
const ENFILE: i32 = 23;
const EMFILE: i32 = 24;
// inotify reports its watch limit as ENOSPC
const ENOSPC: i32 = 28;

/// Out of descriptors or kernel watch slots.
pub(crate) fn is_exhaustion(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(ENFILE | EMFILE | ENOSPC))
}
