//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all kernel and process I/O.
//!
//! ## Structure
//!
//! - `notifier/` - `Notifier` implementations (native, scripted)
//! - `invoker/` - `Invoker` implementations (process, recording)

pub mod invoker;
pub mod notifier;

// Re-export for convenience
pub use invoker::{ProcessInvoker, RecordingInvoker, RunMode};
pub use notifier::{Interrupter, NativeNotifier, ScriptedEvent, ScriptedNotifier};
