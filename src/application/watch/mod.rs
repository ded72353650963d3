//! Dispatch loop
//!
//! The single thread of control that owns the watch set. Each wake collects
//! every queued notification as one batch, so a burst of writes to one or many
//! targets runs the command once. Deleted or renamed targets are bound again
//! on the spot; a target that cannot be bound again drops out of the run.
//!
//! ## Architecture
//!
//! - `DispatchLoop` - the state machine, generic over `Notifier` and `Invoker`
//! - `WatchEvent` - progress reported through a callback
//! - `LoopExit` - how a run ended cleanly
//!
//! ## Usage
//!
//! ```ignore
//! let mut dispatch = DispatchLoop::new(targets, command, notifier, invoker);
//! dispatch.run(None, |event| println!("{}", event.to_json()))?;
//! ```

mod event;
mod use_case;


pub use event::{LoopExit, WatchEvent};
pub use use_case::DispatchLoop;
