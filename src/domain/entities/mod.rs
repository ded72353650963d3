//! Domain Entities
//!
//! - `WatchTarget` - one requested path and its subscription state
//! - `WatchSet` - the capacity-bounded, ordered set of targets
//! - `CommandSpec` - the program and arguments run on every change

mod command;
mod watch_set;
mod watch_target;

pub use command::CommandSpec;
pub use watch_set::WatchSet;
pub use watch_target::{TargetState, WatchTarget};
