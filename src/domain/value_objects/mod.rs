//! Domain Value Objects
//!
//! Small immutable types shared between the ports and the entities.

mod change;
mod handle;

pub use change::ChangeKind;
pub use handle::WatchHandle;
