//! Application Layer
//!
//! Use cases that orchestrate the watch flow.
//! This layer:
//! - Depends on Domain layer (entities, ports)
//! - Does NOT talk to the kernel or spawn processes directly
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `read_path_list` - Parse the newline-delimited list of paths
//! - `register` / `register_all` - Bind paths to the notification facility
//! - `DispatchLoop` - Wait, classify, reopen and invoke

pub mod input;
pub mod registrar;
pub mod watch;

pub use input::read_path_list;
pub use registrar::{register, register_all};
pub use watch::{DispatchLoop, LoopExit, WatchEvent};
