//! Domain Layer
//!
//! The watch targets, the command to run and the two capabilities the
//! dispatch loop depends on. No kernel or process calls happen here.
//!
//! ## Structure
//!
//! - `entities/` - `WatchTarget`, `WatchSet`, `CommandSpec`
//! - `value_objects/` - `WatchHandle`, `ChangeKind`
//! - `ports/` - `Notifier` and `Invoker` traits implemented by infrastructure

pub mod entities;
pub mod ports;
pub mod value_objects;
