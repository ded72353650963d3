//! Domain Ports (Interfaces)
//!
//! The dispatch loop only talks to the kernel and to child processes through
//! these traits. Infrastructure provides the production implementations and
//! the test doubles.

pub mod invoker;
pub mod notifier;

pub use invoker::{Invocation, Invoker};
pub use notifier::{Notification, Notifier};
