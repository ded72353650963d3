//! Terminal presentation for the watch command

pub mod context;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
