//! Property tests for watchrun.
//!
//! Properties use randomized input generation to protect invariants of the
//! path list parser and the batch debounce.
//!
//! Run with: `cargo test --test properties`

#[path = "properties/path_list.rs"]
mod path_list;

#[path = "properties/debounce.rs"]
mod debounce;
