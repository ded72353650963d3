//! Configuration module for watchrun
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (WATCHRUN_*)
//! 3. Config file (`--config <FILE>` or ~/.config/watchrun/config.toml)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning};
pub use types::{
    ColorMode, Config, OutputConfig, RunConfig, Verbosity, WatchConfig, DEFAULT_MAX_TARGETS,
};
