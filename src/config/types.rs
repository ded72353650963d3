//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::WatchrunResult;

use super::loader::{self, ConfigWarning};

/// Default cap on the number of paths read from the input stream
pub const DEFAULT_MAX_TARGETS: usize = 1024;

/// Watch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Paths beyond this count are ignored
    #[serde(default = "default_max_targets")]
    pub max_targets: usize,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            max_targets: DEFAULT_MAX_TARGETS,
        }
    }
}

fn default_max_targets() -> usize {
    DEFAULT_MAX_TARGETS
}

/// Command execution configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunConfig {
    /// Terminate and restart a still-running command instead of waiting for it
    #[serde(default)]
    pub restart: bool,

    /// Clear the screen before every run
    #[serde(default)]
    pub clear: bool,

    /// Skip the run at startup, wait for the first change
    #[serde(default)]
    pub postpone: bool,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,

    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            color: ColorMode::default(),
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Errors, warnings and lost files
    #[default]
    Normal,
    /// Every event
    Verbose,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> WatchrunResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> WatchrunResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load the explicit file, else the user config, else defaults; then
    /// apply environment overrides.
    pub fn load_or_default(explicit: Option<&Path>) -> WatchrunResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(explicit)
    }

    /// Apply environment variable overrides (WATCHRUN_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }
}
