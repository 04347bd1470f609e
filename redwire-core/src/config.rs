//! World configuration, read from a JSON5 file.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fs, io};

use serde::Deserialize;
use thiserror::Error;

use crate::level::LevelSettings;
use crate::ticks::MAX_SCHEDULED_PER_TICK;

/// The configuration written when none exists yet.
pub const DEFAULT_CONFIG: &str = include_str!("../../package-content/redwire_config.json5");

/// Largest world width along either horizontal axis.
pub const MAX_WORLD_SIZE: u32 = 4096;

/// Failure to produce a usable [`WorldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid JSON5 for this structure.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json5::Error,
    },
    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Settings for a world and the driver running it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldConfig {
    /// Width along x, a power of two.
    pub x_size: u32,
    /// Width along z, a power of two.
    pub z_size: u32,
    /// Scheduled ticks processed per world tick.
    pub tick_budget: usize,
    /// Ticks a redstone torch waits before re-evaluating.
    pub torch_delay: u64,
    /// Milliseconds per world tick.
    pub tick_interval_ms: u64,
    /// Write the start-up showcase into a fresh world.
    pub demo_scene: bool,
    /// Stop the driver after this many ticks.
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            x_size: 64,
            z_size: 64,
            tick_budget: MAX_SCHEDULED_PER_TICK,
            torch_delay: 2,
            tick_interval_ms: 50,
            demo_scene: true,
            max_ticks: None,
        }
    }
}

impl WorldConfig {
    /// Parses and validates a configuration string.
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json5::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Reads the configuration at `path`, writing the default file there
    /// first if it does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::load(path);
        }

        let io_error = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, DEFAULT_CONFIG).map_err(io_error)?;
        log::info!("Wrote default configuration to {}", path.display());
        Self::parse(DEFAULT_CONFIG, path)
    }

    /// Checks every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size_ok = |size: u32| size.is_power_of_two() && size <= MAX_WORLD_SIZE;
        if !size_ok(self.x_size) {
            return Err(ConfigError::Invalid(
                "x_size must be a power of two in 1..=4096",
            ));
        }
        if !size_ok(self.z_size) {
            return Err(ConfigError::Invalid(
                "z_size must be a power of two in 1..=4096",
            ));
        }
        if !(1..=MAX_SCHEDULED_PER_TICK).contains(&self.tick_budget) {
            return Err(ConfigError::Invalid("tick_budget must be in 1..=1000"));
        }
        if self.torch_delay == 0 {
            return Err(ConfigError::Invalid("torch_delay must be at least 1"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be at least 1"));
        }
        Ok(())
    }

    /// Simulation tunables for a [`Level`](crate::level::Level).
    #[must_use]
    pub fn level_settings(&self) -> LevelSettings {
        LevelSettings {
            torch_delay: self.torch_delay,
            tick_budget: self.tick_budget,
        }
    }

    /// Length of one world tick.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
