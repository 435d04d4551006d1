//! Configuration management for panestack
//!
//! Settings are loaded from a TOML file. Every section is optional and falls
//! back to its defaults, so an empty file is a valid configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::stack::DEFAULT_BASE_Z_INDEX;
use crate::window::{WindowId, WindowSpec};

/// Main configuration struct
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PanestackConfig {
    /// Stack manager settings
    #[serde(default)]
    pub stack: StackConfig,

    /// Geometry used for open requests that omit it
    #[serde(default)]
    pub defaults: WindowDefaults,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StackConfig {
    /// Counter value before the first front-ing transition; must sit above
    /// every z-index the page chrome uses
    pub base_z_index: u64,

    /// Samples kept by the window-count distribution
    pub metrics_history: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowDefaults {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,

    /// Offset applied per already-open window so new windows do not stack exactly
    pub cascade_offset: i32,

    /// Cascade wraps back to the origin after this many steps
    pub cascade_limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter ("error", "warn", "info", "debug", "trace"); RUST_LOG wins
    pub level: String,

    /// Attach the structured event logger to the manager
    pub events: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            base_z_index: DEFAULT_BASE_Z_INDEX,
            metrics_history: 256,
        }
    }
}

impl Default for WindowDefaults {
    fn default() -> Self {
        Self {
            x: 80,
            y: 60,
            width: 640,
            height: 480,
            cascade_offset: 24,
            cascade_limit: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            events: true,
        }
    }
}

impl WindowDefaults {
    /// Position for a new window when `open_count` windows are already open
    pub fn cascade_position(&self, open_count: usize) -> (i32, i32) {
        let step = (open_count % self.cascade_limit.max(1) as usize) as i32;
        let offset = step.saturating_mul(self.cascade_offset);
        (self.x.saturating_add(offset), self.y.saturating_add(offset))
    }

    /// Build a full open request, filling every missing field from the defaults
    pub fn complete(
        &self,
        id: WindowId,
        title: Option<String>,
        icon: Option<String>,
        position: (Option<i32>, Option<i32>),
        size: (Option<u32>, Option<u32>),
        open_count: usize,
    ) -> WindowSpec {
        let (cascade_x, cascade_y) = self.cascade_position(open_count);
        WindowSpec {
            title: title.unwrap_or_else(|| id.to_string()),
            icon: icon.unwrap_or_default(),
            x: position.0.unwrap_or(cascade_x),
            y: position.1.unwrap_or(cascade_y),
            width: size.0.unwrap_or(self.width),
            height: size.1.unwrap_or(self.height),
            is_minimized: false,
            is_maximized: false,
            id,
        }
    }
}

impl PanestackConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let expanded_path = expand_home(path.as_ref())?;

        let contents = fs::read_to_string(&expanded_path)
            .with_context(|| format!("Failed to read config file: {}", expanded_path.display()))?;

        let config: PanestackConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", expanded_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.defaults.width == 0 || self.defaults.height == 0 {
            anyhow::bail!(
                "Invalid default window size {}x{}: both dimensions must be non-zero",
                self.defaults.width,
                self.defaults.height
            );
        }

        if self.stack.metrics_history == 0 {
            anyhow::bail!("Invalid metrics_history: must be at least 1");
        }

        let valid_levels = ["off", "error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, contents).context("Failed to write configuration file")?;

        Ok(())
    }
}

/// Expand a leading `~` to the home directory
fn expand_home(path: &Path) -> Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = std::env::var("HOME").context("Failed to get HOME environment variable")?;
            Ok(Path::new(&home).join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}


#[cfg(test)]
mod property_tests;
