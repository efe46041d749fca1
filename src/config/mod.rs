//! Configuration management for axiom-place
//!
//! This module handles loading, parsing, and validating configuration
//! from TOML files: decoration metrics that drive cascading and gravity,
//! the desktop layout the cascade table is sized for, and general flags.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Main configuration struct containing all placement settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PlacementConfig {
    /// Frame decoration metrics
    #[serde(default)]
    pub border: BorderConfig,

    /// Virtual desktop layout
    #[serde(default)]
    pub desktops: DesktopConfig,

    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,
}

/// Frame decoration metrics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BorderConfig {
    /// Outline thickness on every side (pixels)
    pub border_width: i32,

    /// Title bar height added above the client (pixels)
    pub title_height: i32,
}

/// Virtual desktop layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DesktopConfig {
    /// Number of virtual desktops
    pub count: u32,

    /// Desktop shown at startup
    pub initial: u32,
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable debug logging
    pub debug: bool,
}

/// Reasons a configuration is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid border_width {0}: must not be negative")]
    NegativeBorderWidth(i32),

    #[error("invalid title_height {0}: must not be negative")]
    NegativeTitleHeight(i32),

    #[error("invalid desktop count: at least one desktop is required")]
    NoDesktops,

    #[error("initial desktop {initial} is out of range for {count} desktops")]
    InitialDesktopOutOfRange { initial: u32, count: u32 },
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self {
            border_width: 4,
            title_height: 20,
        }
    }
}

impl BorderConfig {
    /// Distance the cascade cursor moves per placement, also its start value
    pub fn cascade_step(&self) -> i32 {
        self.border_width + self.title_height
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            count: 4,
            initial: 0,
        }
    }
}

impl PlacementConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Expand ~ to home directory
        let expanded_path = if path.to_string_lossy().starts_with('~') {
            let home = std::env::var("HOME").context("Failed to get HOME environment variable")?;
            let rest = path.strip_prefix("~").unwrap_or(path);
            Path::new(&home).join(rest)
        } else {
            path.to_path_buf()
        };

        let contents = fs::read_to_string(&expanded_path)
            .with_context(|| format!("Failed to read config file: {}", expanded_path.display()))?;

        let config: PlacementConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", expanded_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.border.border_width < 0 {
            return Err(ConfigError::NegativeBorderWidth(self.border.border_width));
        }
        if self.border.title_height < 0 {
            return Err(ConfigError::NegativeTitleHeight(self.border.title_height));
        }
        if self.desktops.count == 0 {
            return Err(ConfigError::NoDesktops);
        }
        if self.desktops.initial >= self.desktops.count {
            return Err(ConfigError::InitialDesktopOutOfRange {
                initial: self.desktops.initial,
                count: self.desktops.count,
            });
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, contents).context("Failed to write configuration file")?;

        Ok(())
    }

    /// Merge a partial configuration into this one
    /// Sections of the partial config that differ from the defaults override this config
    pub fn merge_partial(mut self, partial: PlacementConfig) -> Self {
        let default_config = PlacementConfig::default();

        if partial.border != default_config.border {
            self.border = partial.border;
        }
        if partial.desktops != default_config.desktops {
            self.desktops = partial.desktops;
        }
        if partial.general != default_config.general {
            self.general = partial.general;
        }

        self
    }
}


#[cfg(test)]
mod property_tests;
