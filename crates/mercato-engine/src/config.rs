//! # Engine Configuration
//!
//! List engine tunables with file and environment overrides.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MERCATO_PAGE_SIZE=20                                               │
//! │     MERCATO_DEBOUNCE_MS=500                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/mercato/engine.toml (Linux)                              │
//! │     ~/Library/Application Support/com.mercato.app/engine.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     page_size = 10, debounce_ms = 800                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # engine.toml
//! page_size = 10     # records per fetched page
//! debounce_ms = 800  # quiet interval before a search commits
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use mercato_core::{DEFAULT_DEBOUNCE_MS, DEFAULT_PAGE_SIZE};

// =============================================================================
// Config Errors
// =============================================================================

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// Config file could not be parsed.
    #[error("Failed to parse config: {0}")]
    ParseFailed(String),

    /// A value is out of its accepted range.
    #[error("Invalid engine configuration: {0}")]
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

// =============================================================================
// Engine Config
// =============================================================================

/// Tunables shared by every list the engine drives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Records per fetched page.
    pub page_size: u32,

    /// Quiet interval before a search keystroke burst commits, in ms.
    pub debounce_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl EngineConfig {
    /// Loads configuration: platform config file if present, then
    /// environment overrides, then validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => {
                debug!("No engine config file, using defaults");
                EngineConfig::default()
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses one TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading engine config");
        let text = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&text)?;
        Ok(config)
    }

    /// Platform config file location.
    fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "mercato", "mercato")
            .map(|dirs| dirs.config_dir().join("engine.toml"))
    }

    /// Applies `MERCATO_*` environment overrides, warning on unparsable
    /// values instead of failing startup.
    fn apply_env_overrides(&mut self) {
        if let Ok(raw) = std::env::var("MERCATO_PAGE_SIZE") {
            match raw.parse() {
                Ok(value) => self.page_size = value,
                Err(_) => warn!(raw = %raw, "Ignoring unparsable MERCATO_PAGE_SIZE"),
            }
        }
        if let Ok(raw) = std::env::var("MERCATO_DEBOUNCE_MS") {
            match raw.parse() {
                Ok(value) => self.debounce_ms = value,
                Err(_) => warn!(raw = %raw, "Ignoring unparsable MERCATO_DEBOUNCE_MS"),
            }
        }
    }

    /// Validates value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 || self.page_size > 100 {
            return Err(ConfigError::Invalid(format!(
                "page_size must be between 1 and 100, got {}",
                self.page_size
            )));
        }
        if self.debounce_ms > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "debounce_ms must be at most 10000, got {}",
                self.debounce_ms
            )));
        }
        Ok(())
    }

    /// The debounce quiet interval as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
