//! Configuration model for skindir.
//!
//! The Config struct represents the skin management preferences, typically
//! loaded from a YAML file. Unknown fields are ignored for forward
//! compatibility, optional fields fall back to sensible defaults, and values
//! are validated on load.

use crate::error::{Result, SkinError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

fn default_lock_wait_ms() -> u64 {
    3_000
}

fn default_lock_poll_ms() -> u64 {
    500
}

/// Configuration for skin management.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root directory under which every skin lives.
    pub skin_base_path: String,

    /// Wall-clock deadline for lock acquisition, in milliseconds.
    #[serde(default = "default_lock_wait_ms")]
    pub lock_wait_ms: u64,

    /// Retry cadence while waiting for a contended lock, in milliseconds.
    #[serde(default = "default_lock_poll_ms")]
    pub lock_poll_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skin_base_path: String::new(),
            lock_wait_ms: default_lock_wait_ms(),
            lock_poll_ms: default_lock_poll_ms(),
        }
    }
}

impl Config {
    /// Create a config rooted at the given base path, with default lock
    /// timings (3s deadline, 500ms poll).
    pub fn new<S: Into<String>>(skin_base_path: S) -> Self {
        Self {
            skin_base_path: skin_base_path.into(),
            ..Self::default()
        }
    }

    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward
    /// compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SkinError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SkinError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| SkinError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `skin_base_path` must be non-empty
    /// - `lock_poll_ms` must be positive and no larger than `lock_wait_ms`
    pub fn validate(&self) -> Result<()> {
        if self.skin_base_path.is_empty() {
            return Err(SkinError::Config(
                "config validation failed: skin_base_path must be set".to_string(),
            ));
        }

        if self.lock_poll_ms == 0 {
            return Err(SkinError::Config(
                "config validation failed: lock_poll_ms must be greater than 0".to_string(),
            ));
        }

        if self.lock_poll_ms > self.lock_wait_ms {
            return Err(SkinError::Config(format!(
                "config validation failed: lock_poll_ms ({}) must not exceed lock_wait_ms ({})",
                self.lock_poll_ms, self.lock_wait_ms
            )));
        }

        Ok(())
    }

    /// Lock acquisition deadline as a Duration.
    pub fn lock_wait(&self) -> Duration {
        Duration::from_millis(self.lock_wait_ms)
    }

    /// Lock retry interval as a Duration.
    pub fn lock_poll(&self) -> Duration {
        Duration::from_millis(self.lock_poll_ms)
    }
}
