// ABOUTME: Process-start configuration for the notification pipeline
// Loads optional TOML overrides and falls back to built-in defaults

use crate::notify::ToastPosition;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub default_duration_ms: u64,
    pub default_position: ToastPosition,
    /// Capacity of the live queue; oldest toasts are evicted past this.
    pub max_toasts: usize,
    /// Most toasts a renderer stacks at one anchor.
    pub max_visible: usize,
    pub stagger_delay_ms: u64,
    /// Lifetime of the toast enqueued alongside a legacy status message.
    pub message_toast_duration_ms: u64,
    /// Delay before a legacy status message resets itself.
    pub message_clear_delay_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_duration_ms: 3000,
            default_position: ToastPosition::TopRight,
            max_toasts: 5,
            max_visible: 3,
            stagger_delay_ms: 100,
            message_toast_duration_ms: 4000,
            message_clear_delay_ms: 3000,
        }
    }
}

impl NotificationConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        info!("Loaded notification config from {}", path.display());
        Ok(config)
    }

    /// Read the per-user config file if it exists, otherwise use defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("No notification config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pointer-toasts").join("notifications.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_toasts == 0 {
            return Err(ConfigError::Invalid("max_toasts must be at least 1".to_string()));
        }
        if self.max_visible == 0 {
            return Err(ConfigError::Invalid("max_visible must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.default_duration_ms)
    }

    pub fn stagger_delay(&self) -> Duration {
        Duration::from_millis(self.stagger_delay_ms)
    }

    pub fn message_clear_delay(&self) -> Duration {
        Duration::from_millis(self.message_clear_delay_ms)
    }
}
