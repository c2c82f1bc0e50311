//! Configuration types for promptly.
//!
//! Settings for the conversation endpoint, the identifier cookie and the
//! chat view, stored as JSON.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::autosize::MAX_VISIBLE_LINES;
use crate::cookie::{CHAT_ID_COOKIE, CHAT_ID_TTL_DAYS, MAX_COOKIE_TTL_DAYS};

/// Main configuration for promptly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the chat server; requests go to `{base_url}/conversation`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the cookie holding the conversation identifier.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Lifetime of the identifier cookie in days, `0..=400`. Zero makes it a
    /// session cookie.
    #[serde(default = "default_cookie_ttl_days")]
    pub cookie_ttl_days: i64,

    /// Where the cookie jar is stored. Defaults to the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie_path: Option<PathBuf>,

    /// Render a visible error row when an exchange fails.
    #[serde(default)]
    pub show_errors: bool,

    /// Lines the input grows to before scrolling.
    #[serde(default = "default_max_visible_lines")]
    pub max_visible_lines: usize,

    /// UI tick rate in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".into()
}

fn default_cookie_name() -> String {
    CHAT_ID_COOKIE.into()
}

fn default_cookie_ttl_days() -> i64 {
    CHAT_ID_TTL_DAYS
}

fn default_max_visible_lines() -> usize {
    MAX_VISIBLE_LINES
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_COOKIE_TTL_DAYS).contains(&self.cookie_ttl_days) {
            return Err(ConfigError::Invalid(format!(
                "cookie_ttl_days must be between 0 and {MAX_COOKIE_TTL_DAYS}, got {}",
                self.cookie_ttl_days
            )));
        }
        Ok(())
    }

    /// Load configuration, falling back to defaults when the file is missing.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("promptly").join("config.json"))
    }

    /// Cookie jar location: the configured path or the platform default.
    pub fn resolved_cookie_path(&self) -> Option<PathBuf> {
        self.cookie_path
            .clone()
            .or_else(crate::cookie::FileCookieJar::default_path)
    }

    /// Cookie lifetime as a duration, clamped to the valid range.
    pub fn cookie_ttl(&self) -> chrono::Duration {
        chrono::Duration::days(self.cookie_ttl_days.clamp(0, MAX_COOKIE_TTL_DAYS))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cookie_name: default_cookie_name(),
            cookie_ttl_days: default_cookie_ttl_days(),
            cookie_path: None,
            show_errors: false,
            max_visible_lines: default_max_visible_lines(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// A value parsed but is out of range.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}
