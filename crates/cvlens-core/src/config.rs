//! Configuration management for cvlens.
//!
//! Loads configuration from ${CVLENS_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured service base URL.
pub const BASE_URL_ENV: &str = "CVLENS_BASE_URL";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for cvlens configuration and data directories.
    //!
    //! CVLENS_HOME resolution order:
    //! 1. CVLENS_HOME environment variable (if set)
    //! 2. ~/.config/cvlens (default)

    use std::path::PathBuf;

    /// Returns the cvlens home directory.
    ///
    /// Checks CVLENS_HOME env var first, falls back to ~/.config/cvlens
    pub fn cvlens_home() -> PathBuf {
        if let Ok(home) = std::env::var("CVLENS_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("cvlens"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        cvlens_home().join("config.toml")
    }

    /// Returns the path to the persisted session credential.
    pub fn session_path() -> PathBuf {
        cvlens_home().join("session.json")
    }

    /// Returns the directory that holds log files.
    pub fn logs_dir() -> PathBuf {
        cvlens_home().join("logs")
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when CVLENS_LOG is unset (e.g. "info", "cvlens_core=debug").
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the analysis/authentication service
    pub base_url: String,

    /// Delay between a successful login and the dashboard, in milliseconds
    pub success_delay_ms: u64,

    /// Timeout for remote requests in seconds (0 disables)
    pub request_timeout_secs: u64,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            success_delay_ms: Self::DEFAULT_SUCCESS_DELAY_MS,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            log: LogConfig::default(),
        }
    }
}

impl Config {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";
    pub const DEFAULT_SUCCESS_DELAY_MS: u64 = 2000;
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Loads configuration from the default path, then applies env overrides.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies `CVLENS_BASE_URL` if set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                self.base_url = trimmed.to_string();
            }
        }
    }

    /// Writes the default config template to `path`.
    ///
    /// Creates parent directories as needed. Never overwrites.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }

    /// Request timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }
}
