//! Configuration module for the console
//!
//! Provides layered configuration loading from files, environment
//! variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`FOUNDRY_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)

mod agent;
mod error;
pub mod logging;
mod refresh;

pub use agent::AgentConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use refresh::RefreshConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_prefs_path() -> PathBuf {
    PathBuf::from("foundry-prefs.json")
}

/// Unified console configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Agent endpoint settings
    pub agent: AgentConfig,
    /// Background refresh settings
    pub refresh: RefreshConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Where operator preferences persist
    pub prefs_path: PathBuf,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            agent: AgentConfig::default(),
            refresh: RefreshConfig::default(),
            logging: LoggingConfig::default(),
            prefs_path: default_prefs_path(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from a TOML file.
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supports FOUNDRY_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("FOUNDRY_AGENT_URL") {
            self.agent.base_url = url;
        }
        if let Ok(timeout) = std::env::var("FOUNDRY_TIMEOUT_SECONDS") {
            if let Ok(t) = timeout.parse() {
                self.agent.timeout_seconds = t;
            }
        }

        if let Ok(level) = std::env::var("FOUNDRY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FOUNDRY_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(refresh) = std::env::var("FOUNDRY_AUTO_REFRESH") {
            self.refresh.enabled = refresh.to_lowercase() == "true";
        }
        if let Ok(interval) = std::env::var("FOUNDRY_REFRESH_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.refresh.interval_ms = ms;
            }
        }

        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent.base_url.is_empty() {
            return Err(ConfigError::Validation {
                field: "agent.base_url".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        }
        if !self.agent.base_url.starts_with("http://") && !self.agent.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation {
                field: "agent.base_url".to_string(),
                message: "URL must start with http:// or https://".to_string(),
            });
        }
        if self.agent.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "agent.timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }
        if self.refresh.interval_ms == 0 {
            return Err(ConfigError::Validation {
                field: "refresh.interval_ms".to_string(),
                message: "interval must be non-zero".to_string(),
            });
        }

        Ok(())
    }
}
