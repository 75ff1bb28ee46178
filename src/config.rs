//! Configuration - YAML file under the user's home directory

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_FALLBACK_ERROR, DEFAULT_LOG_FILE,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_USERS_URL,
};

/// Loader policy
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Message used for failures that carry no message of their own
    pub fallback_error_message: String,
    /// Abort the task of a superseded or disposed cycle instead of
    /// letting it run to completion and dropping its result
    pub abort_superseded: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            fallback_error_message: String::from(DEFAULT_FALLBACK_ERROR),
            abort_superseded: false,
        }
    }
}

impl LoaderConfig {
    /// Fallback message, never empty
    pub fn fallback(&self) -> &str {
        if self.fallback_error_message.trim().is_empty() {
            DEFAULT_FALLBACK_ERROR
        } else {
            &self.fallback_error_message
        }
    }
}

/// Application settings for the user list viewer
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub users_url: String,
    /// 0 disables the timeout
    pub request_timeout_secs: u64,
    pub log_file: String,
    pub loader: LoaderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            users_url: String::from(DEFAULT_USERS_URL),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_file: String::from(DEFAULT_LOG_FILE),
            loader: LoaderConfig::default(),
        }
    }
}

impl AppConfig {
    /// `~/.list-loader`, or `./.list-loader` when there is no home directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }

    pub fn default_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = Self::default_path();
        if !path.exists() {
            return AppConfig::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Ignoring unreadable config");
                AppConfig::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }
}
