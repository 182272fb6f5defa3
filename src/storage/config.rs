//! Configuration handling for the Todoist CLI
//!
//! Configuration is stored in `config.toml` inside the per-user config
//! directory (`~/.config/todoist-cli/` on Linux). `TODOIST_CONFIG_DIR`
//! overrides the directory; `TODOIST_API_TOKEN` and `TODOIST_API_URL`
//! override the file's values.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::DEFAULT_API_URL;

pub const TOKEN_ENV: &str = "TODOIST_API_TOKEN";
pub const API_URL_ENV: &str = "TODOIST_API_URL";
pub const CONFIG_DIR_ENV: &str = "TODOIST_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("No API token configured. Run 'todoist auth' or set TODOIST_API_TOKEN.")]
    MissingToken,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Where the active token came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Env,
    File,
}

impl TokenSource {
    pub fn describe(&self) -> &'static str {
        match self {
            TokenSource::Env => TOKEN_ENV,
            TokenSource::File => "config file",
        }
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// API token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// API base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

impl Config {
    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Some(PathBuf::from(dir));
        }
        ProjectDirs::from("com", "todoist", "todoist-cli")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse config")
    }

    /// Saves configuration to the default location, returning the path written
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Saves configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| {
                format!("Failed to create config directory: {}", dir.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        // The file holds a credential: owner-only from creation onwards
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(path)
            .with_context(|| format!("Failed to open config: {}", path.display()))?;

        // mode() only applies to new files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions: {}", path.display()))?;
        }

        file.write_all(content.as_bytes())
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        Ok(())
    }

    /// Resolves the API token, preferring the environment
    pub fn token(&self) -> Result<(String, TokenSource), ConfigError> {
        self.token_with(std::env::var(TOKEN_ENV).ok())
    }

    /// Resolves the API token given the environment value
    pub fn token_with(&self, env: Option<String>) -> Result<(String, TokenSource), ConfigError> {
        if let Some(token) = env.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
            return Ok((token, TokenSource::Env));
        }

        self.token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| (t.to_string(), TokenSource::File))
            .ok_or(ConfigError::MissingToken)
    }

    /// Resolves the API base URL, preferring the environment
    pub fn api_url(&self) -> String {
        self.api_url_with(std::env::var(API_URL_ENV).ok())
    }

    /// Resolves the API base URL given the environment value
    pub fn api_url_with(&self, env: Option<String>) -> String {
        env.filter(|u| !u.is_empty())
            .or_else(|| self.api_url.clone().filter(|u| !u.is_empty()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }
}
