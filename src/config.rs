//! API key configuration
//!
//! The data.gov.in key resolves from the environment first, then from an
//! XDG config file (`~/.config/nregadash/config.toml` on Linux). A missing
//! key is a startup error; the client never sends an unauthenticated
//! request.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable consulted before the config file
pub const API_KEY_ENV: &str = "DATA_GOV_API_KEY";

/// File name inside the XDG config directory
const CONFIG_FILE: &str = "config.toml";

/// Errors raised while resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No usable key in the environment or the config file
    #[error(
        "no API key configured: set DATA_GOV_API_KEY or put api_key = \"...\" in {config_path}"
    )]
    MissingApiKey { config_path: String },

    /// The config file exists but cannot be read or parsed
    #[error("could not use config file {path}: {message}")]
    InvalidConfigFile { path: String, message: String },
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// data.gov.in API key sent with every request
    pub api_key: String,
}

/// On-disk shape of the config file.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    api_key: Option<String>,
}

/// XDG path of the config file, when a home directory can be determined.
fn default_config_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "nregadash")?;
    Some(dirs.config_dir().join(CONFIG_FILE))
}

impl Config {
    /// Loads configuration from the environment, falling back to the
    /// config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(env::var(API_KEY_ENV).ok(), default_config_path())
    }

    /// Resolution order: a non-blank environment value wins; otherwise the
    /// config file's `api_key` entry; otherwise a missing-key error that
    /// names both places.
    fn from_sources(
        env_key: Option<String>,
        config_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(key) = env_key {
            let key = key.trim();
            if !key.is_empty() {
                return Ok(Self {
                    api_key: key.to_string(),
                });
            }
        }

        let described = config_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| format!("the XDG config directory ({CONFIG_FILE})"));

        let readable = config_path.filter(|p| p.exists());
        let Some(path) = readable else {
            return Err(ConfigError::MissingApiKey {
                config_path: described,
            });
        };

        let content = fs::read_to_string(&path).map_err(|err| ConfigError::InvalidConfigFile {
            path: described.clone(),
            message: err.to_string(),
        })?;
        let file: ConfigFile =
            toml::from_str(&content).map_err(|err| ConfigError::InvalidConfigFile {
                path: described.clone(),
                message: err.to_string(),
            })?;

        match file.api_key {
            Some(key) if !key.trim().is_empty() => Ok(Self {
                api_key: key.trim().to_string(),
            }),
            _ => Err(ConfigError::MissingApiKey {
                config_path: described,
            }),
        }
    }
}
