// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[server]` - Gallery API endpoint
//! - `[host]` - External image-host upload endpoint and optional API key
//!
//! # Path Resolution
//!
//! The config file lives under the platform config directory
//! (`dirs::config_dir()/Galeria/settings.toml`). Tests and portable
//! deployments can use `load_from_path()`/`save_to_path()` with an explicit
//! path instead.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Galeria";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_HOST_UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub host: HostConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Base URL of the gallery API (`api/images` is resolved against it).
    pub api_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    /// Endpoint that receives the multipart image upload.
    pub upload_url: String,
    /// API key sent as the `key` query parameter, when the host requires one.
    pub api_key: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            upload_url: DEFAULT_HOST_UPLOAD_URL.to_string(),
            api_key: None,
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default location.
///
/// Always returns a usable `Config`. The second tuple element carries a
/// warning message when the file exists but could not be read or parsed, so
/// startup can surface it as a notification instead of failing.
pub fn load() -> (Config, Option<String>) {
    let Some(path) = default_config_path() else {
        return (Config::default(), None);
    };
    if !path.exists() {
        return (Config::default(), None);
    }
    match load_from_path(&path) {
        Ok(config) => (config, None),
        Err(_) => (
            Config::default(),
            Some("Não foi possível ler o arquivo de configurações; usando os padrões.".to_string()),
        ),
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn save(config: &Config) -> Result<()> {
    let Some(path) = default_config_path() else {
        return Err(Error::Config("no config directory available".to_string()));
    };
    save_to_path(config, &path)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}
