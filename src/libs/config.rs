//! Configuration for the taskman client.
//!
//! The configuration is a small JSON file (`config.json`) in the
//! application data directory. Today it only carries the server section,
//! i.e. the base address of the task API.
//!
//! ## Base address resolution
//!
//! 1. The `TASKMAN_API_URL` environment variable (a `.env` file in the
//!    working directory is loaded at startup, so it can be set there too)
//! 2. `server.api_url` from `config.json`
//! 3. [`DEFAULT_API_URL`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskman::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("Talking to {}", config.api_url());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::api::DEFAULT_API_URL;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::io::ErrorKind;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable that overrides the configured base address.
pub const API_URL_ENV: &str = "TASKMAN_API_URL";

/// Task server connection settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Base URL of the task API, e.g. `https://tasks.example.com/api/v1`.
    pub api_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

impl Config {
    /// Reads `config.json` from the platform data directory, or returns the
    /// default configuration when the file does not exist.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes `config.json`. A missing file is not an error.
    pub fn delete_from(storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        match fs::remove_file(config_file_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Effective base address, honouring the `TASKMAN_API_URL` override.
    pub fn api_url(&self) -> String {
        self.api_url_with_override(env::var(API_URL_ENV).ok().as_deref())
    }

    pub fn api_url_with_override(&self, override_url: Option<&str>) -> String {
        if let Some(url) = override_url.map(str::trim).filter(|url| !url.is_empty()) {
            return url.to_string();
        }
        match &self.server {
            Some(server) if !server.api_url.trim().is_empty() => server.api_url.trim().to_string(),
            _ => DEFAULT_API_URL.to_string(),
        }
    }

    /// Checks that `url` is an absolute http(s) address.
    pub fn validate_api_url(url: &str) -> Result<()> {
        let url = url.trim();
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or_default();
        if rest.is_empty() || rest.starts_with('/') {
            msg_bail_anyhow!(Message::InvalidApiUrl(url.to_string()));
        }
        Ok(())
    }

    /// Interactive setup, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.server.clone().unwrap_or_default();

        msg_print!(Message::ConfigModuleServer);
        let api_url: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptServerApiUrl.to_string())
            .default(default.api_url)
            .interact_text()?;
        Self::validate_api_url(&api_url)?;
        config.server = Some(ServerConfig {
            api_url: api_url.trim().to_string(),
        });

        Ok(config)
    }
}
