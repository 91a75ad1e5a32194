use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable that overrides the configured backend address.
pub const BACKEND_URL_ENV: &str = "MEDIBOT_BACKEND_URL";

/// Backend address used when neither the environment variable nor the
/// config file provides one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub backend_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self { backend_url: None }
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    /// Backend base address: `MEDIBOT_BACKEND_URL` wins, then the config
    /// file value, then the default.
    pub fn resolve_backend_url(&self) -> String {
        std::env::var(BACKEND_URL_ENV)
            .ok()
            .or_else(|| self.backend_url.clone())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("medibot").join("config.json"))
    }
}
