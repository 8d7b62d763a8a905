use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::provider::ServiceId;

/// Configuration for a single weather service (its base endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub url: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [services.NOAA]
    /// url = "http://127.0.0.1:5000/noaa"
    pub services: HashMap<String, ServiceConfig>,
}

impl Config {
    /// Base endpoint for a service, falling back to the bundled default
    /// when the service has never been configured.
    pub fn service_url(&self, id: ServiceId) -> String {
        self.services
            .get(id.as_str())
            .map(|cfg| cfg.url.clone())
            .unwrap_or_else(|| default_url(id).to_string())
    }

    /// Set/replace the endpoint for a service.
    pub fn set_service_url(&mut self, id: ServiceId, url: String) {
        self.services.insert(id.as_str().to_string(), ServiceConfig { url });
    }

    pub fn is_service_configured(&self, id: ServiceId) -> bool {
        self.services.contains_key(id.as_str())
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "avgtemp", "avgtemp-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn default_url(id: ServiceId) -> &'static str {
    match id {
        ServiceId::Noaa => "http://127.0.0.1:5000/noaa",
        ServiceId::WeatherDotCom => "http://127.0.0.1:5000/weatherdotcom",
        ServiceId::AccuWeather => "http://127.0.0.1:5000/accuweather",
    }
}
