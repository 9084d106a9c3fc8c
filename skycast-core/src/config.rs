use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::model::Coordinates;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "SKYCAST_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// request_timeout_secs = 10
///
/// [home]
/// lat = 38.72
/// lon = -9.14
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Provider root; only overridden in tests or behind a proxy.
    pub base_url: Option<String>,

    /// No timeout when absent.
    pub request_timeout_secs: Option<u64>,

    /// Position reported when the device location is requested.
    pub home: Option<Coordinates>,
}

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// API key from the environment, falling back to the stored one.
    pub fn resolve_api_key(&self) -> Result<String> {
        Self::pick_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    fn pick_api_key(env: Option<String>, stored: Option<&str>) -> Result<String> {
        env.filter(|k| !k.trim().is_empty())
            .or_else(|| stored.filter(|k| !k.trim().is_empty()).map(str::to_owned))
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: run `skycast configure` or set {API_KEY_ENV}."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Load config from the platform location, or an empty default on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
