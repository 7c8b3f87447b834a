//! Top-level application configuration.
//!
//! Configuration is stored in `config.yaml` under the platform config
//! directory (or the file named by `POKEDEX_CONFIG`) and includes:
//! - Upstream API and artwork base URLs
//! - Page size and catalog size used for pagination
//! - Batch concurrency for full-catalog fetches
//! - Request timeout

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{PokedexError, Result};

pub const CONFIG_PATH_ENV: &str = "POKEDEX_CONFIG";
pub const API_URL_ENV: &str = "POKEDEX_API_URL";
pub const PAGE_SIZE_ENV: &str = "POKEDEX_PAGE_SIZE";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the catalog API (no trailing slash)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL for official artwork; `{id:03}.png` is appended
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Records per page request (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Highest catalog id considered part of the national dex (default: 1025)
    #[serde(default = "default_max_count")]
    pub max_count: u32,

    /// Concurrent record lookups per wave during full fetches (default: 10)
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://pokeapi.co/api/v2".to_string()
}

fn default_image_base_url() -> String {
    "https://assets.pokemon.com/assets/cms2/img/pokedex/full/".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_max_count() -> u32 {
    1025
}

fn default_batch_concurrency() -> usize {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            image_base_url: default_image_base_url(),
            page_size: default_page_size(),
            max_count: default_max_count(),
            batch_concurrency: default_batch_concurrency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV)
            && !path.is_empty()
        {
            return Ok(PathBuf::from(path));
        }

        ProjectDirs::from("", "", "pokedex")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
            .ok_or_else(|| PokedexError::Config("no home directory available".to_string()))
    }

    /// Load configuration from the default location, falling back to defaults
    /// when no file exists, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            PokedexError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply `POKEDEX_API_URL` and `POKEDEX_PAGE_SIZE` if set
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = env::var(API_URL_ENV)
            && !url.is_empty()
        {
            self.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Ok(size) = env::var(PAGE_SIZE_ENV)
            && !size.is_empty()
        {
            self.page_size = size.parse().map_err(|_| {
                PokedexError::Config(format!("{PAGE_SIZE_ENV} must be a number, got '{size}'"))
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(PokedexError::Config("page_size must be at least 1".to_string()));
        }
        if self.max_count == 0 {
            return Err(PokedexError::Config("max_count must be at least 1".to_string()));
        }
        if self.batch_concurrency == 0 {
            return Err(PokedexError::Config(
                "batch_concurrency must be at least 1".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(PokedexError::Config("timeout_secs must be at least 1".to_string()));
        }
        url::Url::parse(&self.api_base_url)?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Collection URL for creature records
    pub fn pokemon_url(&self) -> String {
        format!("{}/pokemon", self.api_base_url.trim_end_matches('/'))
    }

    /// Collection URL for species records
    pub fn species_url(&self) -> String {
        format!("{}/pokemon-species", self.api_base_url.trim_end_matches('/'))
    }
}
