use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://economia.awesomeapi.com.br/json/last";
pub const DEFAULT_AVAILABLE_URL: &str = "https://economia.awesomeapi.com.br/xml/available";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AwesomeApiConfig {
    pub base_url: String,
    /// Probed by the catalog endpoint; the response is never used.
    pub available_url: String,
    pub timeout_secs: Option<u64>,
}

impl Default for AwesomeApiConfig {
    fn default() -> Self {
        AwesomeApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            available_url: DEFAULT_AVAILABLE_URL.to_string(),
            timeout_secs: Some(10),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub awesome_api: AwesomeApiConfig,
}

fn default_batch_concurrency() -> usize {
    4
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_batch_concurrency")]
    pub batch_concurrency: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server: ServerConfig::default(),
            providers: ProvidersConfig::default(),
            batch_concurrency: default_batch_concurrency(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when it is absent.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "realtrade", "quote-gateway")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
