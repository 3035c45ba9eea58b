//! Configuration management for mindcheck
//!
//! TOML file at `~/.mindcheck/config.toml`, created with defaults on first
//! run. `MINDCHECK_API_URL` and command-line flags override file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::wire::Encoding;

/// Environment variable overriding the primary API base URL
pub const API_URL_ENV: &str = "MINDCHECK_API_URL";

/// Environment variable with the default serve port
pub const PORT_ENV: &str = "PORT";

const MOBILE_AGENT_MARKERS: [&str; 6] = ["mobile", "android", "iphone", "ipad", "ipod", "windows phone"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub assessment: AssessmentConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Remote prediction endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Tried in order when the primary fails
    pub backup_urls: Vec<String>,
    pub timeout_secs: u64,
    pub encoding: Encoding,
    pub user_agent: Option<String>,
    /// Retry the primary once over plain http after every other attempt failed
    pub insecure_fallback: bool,
}

/// Where predictions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Remote,
    Local,
    Mock,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Remote => "remote",
            Mode::Local => "local",
            Mode::Mock => "mock",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentConfig {
    pub mode: Mode,
}

/// Scoring service bind settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            backup_urls: Vec::new(),
            timeout_secs: 30,
            encoding: Encoding::Labels,
            user_agent: None,
            insecure_fallback: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

impl Config {
    /// Load configuration, creating the default file if it doesn't exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            let config = Config::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", config_path.display()))?;

        Ok(config)
    }

    /// Save configuration to the given file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;

        Ok(home.join(".mindcheck").join("config.toml"))
    }

    /// Apply `MINDCHECK_API_URL` and `PORT` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(PORT_ENV).ok(),
        );
    }

    /// Apply override values; blank or unparsable values are ignored
    pub fn apply_overrides(&mut self, api_url: Option<String>, port: Option<String>) {
        if let Some(url) = api_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            self.api.base_url = url;
        }
        if let Some(port) = port.and_then(|p| p.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
    }

    /// Validate values that would otherwise fail late
    pub fn validate(&self) -> Result<()> {
        for url in std::iter::once(&self.api.base_url).chain(self.api.backup_urls.iter()) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("API URL must start with http:// or https://: {}", url);
            }
        }
        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Whether the final plain-http attempt is enabled
    pub fn downgrade_enabled(&self) -> bool {
        self.api.insecure_fallback
            || self.api.user_agent.as_deref().map(is_mobile_agent).unwrap_or(false)
    }
}

/// Whether a user agent string identifies a mobile client
pub fn is_mobile_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_AGENT_MARKERS.iter().any(|m| ua.contains(m))
}
