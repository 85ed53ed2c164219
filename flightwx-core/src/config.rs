use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// Placeholder shipped in sample configs; treated as "no key".
const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

/// Settings for the generative route provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteProviderConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for RouteProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }
}

/// Settings for the aviation weather data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self { base_url: "https://aviationweather.gov".to_string() }
    }
}

/// Limits applied to every outbound call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub max_concurrent_fetches: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 10, max_concurrent_fetches: 4 }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 5000 }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [route_provider]
/// api_key = "..."
/// model = "gemini-2.0-flash"
///
/// [http]
/// timeout_secs = 10
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub route_provider: RouteProviderConfig,
    pub weather: WeatherConfig,
    pub http: HttpConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
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
        let dirs = ProjectDirs::from("dev", "flightwx", "flightwx")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply `GEMINI_API_KEY` and `PORT` from the environment on top of the file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var("GEMINI_API_KEY").ok(),
            std::env::var("PORT").ok(),
        )
    }

    fn with_overrides(mut self, api_key: Option<String>, port: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.route_provider.api_key = Some(key);
        }
        if let Some(port) = port.and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
        self
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.route_provider.api_key = Some(api_key);
    }

    /// Returns the provider API key, ignoring blanks and the sample placeholder.
    pub fn api_key(&self) -> Option<&str> {
        self.route_provider
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    pub fn is_route_provider_configured(&self) -> bool {
        self.api_key().is_some()
    }
}
