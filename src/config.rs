use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::duration::{deserialize_duration, parse_duration};

const CONFIG_FILE_NAME: &str = "investment-report.toml";

fn default_investments_service_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_financial_companies_service_url() -> String {
    "http://localhost:8082".to_string()
}

/// Listening socket settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Default upstream request timeout (10 seconds).
fn default_request_timeout() -> Duration {
    Duration::from_secs(10)
}

/// Outbound HTTP settings shared by every upstream client.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Upper bound for each upstream call. A timeout counts as the upstream
    /// being unavailable.
    #[serde(
        default = "default_request_timeout",
        deserialize_with = "deserialize_duration"
    )]
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the investments service. Also hosts the export endpoint.
    pub investments_service_url: String,

    /// Base URL of the financial companies service.
    pub financial_companies_service_url: String,

    pub server: ServerConfig,

    pub http: HttpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            investments_service_url: default_investments_service_url(),
            financial_companies_service_url: default_financial_companies_service_url(),
            server: ServerConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config from a file, or return default config if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup.
    ///
    /// Recognized keys: `INVESTMENTS_SERVICE_URL`,
    /// `FINANCIAL_COMPANIES_SERVICE_URL`, `HOST`, `PORT`, `REQUEST_TIMEOUT`.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("INVESTMENTS_SERVICE_URL") {
            self.investments_service_url = url;
        }
        if let Some(url) = lookup("FINANCIAL_COMPANIES_SERVICE_URL") {
            self.financial_companies_service_url = url;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {port:?}"))?;
        }
        if let Some(timeout) = lookup("REQUEST_TIMEOUT") {
            self.http.request_timeout = parse_duration(&timeout)
                .with_context(|| format!("Invalid REQUEST_TIMEOUT value: {timeout:?}"))?;
        }
        Ok(self)
    }
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./investment-report.toml` if it exists in current directory
/// 2. `<config dir>/investment-report/investment-report.toml`
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from(CONFIG_FILE_NAME);
    if local_config.exists() {
        return local_config;
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("investment-report").join(CONFIG_FILE_NAME);
    }

    local_config
}
