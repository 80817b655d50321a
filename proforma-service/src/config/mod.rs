use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::error::AppError;

/// Name of the optional configuration file (`configuration.yaml`, ...).
const CONFIG_FILE: &str = "configuration";

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub service_name: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Without a `url` the service runs in demo mode.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<Secret<String>>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub run_migrations: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            service_name: "proforma-service".to_string(),
            log_level: "info".to_string(),
            otlp_endpoint: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            min_connections: 1,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Connection URL, treating a blank value as absent.
    pub fn connection_url(&self) -> Option<&str> {
        self.url
            .as_ref()
            .map(|url| url.expose_secret().trim())
            .filter(|url| !url.is_empty())
    }
}

impl Config {
    /// Load from the optional configuration file and `APP_*` environment
    /// variables (`APP_SERVER__PORT`, `APP_DATABASE__URL`, ...).
    pub fn load() -> Result<Self, AppError> {
        service_core::config::load(CONFIG_FILE)
    }

    pub fn otlp_endpoint(&self) -> Option<&str> {
        self.otlp_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
    }
}
