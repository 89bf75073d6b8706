use serde::{Deserialize, Serialize};
use setlist_pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum LogLevel {
    #[serde(rename = "trace")]
    Trace,
    #[serde(rename = "debug")]
    Debug,
    #[default]
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "error")]
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// IP address the HTTP server binds to.
    #[serde(default = "default_server_ip")]
    pub ip: String,
    /// Port the HTTP server binds to.
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Logging level for the server.
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: default_server_ip(),
            port: default_server_port(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the archive's SQLite file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PaginationConfig {
    /// Rows per page unless the client asks for a different `max`.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    /// Largest `max` a client may ask for; anything above falls back to `page_size`.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
}

impl PaginationConfig {
    /// Page sizes must be positive and the default may not exceed the cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size < 1 {
            return Err(ConfigError::Invalid(format!(
                "pagination.page_size must be at least 1, got {}",
                self.page_size
            )));
        }
        if self.max_page_size < self.page_size {
            return Err(ConfigError::Invalid(format!(
                "pagination.max_page_size ({}) is smaller than pagination.page_size ({})",
                self.max_page_size, self.page_size
            )));
        }
        Ok(())
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

fn decode_from_path(path: &str) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|_| ConfigError::NotFound)?;
    decode(&content)
}

fn decode(content: &str) -> Result<Config, ConfigError> {
    let cfg: Config = toml::from_str(content).map_err(|e| ConfigError::Decode(e.message().into()))?;
    cfg.pagination.validate()?;
    Ok(cfg)
}

/// Load the config for the archive server, writing a default one to
/// `config_path` when none exists.
pub fn load_config(config_path: &str) -> anyhow::Result<Config> {
    match decode_from_path(config_path) {
        Ok(cfg) => Ok(cfg),
        Err(ConfigError::NotFound) => create_default_config(config_path),
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found")]
    NotFound,
    #[error("{0}")]
    Decode(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

pub fn create_default_config(config_path: &str) -> anyhow::Result<Config> {
    let cfg = Config::default();

    let toml_str = toml::to_string_pretty(&cfg)?;

    std::fs::write(config_path, toml_str)?;

    Ok(cfg)
}

fn default_db_path() -> String {
    "gratefuldata.db".into()
}

fn default_server_ip() -> String {
    "0.0.0.0".into()
}

fn default_server_port() -> u16 {
    8080
}

fn default_log_level() -> LogLevel {
    LogLevel::default()
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> i64 {
    MAX_PAGE_SIZE
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
