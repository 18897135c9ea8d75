use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Chartline";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
/// Notifications returned per doctor inbox request.
pub const DEFAULT_NOTIFICATION_LIMIT: u32 = 100;
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;

pub const ENV_ADDR: &str = "CHARTLINE_ADDR";
pub const ENV_DB: &str = "CHARTLINE_DB";
pub const ENV_ALLOWED_ORIGIN: &str = "CHARTLINE_ALLOWED_ORIGIN";
pub const ENV_MAX_DOCUMENT_BYTES: &str = "CHARTLINE_MAX_DOCUMENT_BYTES";
pub const ENV_NOTIFICATION_LIMIT: &str = "CHARTLINE_NOTIFICATION_LIMIT";

/// Filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "chartline_lib=info,tower_http=info"
}

/// Get the application data directory.
/// Platform data dir (e.g. ~/.local/share/Chartline), falling back to the
/// working directory when the platform has none.
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

pub fn default_database_path() -> PathBuf {
    app_data_dir().join("chartline.db")
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub database_path: PathBuf,
    pub notification_limit: u32,
    pub max_document_bytes: usize,
    /// `None` allows any origin.
    pub allowed_origin: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            database_path: default_database_path(),
            notification_limit: DEFAULT_NOTIFICATION_LIMIT,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            allowed_origin: None,
        }
    }
}

impl ServiceConfig {
    /// Defaults overridden by `CHARTLINE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServiceConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_ADDR) {
            config.bind_addr = parse_value(ENV_ADDR, &value)?;
        }
        if let Some(value) = lookup(ENV_DB) {
            if value.trim().is_empty() {
                return Err(invalid(ENV_DB, &value));
            }
            config.database_path = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_NOTIFICATION_LIMIT) {
            config.notification_limit = parse_value(ENV_NOTIFICATION_LIMIT, &value)?;
            if config.notification_limit == 0 {
                return Err(invalid(ENV_NOTIFICATION_LIMIT, &value));
            }
        }
        if let Some(value) = lookup(ENV_MAX_DOCUMENT_BYTES) {
            config.max_document_bytes = parse_value(ENV_MAX_DOCUMENT_BYTES, &value)?;
            if config.max_document_bytes == 0 {
                return Err(invalid(ENV_MAX_DOCUMENT_BYTES, &value));
            }
        }
        if let Some(value) = lookup(ENV_ALLOWED_ORIGIN) {
            let origin = value.trim();
            if origin == "*" || origin.is_empty() {
                config.allowed_origin = None;
            } else if axum::http::HeaderValue::from_str(origin).is_ok() {
                config.allowed_origin = Some(origin.to_string());
            } else {
                return Err(invalid(ENV_ALLOWED_ORIGIN, &value));
            }
        }

        Ok(config)
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}
