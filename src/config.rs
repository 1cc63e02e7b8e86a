use std::env;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://activities.db?mode=rwc";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("DEFAULT_PAGE_SIZE ({default}) must be between 1 and MAX_PAGE_SIZE ({max})")]
    PageSizeRange { default: u32, max: u32 },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    /// Absolute base for generated hyperlinks, e.g. `https://api.example.org`.
    /// When unset the request `Host` header is used.
    pub public_base_url: Option<String>,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: 5,
            host: "127.0.0.1".to_string(),
            port: 3000,
            public_base_url: None,
            default_page_size: 5,
            max_page_size: 100,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source; `from_env` passes
    /// the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let config = Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                get("DATABASE_MAX_CONNECTIONS"),
                defaults.database_max_connections,
            )?,
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            public_base_url: get("PUBLIC_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string()),
            default_page_size: parse_or(
                "DEFAULT_PAGE_SIZE",
                get("DEFAULT_PAGE_SIZE"),
                defaults.default_page_size,
            )?,
            max_page_size: parse_or("MAX_PAGE_SIZE", get("MAX_PAGE_SIZE"), defaults.max_page_size)?,
        };

        if config.default_page_size == 0 || config.default_page_size > config.max_page_size {
            return Err(ConfigError::PageSizeRange {
                default: config.default_page_size,
                max: config.max_page_size,
            });
        }
        Ok(config)
    }
}

fn parse_or<T: FromStr>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}
