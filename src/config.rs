use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

use crate::pipeline::MalformedDatePolicy;

/// Startup configuration failure
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Postgres connection settings
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
    }
}

/// Application configuration loaded from environment variables
#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub secret_key: String,
    pub database: DatabaseConfig,
    /// Directory holding the CSV snapshots
    pub data_dir: PathBuf,
    pub malformed_date_policy: MalformedDatePolicy,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("environment", &self.environment)
            .field("database", &self.database)
            .field("data_dir", &self.data_dir)
            .field("malformed_date_policy", &self.malformed_date_policy)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(var))
        };

        let secret_key = required("SECRET_KEY")?;
        let database = DatabaseConfig {
            name: required("DB_NAME")?,
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
            host: required("DB_HOST")?,
            port: parse_var(&lookup, "DB_PORT", "5432")?,
        };

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let server_port = parse_var(&lookup, "SERVER_PORT", "8050")?;
        let data_dir = lookup("DATA_DIR").unwrap_or_else(|| "files".to_string()).into();
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());

        let malformed_date_policy = parse_var(&lookup, "MALFORMED_DATE_POLICY", "skip")?;

        Ok(Config {
            server_host,
            server_port,
            environment,
            secret_key,
            database,
            data_dir,
            malformed_date_policy,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Cookies are only marked `Secure` when not running locally
    pub fn secure_cookies(&self) -> bool {
        !matches!(self.environment.as_str(), "development" | "test")
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
) -> Result<T, ConfigError> {
    let value = lookup(var).unwrap_or_else(|| default.to_string());
    value
        .parse()
        .map_err(|_| ConfigError::Invalid { var, value })
}
