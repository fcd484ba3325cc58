//! Server configuration read from the environment at startup.

use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Settings for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `PostgreSQL` connection string (`DATABASE_URL`).
    pub database_url: String,
    /// Interface to bind (`HOST`).
    pub host: String,
    /// Port to bind (`PORT`).
    pub port: u16,
    /// Pool size (`DATABASE_MAX_CONNECTIONS`).
    pub database_max_connections: u32,
    /// Whether to apply embedded migrations at boot (`RUN_MIGRATIONS`).
    pub run_migrations: bool,
    /// OTLP collector endpoint (`OTEL_EXPORTER_OTLP_ENDPOINT`). Span export
    /// is off when unset.
    pub otlp_endpoint: Option<String>,
}

impl ServerConfig {
    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// a variable or `None` if it is unset.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config("DATABASE_URL environment variable must be set".to_owned())
            })?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => DEFAULT_PORT,
        };

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(0) | Err(_) => {
                    return Err(AppError::Config(format!(
                        "DATABASE_MAX_CONNECTIONS must be a positive integer, got {raw:?}"
                    )));
                }
                Ok(n) => n,
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::Config(format!("RUN_MIGRATIONS must be true or false, got {raw:?}"))
            })?,
            None => true,
        };

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
            database_max_connections,
            run_migrations,
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.trim().is_empty()),
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
