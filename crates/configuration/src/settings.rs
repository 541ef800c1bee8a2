use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
}

/// Connection parameters for the PostgreSQL content store.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database_name: String,
    /// Maximum number of pooled connections shared by every request.
    pub pool_size: u32,
    /// How long a request waits for a pooled connection before giving up.
    /// This is the only timeout applied to the store; queries themselves are unbounded.
    /// While the store is unreachable every list read waits this long before
    /// falling back, so it is kept short (1s by default). Raise it only for
    /// stores that are slow to hand out connections under load.
    pub acquire_timeout_secs: u64,
}

impl DatabaseSettings {
    /// A log-safe description of the connection target (never includes the password).
    pub fn display_target(&self) -> String {
        format!(
            "{}@{}:{}/{}",
            self.username, self.host, self.port, self.database_name
        )
    }
}

/// Where the JSON API listens.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ConfigError::ValidationError(format!("server.host '{}' is not an IP address", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive, e.g. "info" or "database=debug,info".
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are additionally written to a daily rolling file here.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.host.trim().is_empty() {
            return Err(ConfigError::ValidationError("database.host must not be empty".into()));
        }
        if self.database.database_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.database_name must not be empty".into(),
            ));
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::ValidationError(
                "database.pool_size must be at least 1".into(),
            ));
        }
        self.server.socket_addr()?;
        Ok(())
    }
}
