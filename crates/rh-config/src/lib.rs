//! RH Service Configuration
//!
//! TOML-based configuration with environment variable overrides. The
//! resulting [`AppConfig`] is passed explicitly to whatever needs it; there is
//! no process-wide configuration state.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod loader;

pub use loader::ConfigLoader;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Root application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub audit: AuditConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub port: u16,
    pub host: String,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Relational store holding employee rows
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx connection URL; the scheme selects the backend (`sqlite:` or `postgres:`)
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://rh.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

/// Backend used for the audit log table store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditBackend {
    Mongodb,
    Memory,
}

impl AuditBackend {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "mongodb" | "mongo" => Some(Self::Mongodb),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Audit log table store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub backend: AuditBackend,
    pub connection_string: String,
    pub database: String,
    /// Collection holding the audit entries
    pub table_name: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            backend: AuditBackend::Mongodb,
            connection_string: "mongodb://localhost:27017".to_string(),
            database: "rh".to_string(),
            table_name: "FuncionarioLog".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from the standard locations with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load()
    }

    /// Check the values the server cannot start without
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::ValidationError("http.port must be non-zero".to_string()));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::ValidationError("database.url is required".to_string()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        if self.audit.table_name.trim().is_empty() {
            return Err(ConfigError::ValidationError("audit.table_name is required".to_string()));
        }
        if self.audit.backend == AuditBackend::Mongodb
            && self.audit.connection_string.trim().is_empty()
        {
            return Err(ConfigError::ValidationError(
                "audit.connection_string is required for the mongodb backend".to_string(),
            ));
        }
        Ok(())
    }

    /// Generate an example TOML configuration
    pub fn example_toml() -> String {
        r#"# RH Service Configuration
# Environment variables (RH_*) override these settings

[http]
port = 8080
host = "0.0.0.0"
cors_origins = []

[database]
url = "postgres://rh:rh@localhost:5432/rh"
max_connections = 5

[audit]
backend = "mongodb"
connection_string = "mongodb://localhost:27017"
database = "rh"
table_name = "FuncionarioLog"
"#
        .to_string()
    }
}
