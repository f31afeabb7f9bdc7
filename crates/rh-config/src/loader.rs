//! Configuration loader with file and environment variable support

use crate::{AppConfig, AuditBackend, ConfigError};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// Standard config file search paths
const CONFIG_PATHS: &[&str] = &[
    "config.toml",
    "rh.toml",
    "./config/config.toml",
    "/etc/rh/config.toml",
];

/// Configuration loader
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Create a loader with a specific config file path
    pub fn with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Defaults, then the first config file found, then `RH_*` environment overrides
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        self.load_with(|key| env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with a custom variable lookup
    pub fn load_with<F>(&self, lookup: F) -> Result<AppConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = self.find_config_file(&lookup) {
            info!(?path, "Loading configuration from file");
            config = AppConfig::from_file(&path)?;
        }

        apply_overrides(&mut config, &lookup)?;

        Ok(config)
    }

    fn find_config_file<F>(&self, lookup: &F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = &self.config_path {
            if path.exists() {
                return Some(path.clone());
            }
        }

        if let Some(path) = lookup("RH_CONFIG").map(PathBuf::from) {
            if path.exists() {
                return Some(path);
            }
        }

        CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }
}

fn apply_overrides<F>(config: &mut AppConfig, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // HTTP
    if let Some(val) = lookup("RH_HTTP_PORT") {
        config.http.port = val
            .parse()
            .map_err(|_| ConfigError::EnvError(format!("RH_HTTP_PORT is not a port: {val}")))?;
    }
    if let Some(val) = lookup("RH_HTTP_HOST") {
        config.http.host = val;
    }
    if let Some(val) = lookup("RH_CORS_ORIGINS") {
        config.http.cors_origins = val
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    // Relational store
    if let Some(val) = lookup("RH_DATABASE_URL") {
        config.database.url = val;
    }
    if let Some(val) = lookup("RH_DATABASE_MAX_CONNECTIONS") {
        config.database.max_connections = val.parse().map_err(|_| {
            ConfigError::EnvError(format!("RH_DATABASE_MAX_CONNECTIONS is not a count: {val}"))
        })?;
    }

    // Audit table store
    if let Some(val) = lookup("RH_AUDIT_BACKEND") {
        config.audit.backend = AuditBackend::parse(&val)
            .ok_or_else(|| ConfigError::EnvError(format!("unknown RH_AUDIT_BACKEND: {val}")))?;
    }
    if let Some(val) = lookup("RH_AUDIT_CONNECTION_STRING") {
        config.audit.connection_string = val;
    }
    if let Some(val) = lookup("RH_AUDIT_DATABASE") {
        config.audit.database = val;
    }
    if let Some(val) = lookup("RH_AUDIT_TABLE_NAME") {
        config.audit.table_name = val;
    }

    Ok(())
}
