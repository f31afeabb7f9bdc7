//! Employee Repository
//!
//! Primary record store contract plus backend selection. Each backend lives
//! in its own module (`sqlite`, `postgres`).

use std::sync::Arc;

use async_trait::async_trait;
use rh_config::DatabaseConfig;
use tracing::info;

use crate::employee::entity::{Employee, EmployeeData};
use crate::employee::postgres::PostgresEmployeeRepository;
use crate::employee::sqlite::SqliteEmployeeRepository;
use crate::shared::error::{Result, RhError};

/// Table holding employee rows
pub const EMPLOYEE_TABLE: &str = "funcionarios";

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Create the employee table if it does not exist yet
    async fn init_schema(&self) -> Result<()>;

    /// Full scan, ordered by id
    async fn find_all(&self) -> Result<Vec<Employee>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Employee>>;

    /// Insert a new row and return it with the store-assigned id
    async fn insert(&self, data: &EmployeeData) -> Result<Employee>;

    /// Overwrite every mutable column. Returns false when no row had that id
    async fn update(&self, employee: &Employee) -> Result<bool>;

    /// Returns false when no row had that id
    async fn delete(&self, id: i32) -> Result<bool>;

    /// Cheap round trip used by the readiness probe
    async fn ping(&self) -> Result<()>;
}

/// Relational backend implied by a connection URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Sqlite,
    Postgres,
}

impl DatabaseKind {
    pub fn from_url(url: &str) -> Option<Self> {
        let scheme = url.split(':').next()?.to_ascii_lowercase();
        match scheme.as_str() {
            "sqlite" => Some(Self::Sqlite),
            "postgres" | "postgresql" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Open a pool for the configured database and wrap it in the matching repository.
///
/// The schema is not touched here; callers run `init_schema` once at startup.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn EmployeeRepository>> {
    let kind = DatabaseKind::from_url(&config.url).ok_or_else(|| {
        RhError::configuration(format!("unsupported database url: {}", config.url))
    })?;

    info!(backend = ?kind, "Connecting to employee database");

    let repo: Arc<dyn EmployeeRepository> = match kind {
        DatabaseKind::Sqlite => {
            let pool = sqlx::sqlite::SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.url)
                .await?;
            Arc::new(SqliteEmployeeRepository::new(pool))
        }
        DatabaseKind::Postgres => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.url)
                .await?;
            Arc::new(PostgresEmployeeRepository::new(pool))
        }
    };

    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_kind_from_url() {
        assert_eq!(DatabaseKind::from_url("sqlite::memory:"), Some(DatabaseKind::Sqlite));
        assert_eq!(DatabaseKind::from_url("sqlite://rh.db?mode=rwc"), Some(DatabaseKind::Sqlite));
        assert_eq!(DatabaseKind::from_url("postgres://u:p@h/db"), Some(DatabaseKind::Postgres));
        assert_eq!(DatabaseKind::from_url("PostgreSQL://h/db"), Some(DatabaseKind::Postgres));
        assert_eq!(DatabaseKind::from_url("mssql://h/db"), None);
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        let config = DatabaseConfig {
            url: "mssql://localhost/rh".to_string(),
            max_connections: 1,
        };
        let result = connect(&config).await;
        assert!(matches!(result, Err(RhError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_connect_sqlite_memory() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };
        let repo = connect(&config).await.unwrap();
        repo.init_schema().await.unwrap();
        repo.ping().await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
