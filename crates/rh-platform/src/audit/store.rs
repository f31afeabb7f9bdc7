//! Audit Log Store
//!
//! Partitioned, upsert-only table store for audit entries.

use std::sync::Arc;

use async_trait::async_trait;
use rh_config::{AuditBackend, AuditConfig};
use tracing::info;

use crate::audit::entity::AuditLogEntry;
use crate::audit::memory::InMemoryAuditLogStore;
use crate::audit::mongo::MongoAuditLogStore;
use crate::shared::error::Result;

#[async_trait]
pub trait AuditLogStore: Send + Sync {
    /// Create the backing table if it is absent. Run once at startup.
    async fn ensure_table(&self) -> Result<()>;

    /// Insert or replace the entry identified by (partition key, row key)
    async fn upsert(&self, entry: &AuditLogEntry) -> Result<()>;

    /// Every entry of one partition, in store order
    async fn find_by_partition(&self, partition_key: &str) -> Result<Vec<AuditLogEntry>>;

    /// Cheap round trip used by the readiness probe
    async fn ping(&self) -> Result<()>;
}

/// Build the configured audit store. The table is not provisioned here.
pub async fn connect(config: &AuditConfig) -> Result<Arc<dyn AuditLogStore>> {
    info!(backend = ?config.backend, table = %config.table_name, "Opening audit log store");

    let store: Arc<dyn AuditLogStore> = match config.backend {
        AuditBackend::Mongodb => Arc::new(MongoAuditLogStore::connect(config).await?),
        AuditBackend::Memory => Arc::new(InMemoryAuditLogStore::new()),
    };
    Ok(store)
}
