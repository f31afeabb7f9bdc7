//! In-memory Audit Log Store
//!
//! Process-local table with the same upsert semantics as the MongoDB store.
//! Entries are returned in insertion order. Nothing survives a restart.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::audit::entity::AuditLogEntry;
use crate::audit::store::AuditLogStore;
use crate::shared::error::Result;

#[derive(Default)]
pub struct InMemoryAuditLogStore {
    entries: RwLock<Vec<AuditLogEntry>>,
}

impl InMemoryAuditLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Copy of every entry across all partitions
    pub fn all(&self) -> Vec<AuditLogEntry> {
        self.entries.read().clone()
    }
}

#[async_trait]
impl AuditLogStore for InMemoryAuditLogStore {
    async fn ensure_table(&self) -> Result<()> {
        Ok(())
    }

    async fn upsert(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut entries = self.entries.write();
        let existing = entries.iter_mut().find(|e| {
            e.partition_key == entry.partition_key && e.row_key == entry.row_key
        });

        match existing {
            Some(slot) => *slot = entry.clone(),
            None => entries.push(entry.clone()),
        }
        Ok(())
    }

    async fn find_by_partition(&self, partition_key: &str) -> Result<Vec<AuditLogEntry>> {
        Ok(self
            .entries
            .read()
            .iter()
            .filter(|e| e.partition_key == partition_key)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
