//! MongoDB Audit Log Store

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{IndexOptions, ReplaceOptions},
    Client, Collection, Database, IndexModel,
};
use rh_config::AuditConfig;
use tracing::{debug, info};

use crate::audit::entity::AuditLogEntry;
use crate::audit::store::AuditLogStore;
use crate::shared::error::Result;

pub struct MongoAuditLogStore {
    db: Database,
    collection: Collection<AuditLogEntry>,
    table_name: String,
}

impl MongoAuditLogStore {
    pub fn new(db: &Database, table_name: &str) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection(table_name),
            table_name: table_name.to_string(),
        }
    }

    /// Open a client from the configured connection string.
    ///
    /// The driver connects lazily; the first command surfaces connectivity errors.
    pub async fn connect(config: &AuditConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.connection_string).await?;
        let db = client.database(&config.database);
        Ok(Self::new(&db, &config.table_name))
    }
}

#[async_trait]
impl AuditLogStore for MongoAuditLogStore {
    async fn ensure_table(&self) -> Result<()> {
        let existing = self.db.list_collection_names().await?;
        if !existing.iter().any(|name| name == &self.table_name) {
            self.db.create_collection(&self.table_name).await?;
            info!(table = %self.table_name, "Created audit log collection");
        }

        let index = IndexModel::builder()
            .keys(doc! { "partitionKey": 1 })
            .options(IndexOptions::builder().name("idx_partition".to_string()).build())
            .build();
        self.collection.create_index(index).await?;

        Ok(())
    }

    async fn upsert(&self, entry: &AuditLogEntry) -> Result<()> {
        self.collection
            .replace_one(
                doc! { "_id": &entry.row_key, "partitionKey": &entry.partition_key },
                entry,
            )
            .with_options(ReplaceOptions::builder().upsert(true).build())
            .await?;

        debug!(partition_key = %entry.partition_key, row_key = %entry.row_key, "Upserted audit entry");
        Ok(())
    }

    async fn find_by_partition(&self, partition_key: &str) -> Result<Vec<AuditLogEntry>> {
        let cursor = self
            .collection
            .find(doc! { "partitionKey": partition_key })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn ping(&self) -> Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
