//! Audit Log Aggregate
//!
//! Append-style history of employee mutations, kept in a partitioned table
//! store separate from the employee database.

pub mod entity;
pub mod memory;
pub mod mongo;
pub mod store;

pub use entity::{AuditAction, AuditLogEntry};
pub use memory::InMemoryAuditLogStore;
pub use mongo::MongoAuditLogStore;
pub use store::AuditLogStore;
