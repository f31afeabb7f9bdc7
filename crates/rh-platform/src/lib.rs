//! RH Platform
//!
//! Employee records service:
//! - Employee CRUD over a relational store (SQLite or PostgreSQL)
//! - Audit trail of every insertion, update and removal in a separate
//!   partitioned table store (MongoDB or in-memory)
//! - REST API under `/Funcionario`, health probes and Swagger UI
//!
//! ## Module Organization (Aggregate-based)
//!
//! Each aggregate contains:
//! - `entity` - Domain entities
//! - `repository` / `store` - Data access and backend selection
//! - `api` - REST endpoints

pub mod app;
pub mod audit;
pub mod employee;
pub mod shared;

pub use app::{api_router, build_app};
pub use audit::{AuditAction, AuditLogEntry, AuditLogStore, InMemoryAuditLogStore, MongoAuditLogStore};
pub use employee::{Employee, EmployeeData, EmployeeRepository, EmployeeService};
pub use shared::{Result, RhError};
