//! Shared Module
//!
//! Cross-cutting concerns: errors and health endpoints.

pub mod error;
pub mod health_api;

pub use error::{ErrorResponse, Result, RhError};
pub use health_api::{health_router, HealthState};
