//! Platform Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum RhError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("No {entity_type} records found")]
    NoRecords { entity_type: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Audit store error: {0}")]
    AuditStore(#[from] mongodb::error::Error),

    #[error("Invalid persisted data: {message}")]
    InvalidData { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl RhError {
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn no_records(entity_type: impl Into<String>) -> Self {
        Self::NoRecords { entity_type: entity_type.into() }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData { message: message.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// True for the "absent entity or collection" family mapped to 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NoRecords { .. })
    }
}

pub type Result<T> = std::result::Result<T, RhError>;

/// Error response body
#[derive(Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for RhError {
    fn into_response(self) -> Response {
        let (status, error_type) = if self.is_not_found() {
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
