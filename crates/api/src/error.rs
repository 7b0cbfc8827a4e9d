//! API Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use climate_storage::StorageError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the server and its handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Data store failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Listener or socket failure
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),

    /// Prometheus recorder could not be installed
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Global tracing subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::Config(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Storage(StorageError::NoData) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
