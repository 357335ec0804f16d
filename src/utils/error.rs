//! Unified error handling
//!
//! Application-level error type with its HTTP mapping:
//!
//! | Variant | Status | Meaning |
//! |---------|--------|---------|
//! | `Validation` | 400 | Missing required submission fields |
//! | `NoOrders` | 404 | Export requested with zero orders (benign) |
//! | `Persistence` | 500 | Order store write failure |
//! | `Export` | 500 | Workbook generation failure |
//! | `Internal` | 500 | Anything else |
//!
//! Error responses use the `{"error": "..."}` body shape the front-end
//! already consumes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    /// Missing required fields (400)
    Validation(String),

    #[error("No orders to download")]
    /// Export requested while the queue is empty (404)
    NoOrders,

    #[error("Persistence error: {0}")]
    /// Order store write failure (500)
    Persistence(String),

    #[error("Export error: {0}")]
    /// Workbook generation failure (500)
    Export(String),

    #[error("Internal server error: {0}")]
    /// Unexpected failure (500)
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            AppError::NoOrders => (
                StatusCode::NOT_FOUND,
                "No orders to download".to_string(),
            ),

            // 5xx details go to the log, not the client
            AppError::Persistence(msg) => {
                error!(target: "store", error = %msg, "Persistence failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error saving order".to_string(),
                )
            }

            AppError::Export(msg) => {
                error!(target: "export", error = %msg, "Export failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error generating Excel file".to_string(),
                )
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorBody { error: message });
        (status, body).into_response()
    }
}
