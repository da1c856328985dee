//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::store::StoreError;
use crate::workflow::{FinalizeError, WorkflowError};

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invoice not found: {0}")]
    InvoiceNotFound(u32),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Finalize(#[from] FinalizeError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // 404 Not Found
            AppError::InvoiceNotFound(number) => (
                StatusCode::NOT_FOUND,
                "invoice_not_found",
                Some(number.to_string()),
            ),
            AppError::Workflow(WorkflowError::NotFound { email, date }) => (
                StatusCode::NOT_FOUND,
                "order_not_found",
                Some(format!("{email} / {date}")),
            ),

            // 503 Service Unavailable - nothing was written
            AppError::Workflow(WorkflowError::DataUnavailable(e)) => {
                tracing::error!("Collection read failed: {e}");
                (StatusCode::SERVICE_UNAVAILABLE, "data_unavailable", None)
            }
            AppError::Finalize(FinalizeError::InvoiceNotCreated(e)) => {
                tracing::error!("Invoice insert failed: {e}");
                (StatusCode::SERVICE_UNAVAILABLE, "invoice_not_created", None)
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (StatusCode::SERVICE_UNAVAILABLE, "store_error", None)
            }

            // 500 - the invoice exists; retrying would mint a second one,
            // so these carry their own code and full detail for the
            // operator.
            AppError::Finalize(e @ FinalizeError::SubmissionsUnread { .. })
            | AppError::Finalize(e @ FinalizeError::PartialRetirement { .. }) => {
                tracing::error!("Partial finalization: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "partial_finalization",
                    Some(e.to_string()),
                )
            }

            AppError::Config(e) => {
                tracing::error!("Config error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "config_error", None)
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_a_normal_outcome() {
        let err = AppError::Workflow(WorkflowError::NotFound {
            email: "a@x.com".to_string(),
            date: "2024-01-01".to_string(),
        });

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_partial_finalization_has_distinct_error_code() {
        let err = AppError::Finalize(FinalizeError::PartialRetirement {
            invoice_number: 123456,
            total: 2,
            failed: vec![],
        });

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
