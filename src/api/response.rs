//! Response types for the payroll document API.
//!
//! This module defines the success payloads, the error response structure,
//! and the mapping from domain errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::aggregator::LoadState;
use crate::error::ServiceError;
use crate::models::PayrollDocument;

/// Success payload of the `/documents/refresh` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// The year the refresh covered.
    pub year: i32,
    /// The refreshed document collection, in fetch order.
    pub documents: Vec<PayrollDocument>,
}

/// Success payload of the `/documents` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsResponse {
    /// The current document collection, in fetch order.
    pub documents: Vec<PayrollDocument>,
}

/// Success payload of the `/documents/state` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateResponse {
    /// The aggregator's current loading state.
    pub state: LoadState,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ServiceError> for ApiErrorResponse {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::InvalidYear { year, current_year } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_YEAR",
                    format!("Invalid year {}", year),
                    format!("Refreshes accept four-digit years up to {}", current_year),
                ),
            },
            ServiceError::RefreshInFlight { year } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "REFRESH_IN_FLIGHT",
                    format!("Refresh for year {} rejected", year),
                    "Another refresh is in flight; retry once it completes",
                ),
            },
            ServiceError::RefreshCancelled { year } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new(
                    "REFRESH_CANCELLED",
                    format!("Refresh for year {} was cancelled", year),
                ),
            },
            ServiceError::UnexpectedPayload { endpoint, message } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "UNEXPECTED_PAYLOAD",
                    format!("Unexpected payload from '{}'", endpoint),
                    message,
                ),
            },
            ServiceError::Transport { endpoint, message } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "UPSTREAM_UNAVAILABLE",
                    format!("Transport failure calling '{}'", endpoint),
                    message,
                ),
            },
            ServiceError::Cache { key, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CACHE_ERROR",
                    format!("Cache failure for key '{}'", key),
                    message,
                ),
            },
            ServiceError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            ServiceError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}
