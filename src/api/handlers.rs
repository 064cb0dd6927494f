//! HTTP request handlers for the payroll document API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use super::request::RefreshRequest;
use super::response::{ApiError, ApiErrorResponse, DocumentsResponse, RefreshResponse, StateResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/documents/refresh", post(refresh_handler))
        .route("/documents", get(documents_handler))
        .route("/documents/state", get(state_handler))
        .with_state(state)
}

/// Handler for POST /documents/refresh.
///
/// Runs a full refresh for the requested year and returns the resulting
/// collection. Individual document failures do not fail the request; only
/// an invalid year or an overlapping refresh does.
async fn refresh_handler(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    info!(
        correlation_id = %correlation_id,
        year = request.year,
        "Processing refresh request"
    );

    let start_time = Instant::now();
    match state.aggregator().refresh_for_year(request.year).await {
        Ok(()) => {
            let documents = state.aggregator().documents();
            info!(
                correlation_id = %correlation_id,
                year = request.year,
                count = documents.len(),
                duration_ms = start_time.elapsed().as_millis() as u64,
                "Refresh completed"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(RefreshResponse {
                    year: request.year,
                    documents,
                }),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                year = request.year,
                error = %err,
                "Refresh failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Handler for GET /documents.
async fn documents_handler(State(state): State<AppState>) -> Json<DocumentsResponse> {
    Json(DocumentsResponse {
        documents: state.aggregator().documents(),
    })
}

/// Handler for GET /documents/state.
async fn state_handler(State(state): State<AppState>) -> Json<StateResponse> {
    Json(StateResponse {
        state: state.aggregator().state(),
    })
}
