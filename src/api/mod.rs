//! HTTP API module for the payroll document service.
//!
//! This module provides the REST endpoints a presentation layer uses to
//! trigger refreshes and read the aggregated document collection.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::RefreshRequest;
pub use response::{ApiError, DocumentsResponse, RefreshResponse, StateResponse};
pub use state::AppState;
