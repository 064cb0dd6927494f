//! Request types for the payroll document API.
//!
//! This module defines the JSON request structures for the
//! `/documents/refresh` endpoint.

use serde::{Deserialize, Serialize};

/// Request body for the `/documents/refresh` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// The calendar year to refresh documents for.
    pub year: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_refresh_request() {
        let request: RefreshRequest = serde_json::from_str(r#"{"year":2024}"#).unwrap();
        assert_eq!(request.year, 2024);
    }

    #[test]
    fn test_missing_year_is_rejected() {
        let result = serde_json::from_str::<RefreshRequest>("{}");
        assert!(result.is_err());
    }
}
