//! Error types for the payroll document service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while aggregating documents.

use thiserror::Error;

/// The main error type for the payroll document service.
///
/// All operations in the crate return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use stv_paydocs::error::ServiceError;
///
/// let error = ServiceError::InvalidYear { year: 2031, current_year: 2026 };
/// assert_eq!(
///     error.to_string(),
///     "Invalid year 2031: refreshes accept four-digit years up to 2026"
/// );
/// ```
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A refresh was requested for a year after the current calendar year,
    /// or for a year with fewer than four digits.
    #[error("Invalid year {year}: refreshes accept four-digit years up to {current_year}")]
    InvalidYear {
        /// The rejected year.
        year: i32,
        /// The current calendar year at the time of the request.
        current_year: i32,
    },

    /// A refresh was requested while another refresh was still running.
    #[error("Refresh for year {year} rejected: another refresh is in flight")]
    RefreshInFlight {
        /// The year of the rejected request.
        year: i32,
    },

    /// An in-flight refresh was cancelled before it completed.
    #[error("Refresh for year {year} was cancelled")]
    RefreshCancelled {
        /// The year of the cancelled refresh.
        year: i32,
    },

    /// The remote service replied with a payload in an unrecognized format.
    #[error("Unexpected payload from '{endpoint}': {message}")]
    UnexpectedPayload {
        /// The endpoint that produced the payload.
        endpoint: String,
        /// A description of what made the payload unrecognizable.
        message: String,
    },

    /// A network or transport-level failure while calling the remote service.
    #[error("Transport failure calling '{endpoint}': {message}")]
    Transport {
        /// The endpoint that was being called.
        endpoint: String,
        /// A description of the transport failure.
        message: String,
    },

    /// The local cache could not be read or written.
    #[error("Cache failure for key '{key}': {message}")]
    Cache {
        /// The cache key involved.
        key: String,
        /// A description of the cache failure.
        message: String,
    },
}

/// A type alias for Results that return ServiceError.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_year_displays_bounds() {
        let error = ServiceError::InvalidYear {
            year: 2031,
            current_year: 2026,
        };
        assert_eq!(
            error.to_string(),
            "Invalid year 2031: refreshes accept four-digit years up to 2026"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = ServiceError::ConfigNotFound {
            path: "/missing/stv.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/stv.yaml"
        );
    }

    #[test]
    fn test_refresh_in_flight_displays_year() {
        let error = ServiceError::RefreshInFlight { year: 2024 };
        assert_eq!(
            error.to_string(),
            "Refresh for year 2024 rejected: another refresh is in flight"
        );
    }

    #[test]
    fn test_unexpected_payload_displays_endpoint_and_message() {
        let error = ServiceError::UnexpectedPayload {
            endpoint: "folha_pagamento_html.php".to_string(),
            message: "trailing line is not JSON".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unexpected payload from 'folha_pagamento_html.php': trailing line is not JSON"
        );
    }

    #[test]
    fn test_transport_displays_endpoint() {
        let error = ServiceError::Transport {
            endpoint: "folha_pagamento_tem_ferias.php".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Transport failure calling 'folha_pagamento_tem_ferias.php': connection refused"
        );
    }

    #[test]
    fn test_cache_displays_key_and_message() {
        let error = ServiceError::Cache {
            key: "paychecks".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cache failure for key 'paychecks': permission denied"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ServiceError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_year() -> ServiceResult<()> {
            Err(ServiceError::InvalidYear {
                year: 2099,
                current_year: 2026,
            })
        }

        fn propagates_error() -> ServiceResult<()> {
            returns_invalid_year()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
