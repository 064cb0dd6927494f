//! Configuration schema types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Remote payroll service settings.
    pub remote: RemoteConfig,
    /// Local cache settings.
    pub cache: CacheConfig,
}

/// Settings for the remote payroll web service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the web service, e.g. `https://host/dev/STV/ws/v1/`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Retry policy for transport failures.
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Bounded retry policy for transport failures and 5xx replies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempt budget per request (first try included).
    pub max_attempts: u32,
    /// Base backoff between attempts, in milliseconds; grows linearly with
    /// the attempt number.
    pub backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_ms: 500,
        }
    }
}

/// Settings for the local document cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding the cache files.
    pub dir: PathBuf,
}

fn default_timeout_secs() -> u64 {
    30
}
