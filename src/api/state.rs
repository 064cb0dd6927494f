//! Application state for the payroll document API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::aggregator::DocumentAggregator;
use crate::cache::CacheStore;
use crate::config::ServiceConfig;
use crate::error::ServiceResult;
use crate::remote::HttpPayrollService;

/// Shared application state.
///
/// Holds the document aggregator built for the signed-in employee; the
/// portal serves one employee per deployment, like the mobile app it backs.
#[derive(Clone)]
pub struct AppState {
    aggregator: Arc<DocumentAggregator>,
}

impl AppState {
    /// Creates a new application state around the given aggregator.
    pub fn new(aggregator: Arc<DocumentAggregator>) -> Self {
        Self { aggregator }
    }

    /// Builds the application state from the service configuration, wiring
    /// an [`HttpPayrollService`] and a [`CacheStore`] into a
    /// [`DocumentAggregator`] for the given employee.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stv_paydocs::api::AppState;
    /// use stv_paydocs::config::ConfigLoader;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let loader = ConfigLoader::load("config/stv.yaml")?;
    /// let state = AppState::from_config(loader.config(), "43393")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_config(config: &ServiceConfig, person_id: impl Into<String>) -> ServiceResult<Self> {
        let service = Arc::new(HttpPayrollService::new(&config.remote)?);
        let cache = CacheStore::open(&config.cache.dir)?;
        Ok(Self::new(Arc::new(DocumentAggregator::new(
            service, cache, person_id,
        ))))
    }

    /// Returns a reference to the document aggregator.
    pub fn aggregator(&self) -> &DocumentAggregator {
        &self.aggregator
    }
}
