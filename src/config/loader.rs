//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{ServiceError, ServiceResult};

use super::types::{CacheConfig, RemoteConfig, ServiceConfig};

/// Loads and provides access to the service configuration.
///
/// # Example
///
/// ```no_run
/// use stv_paydocs::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/stv.yaml")?;
/// println!("Remote base URL: {}", loader.remote().base_url);
/// println!("Cache directory: {}", loader.cache().dir.display());
/// # Ok::<(), stv_paydocs::error::ServiceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ServiceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file (e.g., "./config/stv.yaml")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if the file
    /// is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> ServiceResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ServiceError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config =
            serde_yaml::from_str(&content).map_err(|e| ServiceError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(Self { config })
    }

    /// Returns the underlying service configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the remote payroll service settings.
    pub fn remote(&self) -> &RemoteConfig {
        &self.config.remote
    }

    /// Returns the local cache settings.
    pub fn cache(&self) -> &CacheConfig {
        &self.config.cache
    }
}
