//! Configuration loading for the payroll document service.
//!
//! This module provides functionality to load the service configuration
//! from a YAML file: the remote payroll service endpoint settings and the
//! local cache location.
//!
//! # Example
//!
//! ```no_run
//! use stv_paydocs::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/stv.yaml").unwrap();
//! println!("Remote base URL: {}", config.remote().base_url);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CacheConfig, RemoteConfig, RetryConfig, ServiceConfig};
