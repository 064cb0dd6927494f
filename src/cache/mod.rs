//! Local key-value cache for aggregated documents.
//!
//! The store is a string-keyed map of serialized values that survives
//! process restarts, the service-side analog of the mobile portal's local
//! storage. Every value is wrapped in a versioned envelope so the on-disk
//! schema can migrate safely.

mod store;

pub use store::{CACHE_VERSION, CacheStore, DOCUMENTS_KEY, SELECTED_YEAR_KEY};
