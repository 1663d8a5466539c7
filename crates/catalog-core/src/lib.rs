//! Component Catalog Core Implementation
//!
//! Loads heterogeneous component descriptors from a static file or a remote
//! MCP provider, normalizes them into the strict schema of
//! `catalog-interfaces`, caches the result with a TTL and answers queries
//! against the cached snapshot.

// Core modules
pub mod config;
pub mod data;
pub mod normalize;
pub mod services;
pub mod storage;
pub mod traits;

// Remote provider adapters
pub mod adapters;

// Testing utilities - make this available during testing
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use std::sync::Arc;

use tracing::info;

// Re-export key types for convenient usage
pub use adapters::{McpCatalogSource, McpComponentClient};
pub use config::{CatalogConfig, ClientConfig};
pub use data::{CatalogSnapshot, RawCatalog};
pub use normalize::{normalize_catalog, normalize_component, normalize_list_item, NormalizedCatalog};
pub use services::CatalogService;
pub use storage::{CatalogStore, InMemorySource, StaticFileSource, StoreConfig};
pub use traits::{CatalogSource, Clock, SystemClock};

pub use catalog_interfaces::{CatalogError, CatalogResult, ComponentCatalog};

/// Initialize tracing for the catalog
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
}

/// Creates a CatalogService backed by the remote provider when it is
/// enabled, otherwise by the static catalog file.
pub fn create_catalog_service(config: &CatalogConfig) -> Result<CatalogService, CatalogError> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    if config.client.enabled {
        let client = Arc::new(McpComponentClient::new(config.client.clone())?);
        let source = Arc::new(McpCatalogSource::new(Arc::clone(&client)));
        let store = CatalogStore::new(source, clock, config.store_config());
        info!(endpoint = %config.client.endpoint, "Catalog service using remote provider");
        return Ok(CatalogService::with_remote(Arc::new(store), client));
    }

    let source = Arc::new(StaticFileSource::new(&config.static_catalog_path));
    let store = CatalogStore::new(source, clock, config.store_config());
    info!(path = %config.static_catalog_path.display(), "Catalog service using static catalog");
    Ok(CatalogService::new(Arc::new(store)))
}
