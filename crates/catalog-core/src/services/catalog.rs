use std::sync::Arc;

use async_trait::async_trait;
use catalog_interfaces::ComponentCatalog;
use tracing::{debug, info, instrument};

use crate::adapters::McpComponentClient;
use crate::data::{
    CatalogError, CatalogInfo, CatalogResult, ComponentFilter, ComponentListItem, ComponentSpec,
    QueryPage, SearchOptions, ValidationReport,
};
use crate::services::query;
use crate::storage::CatalogStore;

/// The catalog as seen by consumers: a cached snapshot for browsing and,
/// when a provider is configured, live fetches for full component bodies.
pub struct CatalogService {
    store: Arc<CatalogStore>,
    remote: Option<Arc<McpComponentClient>>,
}

impl CatalogService {
    /// Service answering everything from the store
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self { store, remote: None }
    }

    /// Service fetching single components from `remote`
    pub fn with_remote(store: Arc<CatalogStore>, remote: Arc<McpComponentClient>) -> Self {
        Self {
            store,
            remote: Some(remote),
        }
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    pub fn is_remote(&self) -> bool {
        self.remote.is_some()
    }

    async fn fetch_remote(
        &self,
        remote: &McpComponentClient,
        name: &str,
        variant: Option<&str>,
    ) -> CatalogResult<ComponentSpec> {
        match remote.get_component(name, variant).await {
            // Same variant rules as a snapshot lookup: an undeclared variant is a miss
            Ok(spec) => match variant {
                Some(v) => query::apply_variant(&spec, v),
                None => Ok(spec),
            },
            Err(CatalogError::NotFound { name, suggestions }) if suggestions.is_empty() => {
                let snapshot = self.store.get().await;
                Err(CatalogError::NotFound {
                    suggestions: query::suggest(snapshot.list_items(), &name),
                    name,
                })
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl ComponentCatalog for CatalogService {
    #[instrument(skip(self))]
    async fn list_components(&self, filter: &ComponentFilter) -> CatalogResult<Vec<ComponentListItem>> {
        let snapshot = self.store.get().await;
        query::list(&snapshot, filter)
    }

    #[instrument(skip(self), fields(remote = self.remote.is_some()))]
    async fn get_component(&self, name: &str, variant: Option<&str>) -> CatalogResult<ComponentSpec> {
        if let Some(remote) = &self.remote {
            return self.fetch_remote(remote, name, variant).await;
        }

        let snapshot = self.store.get().await;
        let spec = query::get_by_name(&snapshot, name)?;
        debug!(component = %spec.name, "Resolved component from snapshot");
        match variant {
            Some(v) => query::apply_variant(spec, v),
            None => Ok(spec.clone()),
        }
    }

    #[instrument(skip(self))]
    async fn search_components(&self, options: &SearchOptions) -> CatalogResult<QueryPage<ComponentListItem>> {
        let snapshot = self.store.get().await;
        query::query(&snapshot, options)
    }

    async fn get_catalog_info(&self) -> CatalogResult<CatalogInfo> {
        Ok(self.store.info().await)
    }

    #[instrument(skip(self))]
    async fn reload_catalog(&self) -> CatalogResult<CatalogInfo> {
        info!("Reloading component catalog");
        self.store.invalidate();
        Ok(self.store.info().await)
    }

    async fn validate_catalog(&self) -> CatalogResult<ValidationReport> {
        self.store.validate().await
    }
}
