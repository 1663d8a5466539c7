//! Catalog contract for agent tools and HTTP handlers
//!
//! The tool layer only ever talks to the catalog through `ComponentCatalog`;
//! transports (tool calls, HTTP routes) are implemented elsewhere.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogResult, ErrorCode};
use crate::model::{ComponentListItem, ComponentSpec};

/// Page size used when the caller does not specify one
pub const DEFAULT_LIMIT: usize = 50;

/// Largest page size a caller may request
pub const MAX_LIMIT: usize = 100;

/// Filter for plain component listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentFilter {
    /// Case-insensitive text matched against name, description and tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Components carrying any of these tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Exact package name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    /// Maximum number of items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Paginated search request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    /// Case-insensitive text matched against name, description and tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Components carrying any of these tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Exact package name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    /// Page size, defaults to `DEFAULT_LIMIT`, at most `MAX_LIMIT`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Number of matches to skip, defaults to 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl From<&ComponentFilter> for SearchOptions {
    fn from(filter: &ComponentFilter) -> Self {
        Self {
            text: filter.text.clone(),
            tags: filter.tags.clone(),
            package: filter.package.clone(),
            limit: filter.limit,
            offset: None,
        }
    }
}

/// One page of query results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage<T> {
    /// Matches on this page, in catalog order
    pub items: Vec<T>,

    /// Number of matches across all pages
    pub total: usize,

    /// Whether matches exist past this page
    pub has_more: bool,

    /// Offset this page starts at
    pub offset: usize,

    /// Page size that was applied
    pub limit: usize,
}

/// Descriptive metadata of a loaded catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMetadata {
    /// Catalog version declared by the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Last update time declared by the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,

    /// Number of components
    pub total_components: usize,

    /// Distinct package names
    pub packages: Vec<String>,

    /// Distinct tags
    pub tags: Vec<String>,
}

/// Cache statistics of a catalog store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// Description of the backing source
    pub source: String,

    /// Components in the current snapshot
    pub total_components: usize,

    /// Raw records dropped during the last load
    pub skipped_items: usize,

    /// When the current snapshot was built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,

    /// Age of the current snapshot in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_ms: Option<i64>,

    /// Whether the next read will attempt a reload
    pub stale: bool,

    /// Reads answered from the cache
    pub cache_hits: u64,

    /// Reload attempts against the backing source
    pub reloads: u64,

    /// Reload attempts that fell back to stale or empty data
    pub failed_reloads: u64,

    /// Message of the most recent reload failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Metadata and statistics of a catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogInfo {
    /// Catalog metadata
    pub metadata: CatalogMetadata,

    /// Cache statistics
    pub stats: CatalogStats,
}

/// Outcome of normalizing one raw record that did not make it into the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDiagnostic {
    /// Position of the record in the raw source
    pub index: usize,

    /// Record name, when one could be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Error code of the failure
    pub code: ErrorCode,

    /// Human readable message
    pub message: String,
}

/// Dry-run normalization report over a whole source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Description of the validated source
    pub source: String,

    /// Raw records found
    pub total: usize,

    /// Records that normalized cleanly
    pub valid: usize,

    /// Records that were rejected
    pub invalid: usize,

    /// One entry per rejected record
    pub diagnostics: Vec<CatalogDiagnostic>,
}

impl ValidationReport {
    /// Whether every record normalized
    pub fn is_clean(&self) -> bool {
        self.invalid == 0
    }
}

/// Contract for the component catalog used by agent tools and handlers
#[async_trait]
pub trait ComponentCatalog: Send + Sync {
    /// Contract: Lists components matching `filter`, in catalog order.
    /// - Returns at most `filter.limit` items (default `DEFAULT_LIMIT`).
    /// - `Err(InvalidArgument)` when the limit exceeds `MAX_LIMIT`.
    async fn list_components(&self, filter: &ComponentFilter) -> CatalogResult<Vec<ComponentListItem>>;

    /// Contract: Fetches one component by name, ignoring case.
    /// - `variant`: optional variant whose prop overrides become the defaults.
    /// - `Err(NotFound)` carries up to three suggestions.
    async fn get_component(&self, name: &str, variant: Option<&str>) -> CatalogResult<ComponentSpec>;

    /// Contract: Paginated search over the catalog.
    async fn search_components(&self, options: &SearchOptions) -> CatalogResult<QueryPage<ComponentListItem>>;

    /// Contract: Metadata and cache statistics of the current catalog.
    async fn get_catalog_info(&self) -> CatalogResult<CatalogInfo>;

    /// Contract: Drops the cached catalog and loads it again.
    async fn reload_catalog(&self) -> CatalogResult<CatalogInfo>;

    /// Contract: Normalizes the whole raw source without touching the cache.
    async fn validate_catalog(&self) -> CatalogResult<ValidationReport>;
}
