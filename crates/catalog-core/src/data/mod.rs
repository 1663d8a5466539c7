//! Core data structures for the component catalog

pub mod raw;
pub mod snapshot;

// Re-export the shared schema so the rest of the crate has one import path
pub use catalog_interfaces::{
    Asset, AssetType, CatalogDiagnostic, CatalogError, CatalogInfo, CatalogMetadata,
    CatalogResult, CatalogStats, ComponentFilter, ComponentListItem, ComponentSpec, ErrorCode,
    ErrorEnvelope, Language, Prop, QueryPage, SearchOptions, StyleSpec, StyleType,
    ValidationReport, Variant, DEFAULT_LIMIT, DEFAULT_VERSION, MAX_LIMIT,
};
pub use raw::RawCatalog;
pub use snapshot::CatalogSnapshot;
