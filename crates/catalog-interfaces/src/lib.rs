//! Component Catalog Interfaces
//!
//! This crate provides the types shared between the component catalog and
//! its consumers (agent tools, HTTP handlers): the strict component schema,
//! the error taxonomy, query/report types and the `ComponentCatalog` trait.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Strict component schema
pub mod model;

/// Error taxonomy and wire envelope
pub mod error;

/// Catalog contract consumed by the tool layer
pub mod catalog;

/// Re-export key types for convenient usage
pub use model::{
    Asset, AssetType, ComponentListItem, ComponentSpec, Language, Prop, StyleSpec, StyleType,
    Variant, DEFAULT_VERSION,
};
pub use error::{CatalogError, CatalogResult, ErrorCode, ErrorEnvelope};
pub use catalog::{
    CatalogInfo, CatalogMetadata, CatalogStats, ComponentCatalog, ComponentFilter, QueryPage,
    CatalogDiagnostic, SearchOptions, ValidationReport, DEFAULT_LIMIT, MAX_LIMIT,
};
