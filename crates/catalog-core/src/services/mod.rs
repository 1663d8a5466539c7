//! Core services for the component catalog

pub mod catalog;
pub mod query;

// Re-exports
pub use catalog::CatalogService;
pub use query::{apply_variant, get_by_name, list, query, suggest};
