//! Immutable, fully normalized view of the catalog

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::data::{CatalogDiagnostic, CatalogMetadata, ComponentListItem, ComponentSpec};
use crate::normalize::NormalizedCatalog;

/// A catalog as loaded at one point in time.
///
/// Built once per load and shared behind an `Arc`; it is never mutated, so
/// readers need no locking. `list_items()[i]` is always the projection of
/// `components()[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    components: Vec<ComponentSpec>,
    list_items: Vec<ComponentListItem>,
    loaded_at: DateTime<Utc>,
    source_metadata: Option<CatalogMetadata>,
    diagnostics: Vec<CatalogDiagnostic>,
    raw_count: usize,
    by_name: HashMap<String, usize>,
}

impl CatalogSnapshot {
    /// Builds a snapshot from one normalization pass.
    pub fn build(
        normalized: NormalizedCatalog,
        source_metadata: Option<CatalogMetadata>,
        loaded_at: DateTime<Utc>,
    ) -> Self {
        let by_name = normalized
            .components
            .iter()
            .enumerate()
            .map(|(i, spec)| (spec.name.to_lowercase(), i))
            .collect();

        Self {
            components: normalized.components,
            list_items: normalized.list_items,
            loaded_at,
            source_metadata,
            diagnostics: normalized.diagnostics,
            raw_count: normalized.raw_count,
            by_name,
        }
    }

    /// A snapshot with no components, used when nothing could be loaded.
    pub fn empty(loaded_at: DateTime<Utc>) -> Self {
        Self::build(NormalizedCatalog::default(), None, loaded_at)
    }

    pub fn components(&self) -> &[ComponentSpec] {
        &self.components
    }

    pub fn list_items(&self) -> &[ComponentListItem] {
        &self.list_items
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Metadata exactly as the source declared it
    pub fn source_metadata(&self) -> Option<&CatalogMetadata> {
        self.source_metadata.as_ref()
    }

    /// Records rejected while building this snapshot
    pub fn diagnostics(&self) -> &[CatalogDiagnostic] {
        &self.diagnostics
    }

    /// Number of raw records the snapshot was built from
    pub fn raw_count(&self) -> usize {
        self.raw_count
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Case-insensitive lookup by component name.
    pub fn find(&self, name: &str) -> Option<&ComponentSpec> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.components[i])
    }

    /// Catalog metadata: the source's version information, with counts,
    /// packages and tags taken from the loaded components when the source
    /// does not list them.
    pub fn metadata(&self) -> CatalogMetadata {
        let declared = self.source_metadata.clone().unwrap_or_default();

        let packages = if declared.packages.is_empty() {
            self.components
                .iter()
                .map(|c| c.package.clone())
                .filter(|p| !p.is_empty())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        } else {
            declared.packages
        };

        let tags = if declared.tags.is_empty() {
            self.components
                .iter()
                .flat_map(|c| c.tags.iter().map(|t| t.to_lowercase()))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        } else {
            declared.tags
        };

        CatalogMetadata {
            version: declared.version,
            last_updated: declared.last_updated,
            total_components: self.components.len(),
            packages,
            tags,
        }
    }
}
