//! Normalization of raw component records into the strict schema
//!
//! Providers describe components in many shapes. Everything here is pure:
//! the same raw value always yields the same result, and the only fatal
//! condition is a record without a usable `name`.

pub mod rules;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::data::{CatalogDiagnostic, CatalogError, ComponentListItem, ComponentSpec, ErrorCode};

/// Normalizes one raw record into a full component spec.
pub fn normalize_component(raw: &Value) -> Result<ComponentSpec, CatalogError> {
    let (record, name) = rules::record_name(raw)?;

    Ok(ComponentSpec {
        name,
        package: rules::package(record),
        version: rules::version(record),
        description: rules::description(record),
        language: rules::language(record),
        style: rules::style(record),
        props: rules::props(record),
        variants: rules::variants(record),
        code: rules::code(record),
        assets: rules::assets(record),
        tags: rules::tags(record),
        dependencies: rules::dependencies(record),
    })
}

/// Normalizes one raw record into a browsing projection.
pub fn normalize_list_item(raw: &Value) -> Result<ComponentListItem, CatalogError> {
    let (record, name) = rules::record_name(raw)?;

    Ok(ComponentListItem {
        name,
        description: rules::description(record),
        package: rules::package(record),
        version: rules::version(record),
        style: rules::style(record),
        tags: rules::tags(record),
    })
}

/// Result of normalizing a whole catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedCatalog {
    /// Accepted components, in source order
    pub components: Vec<ComponentSpec>,
    /// Projection of `components`, index for index
    pub list_items: Vec<ComponentListItem>,
    /// One entry per rejected record
    pub diagnostics: Vec<CatalogDiagnostic>,
    /// Number of raw records seen
    pub raw_count: usize,
}

impl NormalizedCatalog {
    /// Number of accepted components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no component was accepted
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Normalizes every record, skipping the ones that fail.
///
/// Names are unique ignoring case: a later record reusing a name is dropped
/// in favour of the first one. Rejections are returned as diagnostics and
/// logged; they never abort the batch.
pub fn normalize_catalog(raw: &[Value]) -> NormalizedCatalog {
    let mut catalog = NormalizedCatalog {
        raw_count: raw.len(),
        ..Default::default()
    };
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for (index, item) in raw.iter().enumerate() {
        let spec = match normalize_component(item) {
            Ok(spec) => spec,
            Err(error) => {
                warn!(index, error = %error, "Skipping catalog record that failed normalization");
                catalog.diagnostics.push(CatalogDiagnostic {
                    index,
                    name: rules::loose_name(item),
                    code: error.code(),
                    message: error.to_string(),
                });
                continue;
            }
        };

        let key = spec.name.to_lowercase();
        if let Some(first) = first_seen.get(&key) {
            warn!(index, name = %spec.name, first_index = *first, "Skipping duplicate component name");
            catalog.diagnostics.push(CatalogDiagnostic {
                index,
                name: Some(spec.name.clone()),
                code: ErrorCode::InvalidResponse,
                message: format!(
                    "Duplicate component name '{}' (first defined at index {})",
                    spec.name, first
                ),
            });
            continue;
        }
        first_seen.insert(key, index);

        catalog.list_items.push(ComponentListItem::from(&spec));
        catalog.components.push(spec);
    }

    catalog
}
