//! Raw catalog documents as delivered by a source

use serde_json::Value;

use crate::data::{CatalogError, CatalogMetadata};
use crate::normalize::rules;

/// Unnormalized catalog content plus whatever metadata the source declared
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCatalog {
    /// Raw component records, in source order
    pub components: Vec<Value>,
    /// Source-declared metadata
    pub metadata: Option<CatalogMetadata>,
}

impl RawCatalog {
    /// Wraps already-extracted records.
    pub fn from_items(components: Vec<Value>) -> Self {
        Self {
            components,
            metadata: None,
        }
    }

    /// Parses a catalog document.
    ///
    /// Accepted top levels: `{components: [...], metadata?}`, `{items: [...]}`
    /// and a bare array. Anything else is malformed.
    pub fn from_document(document: Value) -> Result<Self, CatalogError> {
        match document {
            Value::Array(components) => Ok(Self::from_items(components)),
            Value::Object(mut fields) => {
                let metadata = fields.get("metadata").and_then(rules::catalog_metadata);
                let components = match fields
                    .remove("components")
                    .or_else(|| fields.remove("items"))
                {
                    Some(Value::Array(components)) => components,
                    Some(_) => {
                        return Err(CatalogError::InvalidResponse(
                            "catalog 'components' is not an array".to_string(),
                        ))
                    }
                    None => {
                        return Err(CatalogError::InvalidResponse(
                            "catalog document has no 'components' array".to_string(),
                        ))
                    }
                };
                Ok(Self {
                    components,
                    metadata,
                })
            }
            other => Err(CatalogError::InvalidResponse(format!(
                "catalog document must be an object or an array, found {}",
                other
            ))),
        }
    }

    /// Parses a catalog document from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| CatalogError::InvalidResponse(format!("catalog is not valid JSON: {}", e)))?;
        Self::from_document(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_with_metadata() {
        let raw = RawCatalog::from_document(json!({
            "components": [{ "name": "Button" }],
            "metadata": { "version": "2024.1", "packages": ["@ui/core"], "totalComponents": 1 }
        }))
        .unwrap();

        assert_eq!(raw.components.len(), 1);
        let metadata = raw.metadata.unwrap();
        assert_eq!(metadata.version.as_deref(), Some("2024.1"));
        assert_eq!(metadata.packages, vec!["@ui/core".to_string()]);
        assert_eq!(metadata.total_components, 1);
    }

    #[test]
    fn test_bare_array_and_items_key() {
        let raw = RawCatalog::from_document(json!([{ "name": "A" }, { "name": "B" }])).unwrap();
        assert_eq!(raw.components.len(), 2);
        assert!(raw.metadata.is_none());

        let raw = RawCatalog::from_document(json!({ "items": [{ "name": "A" }] })).unwrap();
        assert_eq!(raw.components.len(), 1);
    }

    #[test]
    fn test_malformed_top_level() {
        let err = RawCatalog::from_document(json!({ "components": "nope" })).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidResponse(_)));

        let err = RawCatalog::from_document(json!(42)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidResponse(_)));

        let err = RawCatalog::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidResponse(_)));
    }
}
