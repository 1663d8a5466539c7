//! Local catalog sources: a JSON file on disk and an in-memory document

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::data::{CatalogError, RawCatalog};
use crate::traits::CatalogSource;

/// Reads `{components: [...], metadata?}` from a fixed path on every fetch.
#[derive(Debug, Clone)]
pub struct StaticFileSource {
    path: PathBuf,
}

impl StaticFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for StaticFileSource {
    async fn fetch(&self) -> Result<RawCatalog, CatalogError> {
        debug!(path = %self.path.display(), "Reading static catalog");
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            CatalogError::request_failed(
                None,
                format!("failed to read catalog file {}: {}", self.path.display(), e),
            )
        })?;
        RawCatalog::from_json_str(&text)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Serves a catalog document held in memory, e.g. one embedded in the binary.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    document: Value,
}

impl InMemorySource {
    pub fn new(document: Value) -> Self {
        Self { document }
    }
}

#[async_trait]
impl CatalogSource for InMemorySource {
    async fn fetch(&self) -> Result<RawCatalog, CatalogError> {
        RawCatalog::from_document(self.document.clone())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
