//! CatalogSource trait definition for raw catalog backings

use async_trait::async_trait;

use crate::data::{CatalogError, RawCatalog};

/// Represents where raw catalog data comes from (a static file, the remote
/// component provider, an embedded document).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the whole raw catalog.
    ///
    /// Contract: Returns every raw record the backing currently holds, in
    /// source order, without normalizing them. Fails only when the backing is
    /// unreachable or its top-level structure is malformed; bad individual
    /// records are the normalizer's concern.
    async fn fetch(&self) -> Result<RawCatalog, CatalogError>;

    /// Short human readable description used in logs and statistics.
    fn describe(&self) -> String;
}
