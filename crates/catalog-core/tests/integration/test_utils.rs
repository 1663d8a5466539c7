use std::io::Write;
use std::sync::Arc;

use catalog_core::test_utils::{fixtures, FakeClock};
use catalog_core::{CatalogService, CatalogStore, StaticFileSource, StoreConfig};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

/// Writes `document` to a temporary catalog file
pub fn write_catalog(document: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp catalog");
    write!(file, "{}", document).expect("write temp catalog");
    file
}

/// Replaces the contents of an existing catalog file
pub fn rewrite_catalog(file: &NamedTempFile, document: &Value) {
    std::fs::write(file.path(), document.to_string()).expect("rewrite temp catalog");
}

/// Static-file service over the fixture document, driven by a fake clock
pub fn static_service() -> (NamedTempFile, Arc<FakeClock>, CatalogService) {
    let file = write_catalog(&fixtures::catalog_document());
    let clock = Arc::new(FakeClock::new());
    let store = CatalogStore::new(
        Arc::new(StaticFileSource::new(file.path())),
        clock.clone(),
        StoreConfig::default(),
    );
    (file, clock, CatalogService::new(Arc::new(store)))
}

/// MCP `tools/call` result wrapping `inner` as a text part
pub fn mcp_text(inner: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": { "content": [{ "type": "text", "text": inner.to_string() }] }
    })
}
