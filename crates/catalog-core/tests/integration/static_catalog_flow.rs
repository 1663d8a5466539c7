use std::sync::Arc;
use std::time::Duration;

use catalog_core::{
    CatalogError, CatalogService, CatalogStore, ComponentCatalog, StaticFileSource, StoreConfig,
    SystemClock,
};
use catalog_interfaces::{ComponentFilter, SearchOptions, StyleType};
use pretty_assertions::assert_eq;
use serde_json::json;

use super::test_utils::{rewrite_catalog, static_service, write_catalog};

#[test_log::test(tokio::test)]
async fn test_info_reflects_static_document() {
    let (_file, _clock, service) = static_service();

    let info = service.get_catalog_info().await.unwrap();

    assert_eq!(info.metadata.version.as_deref(), Some("2024.06"));
    assert_eq!(info.metadata.total_components, 3);
    assert_eq!(info.stats.skipped_items, 1);
    assert!(info.stats.source.starts_with("file:"));
    assert_eq!(info.stats.failed_reloads, 0);
}

#[test_log::test(tokio::test)]
async fn test_search_and_show_over_file() {
    let (_file, _clock, service) = static_service();

    let overlays = service
        .search_components(&SearchOptions {
            tags: vec!["Overlay".into()],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(overlays.total, 1);
    let modal = &overlays.items[0];
    assert_eq!(modal.name, "Modal");
    assert_eq!(modal.style.as_ref().map(|s| s.style_type), Some(StyleType::Module));

    let spec = service.get_component("modal", None).await.unwrap();
    assert_eq!(spec.dependencies, vec!["react-dom".to_string()]);

    let listed = service
        .list_components(&ComponentFilter {
            package: Some("@ui/core".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Button");
}

#[test_log::test(tokio::test)]
async fn test_reload_picks_up_file_changes() {
    let (file, _clock, service) = static_service();
    assert_eq!(service.get_catalog_info().await.unwrap().stats.total_components, 3);

    rewrite_catalog(&file, &json!({ "components": [{ "name": "Spinner" }] }));

    // Still cached until reloaded
    assert!(service.get_component("Spinner", None).await.is_err());

    let info = service.reload_catalog().await.unwrap();
    assert_eq!(info.stats.total_components, 1);
    assert!(service.get_component("spinner", None).await.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_missing_file_serves_stale_snapshot() {
    let (file, clock, service) = static_service();
    service.get_catalog_info().await.unwrap();

    let path = file.path().to_path_buf();
    drop(file);
    assert!(!path.exists());

    clock.advance(Duration::from_secs(10 * 60));
    let button = service.get_component("Button", None).await.unwrap();
    assert_eq!(button.package, "@ui/core");

    let info = service.get_catalog_info().await.unwrap();
    assert!(info.stats.stale);
    assert!(info.stats.failed_reloads >= 1);
    assert!(info.stats.last_error.is_some());

    let err = service.validate_catalog().await.unwrap_err();
    assert!(matches!(err, CatalogError::RequestFailed { status: None, .. }));
}

#[test_log::test(tokio::test)]
async fn test_malformed_file_never_loaded() {
    let file = write_catalog(&json!({ "widgets": true }));
    let store = CatalogStore::new(
        Arc::new(StaticFileSource::new(file.path())),
        Arc::new(SystemClock),
        StoreConfig::default(),
    );
    let service = CatalogService::new(Arc::new(store));

    let page = service.search_components(&SearchOptions::default()).await.unwrap();
    assert_eq!(page.total, 0);

    let err = service.validate_catalog().await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidResponse(_)));
}

#[test_log::test(tokio::test)]
async fn test_validate_lists_diagnostics_without_touching_cache() {
    let (_file, _clock, service) = static_service();

    let report = service.validate_catalog().await.unwrap();
    assert_eq!((report.total, report.valid, report.invalid), (4, 3, 1));
    assert_eq!(report.diagnostics[0].index, 1);
    assert_eq!(report.diagnostics[0].code.as_str(), "MissingRequiredField");

    let info = service.get_catalog_info().await.unwrap();
    assert_eq!(info.stats.reloads, 1);
}
