use catalog_core::{create_catalog_service, CatalogConfig, CatalogError, ClientConfig, ComponentCatalog};
use catalog_interfaces::SearchOptions;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::test_utils::mcp_text;

fn remote_config(server: &MockServer) -> CatalogConfig {
    CatalogConfig {
        client: ClientConfig::for_base_url(server.uri()).with_token("catalog-token"),
        ..CatalogConfig::default()
    }
}

async fn mount_listing(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/mcp"))
        .and(body_string_contains("list_components"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mcp_text(json!({
            "items": [
                { "name": "Button", "package": "@ui/core", "tags": ["form"] },
                { "name": "Card", "package": "@ui/layout", "category": "layout" },
                { "title": "not a component" }
            ],
            "total": 3
        }))))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[test_log::test(tokio::test)]
async fn test_remote_listing_is_cached() {
    let server = MockServer::start().await;
    mount_listing(&server, 1).await;

    let service = create_catalog_service(&remote_config(&server)).unwrap();

    let page = service.search_components(&SearchOptions::default()).await.unwrap();
    assert_eq!(page.total, 2);

    let layout = service
        .search_components(&SearchOptions {
            tags: vec!["layout".into()],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(layout.items[0].name, "Card");

    let info = service.get_catalog_info().await.unwrap();
    assert_eq!(info.stats.skipped_items, 1);
    assert!(info.stats.source.starts_with("mcp:"));
}

#[test_log::test(tokio::test)]
async fn test_remote_get_component_goes_to_provider() {
    let server = MockServer::start().await;
    mount_listing(&server, 0).await;

    Mock::given(method("POST"))
        .and(body_string_contains("get_component"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mcp_text(json!({
            "component": {
                "name": "Button",
                "code": "export const Button = () => <button />;",
                "assets": [{ "path": "button.css", "content": ".btn {}" }],
                "variants": { "ghost": { "variant": "ghost" } }
            }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let service = create_catalog_service(&remote_config(&server)).unwrap();
    let spec = service.get_component("Button", Some("ghost")).await.unwrap();

    assert!(spec.code.starts_with("export const Button"));
    assert_eq!(spec.assets[0].contents, ".btn {}");
    let ghost = spec.props.iter().find(|p| p.name == "variant").unwrap();
    assert_eq!(ghost.default, Some(json!("ghost")));
}

#[test_log::test(tokio::test)]
async fn test_remote_unknown_variant_is_not_found() {
    let server = MockServer::start().await;
    mount_listing(&server, 0).await;

    Mock::given(method("POST"))
        .and(body_string_contains("get_component"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mcp_text(json!({
            "component": {
                "name": "Button",
                "variants": {
                    "ghost": { "variant": "ghost" },
                    "small": { "size": "sm" }
                }
            }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let service = create_catalog_service(&remote_config(&server)).unwrap();
    let err = service.get_component("Button", Some("huge")).await.unwrap_err();

    assert_eq!(
        err,
        CatalogError::NotFound {
            name: "Button#huge".to_string(),
            suggestions: vec!["ghost".to_string(), "small".to_string()],
        }
    );
}

#[test_log::test(tokio::test)]
async fn test_remote_miss_suggests_from_snapshot() {
    let server = MockServer::start().await;
    mount_listing(&server, 1).await;

    Mock::given(method("POST"))
        .and(body_string_contains("get_component"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let service = create_catalog_service(&remote_config(&server)).unwrap();
    let err = service.get_component("Buton", None).await.unwrap_err();

    assert_eq!(
        err,
        CatalogError::NotFound {
            name: "Buton".to_string(),
            suggestions: vec!["Button".to_string()],
        }
    );
}

#[test_log::test(tokio::test)]
async fn test_provider_outage_degrades_to_empty_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let service = create_catalog_service(&remote_config(&server)).unwrap();

    let page = service.search_components(&SearchOptions::default()).await.unwrap();
    assert_eq!(page.total, 0);

    let info = service.get_catalog_info().await.unwrap();
    assert!(info.stats.last_error.unwrap_or_default().contains("502"));

    let err = service.validate_catalog().await.unwrap_err();
    assert_eq!(err.code().as_str(), "RequestFailed");
}
