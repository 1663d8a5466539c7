use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::remote_client::McpComponentClient;
use crate::data::{CatalogError, RawCatalog};
use crate::traits::CatalogSource;

/// Loads the whole catalog through the provider's unfiltered listing.
#[derive(Debug, Clone)]
pub struct McpCatalogSource {
    client: Arc<McpComponentClient>,
}

impl McpCatalogSource {
    pub fn new(client: Arc<McpComponentClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogSource for McpCatalogSource {
    async fn fetch(&self) -> Result<RawCatalog, CatalogError> {
        self.client.fetch_raw_catalog().await
    }

    fn describe(&self) -> String {
        format!("mcp:{}", self.client.config().endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_keeps_raw_records() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "content": [{
                        "type": "text",
                        "text": json!({ "items": [{ "name": "Button" }, { "broken": true }], "total": 2 }).to_string()
                    }]
                }
            })))
            .mount(&mock_server)
            .await;

        let client = McpComponentClient::new(ClientConfig::for_base_url(mock_server.uri())).unwrap();
        let source = McpCatalogSource::new(Arc::new(client));

        let raw = source.fetch().await.unwrap();
        assert_eq!(raw.components.len(), 2);
        assert!(source.describe().ends_with("/mcp"));
    }
}
