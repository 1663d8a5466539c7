use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::data::{CatalogError, ComponentFilter, ComponentListItem, ComponentSpec, RawCatalog};
use crate::normalize::rules::loose_name;
use crate::normalize::{normalize_component, normalize_list_item};

/// Tool listing components on the provider
pub const LIST_TOOL: &str = "list_components";

/// Tool fetching one component on the provider
pub const GET_TOOL: &str = "get_component";

/// Keys that mark a bare payload object
const PAYLOAD_KEYS: &[&str] = &["component", "components", "items", "name"];

/// JSON-RPC request envelope
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: ToolCall<'a>,
}

#[derive(Debug, Serialize)]
struct ToolCall<'a> {
    name: &'a str,
    arguments: Value,
}

/// Client for a remote component provider speaking MCP tool calls over HTTP
#[derive(Debug)]
pub struct McpComponentClient {
    config: ClientConfig,
    client: Client,
    next_id: AtomicU64,
}

impl McpComponentClient {
    /// Creates a new client. An enabled configuration must name an endpoint.
    pub fn new(config: ClientConfig) -> Result<Self, CatalogError> {
        if config.enabled && config.endpoint.trim().is_empty() {
            return Err(CatalogError::InvalidArgument(
                "component provider is enabled but no endpoint is configured".to_string(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| CatalogError::InvalidArgument(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            next_id: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Lists components matching `filter`. Items the normalizer rejects are
    /// skipped.
    #[instrument(skip(self), fields(endpoint = %self.config.endpoint))]
    pub async fn list_components(
        &self,
        filter: &ComponentFilter,
    ) -> Result<Vec<ComponentListItem>, CatalogError> {
        let arguments = serde_json::to_value(filter)
            .map_err(|e| CatalogError::InvalidArgument(format!("unserializable filter: {}", e)))?;
        let payload = self.call(LIST_TOOL, arguments, LIST_TOOL).await?;
        let raw = RawCatalog::from_document(payload)?;

        let items: Vec<ComponentListItem> = raw
            .components
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match normalize_list_item(item) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(index, error = %e, "Skipping provider list item");
                    None
                }
            })
            .collect();

        debug!(received = raw.components.len(), kept = items.len(), "Listed provider components");
        Ok(items)
    }

    /// Fetches one component with its code and assets.
    #[instrument(skip(self), fields(endpoint = %self.config.endpoint))]
    pub async fn get_component(
        &self,
        name: &str,
        variant: Option<&str>,
    ) -> Result<ComponentSpec, CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::InvalidArgument(
                "component name must not be empty".to_string(),
            ));
        }

        let mut arguments = Map::new();
        arguments.insert("name".to_string(), json!(name));
        if let Some(variant) = variant {
            arguments.insert("variant".to_string(), json!(variant));
        }

        let payload = self.call(GET_TOOL, Value::Object(arguments), name).await?;
        let record = select_component(&payload, name)?;

        normalize_component(record)
            .map_err(|e| CatalogError::InvalidResponse(format!("provider returned an unusable component: {}", e)))
    }

    /// Raw, unnormalized listing of the whole provider catalog
    #[instrument(skip(self), fields(endpoint = %self.config.endpoint))]
    pub async fn fetch_raw_catalog(&self) -> Result<RawCatalog, CatalogError> {
        let payload = self.call(LIST_TOOL, json!({}), LIST_TOOL).await?;
        RawCatalog::from_document(payload)
    }

    /// Performs one tool call and returns the decoded payload. `subject`
    /// names what a 404 refers to.
    async fn call(&self, tool: &str, arguments: Value, subject: &str) -> Result<Value, CatalogError> {
        if !self.config.enabled {
            return Err(CatalogError::Disabled);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let request = RpcRequest {
            jsonrpc: "2.0",
            id,
            method: "tools/call",
            params: ToolCall { name: tool, arguments },
        };
        debug!(id, tool, "Calling component provider");

        let timeout = self.config.timeout();
        let body = tokio::time::timeout(timeout, self.exchange(&request, subject))
            .await
            .map_err(|_| {
                warn!(id, tool, timeout_ms = self.config.timeout_ms, "Component provider timed out");
                CatalogError::Timeout {
                    timeout_ms: self.config.timeout_ms,
                }
            })??;

        decode_payload(body)
    }

    /// Sends the request and reads the whole body
    async fn exchange(&self, request: &RpcRequest<'_>, subject: &str) -> Result<Value, CatalogError> {
        let mut builder = self.client.post(&self.config.endpoint).json(request);
        if let Some(token) = &self.config.auth_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(map_http_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_http_error)?;

        match status {
            s if s.is_success() => serde_json::from_str(&text)
                .map_err(|e| CatalogError::InvalidResponse(format!("provider body is not JSON: {}", e))),
            StatusCode::NOT_FOUND => Err(CatalogError::not_found(subject)),
            s => Err(CatalogError::request_failed(
                Some(s.as_u16()),
                error_message(&text).unwrap_or_else(|| format!("HTTP error: {}", s)),
            )),
        }
    }
}

/// Maps a transport error to a CatalogError
fn map_http_error(error: reqwest::Error) -> CatalogError {
    if error.is_timeout() {
        CatalogError::NetworkError(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        CatalogError::NetworkError(format!("Connection error: {}", error))
    } else if let Some(status) = error.status() {
        CatalogError::request_failed(Some(status.as_u16()), error.to_string())
    } else {
        CatalogError::NetworkError(format!("HTTP error: {}", error))
    }
}

/// Unwraps a provider response: JSON-RPC error first, then the MCP content
/// envelope, then a bare payload object on `result` or the body itself.
pub(crate) fn decode_payload(body: Value) -> Result<Value, CatalogError> {
    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        return Err(CatalogError::request_failed(None, describe_error(error)));
    }

    if let Some(result) = body.get("result") {
        if let Some(content) = result.get("content").and_then(Value::as_array) {
            let text = content
                .iter()
                .find_map(|part| part.get("text").and_then(Value::as_str));
            if let Some(text) = text {
                return decode_text(result, text);
            }
        }

        if is_payload(result) {
            return Ok(result.clone());
        }
    }

    if is_payload(&body) {
        return Ok(body);
    }

    Err(CatalogError::InvalidResponse(
        "provider response matches no known payload shape".to_string(),
    ))
}

/// Decodes the text part of an MCP tool result
fn decode_text(result: &Value, text: &str) -> Result<Value, CatalogError> {
    if result.get("isError").and_then(Value::as_bool).unwrap_or(false) {
        return Err(CatalogError::request_failed(
            None,
            error_message(text).unwrap_or_else(|| text.to_string()),
        ));
    }

    let inner: Value = serde_json::from_str(text)
        .map_err(|e| CatalogError::InvalidResponse(format!("MCP text part is not JSON: {}", e)))?;
    if let Some(error) = inner.get("error").filter(|e| !e.is_null()) {
        return Err(CatalogError::request_failed(None, describe_error(error)));
    }
    Ok(inner)
}

/// Picks the requested record out of a fetch payload: `component`, a bare
/// record with a `name`, or the matching entry of a `components`/`items`
/// list (the only entry when the list has just one).
fn select_component<'a>(payload: &'a Value, name: &str) -> Result<&'a Value, CatalogError> {
    if let Some(component @ Value::Object(_)) = payload.get("component") {
        return Ok(component);
    }
    if payload.get("name").is_some() {
        return Ok(payload);
    }

    let entries = match payload {
        Value::Array(entries) => Some(entries),
        _ => ["components", "items"]
            .iter()
            .find_map(|key| payload.get(*key).and_then(Value::as_array)),
    };
    let entries = entries.ok_or_else(|| {
        CatalogError::InvalidResponse(
            "component payload has no `component`, `components`, `items` or `name`".to_string(),
        )
    })?;

    let wanted = name.trim().to_lowercase();
    entries
        .iter()
        .find(|entry| loose_name(entry).is_some_and(|n| n.to_lowercase() == wanted))
        .or_else(|| match entries.as_slice() {
            [only] => Some(only),
            _ => None,
        })
        .ok_or_else(|| CatalogError::not_found(name))
}

fn is_payload(value: &Value) -> bool {
    match value {
        Value::Object(map) => PAYLOAD_KEYS.iter().any(|key| map.contains_key(*key)),
        Value::Array(_) => true,
        _ => false,
    }
}

fn describe_error(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        other => other
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| other.to_string()),
    }
}

/// Pulls `error.message` (or a string `error`) out of a JSON error body
fn error_message(text: &str) -> Option<String> {
    let body: Value = serde_json::from_str(text).ok()?;
    body.get("error").filter(|e| !e.is_null()).map(describe_error)
}
