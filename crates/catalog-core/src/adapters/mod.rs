//! Adapters for the remote component provider

pub mod mcp_source;
pub mod remote_client;

// Re-export adapters for easier import
pub use mcp_source::McpCatalogSource;
pub use remote_client::McpComponentClient;
