//! Error taxonomy for catalog operations
//!
//! Every failure a catalog consumer can observe maps onto one of the
//! `ErrorCode` values; `CatalogError::envelope` renders the wire shape handed
//! to tool callers and HTTP handlers.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Fixed error codes exposed to consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// A raw record lacks a field normalization cannot invent
    MissingRequiredField,
    /// Caller-supplied filter or pagination violates the contract
    InvalidArgument,
    /// Lookup by name failed
    NotFound,
    /// The remote call exceeded its deadline
    Timeout,
    /// DNS, connect or transport failure
    NetworkError,
    /// The provider answered with a failure
    RequestFailed,
    /// The provider answered with something undecodable
    InvalidResponse,
    /// The remote client is turned off by configuration
    Disabled,
}

impl ErrorCode {
    /// Stable string form of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingRequiredField => "MissingRequiredField",
            ErrorCode::InvalidArgument => "InvalidArgument",
            ErrorCode::NotFound => "NotFound",
            ErrorCode::Timeout => "Timeout",
            ErrorCode::NetworkError => "NetworkError",
            ErrorCode::RequestFailed => "RequestFailed",
            ErrorCode::InvalidResponse => "InvalidResponse",
            ErrorCode::Disabled => "Disabled",
        }
    }
}

/// Wire representation of a catalog failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error code
    pub code: ErrorCode,

    /// Human readable message
    pub message: String,

    /// Structured extras (suggestions, HTTP status, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Errors that can occur when working with the component catalog
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A required field is absent or unusable
    #[error("Missing required field '{field}': {message}")]
    MissingRequiredField {
        /// Name of the missing field
        field: String,
        /// What was found instead
        message: String,
    },

    /// Invalid filter or pagination argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested component (or variant) does not exist
    #[error("Component not found: {name}")]
    NotFound {
        /// Name that was looked up
        name: String,
        /// Up to three nearby names
        suggestions: Vec<String>,
    },

    /// The remote call did not finish in time
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout {
        /// Deadline that was exceeded
        timeout_ms: u64,
    },

    /// Transport level failure
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The provider or backing source reported a failure
    #[error("Request failed{}: {message}", status_suffix(.status))]
    RequestFailed {
        /// HTTP status, when the failure came from an HTTP response
        status: Option<u16>,
        /// Failure description
        message: String,
    },

    /// The response could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The remote client is disabled
    #[error("Component provider is disabled")]
    Disabled,
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(status) => format!(" with status {}", status),
        None => String::new(),
    }
}

impl CatalogError {
    /// Helper to create a missing field error
    pub fn missing_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        CatalogError::MissingRequiredField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Helper to create a not found error without suggestions
    pub fn not_found(name: impl Into<String>) -> Self {
        CatalogError::NotFound {
            name: name.into(),
            suggestions: Vec::new(),
        }
    }

    /// Helper to create a request failure
    pub fn request_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        CatalogError::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// Taxonomy code of this error
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::MissingRequiredField { .. } => ErrorCode::MissingRequiredField,
            CatalogError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            CatalogError::NotFound { .. } => ErrorCode::NotFound,
            CatalogError::Timeout { .. } => ErrorCode::Timeout,
            CatalogError::NetworkError(_) => ErrorCode::NetworkError,
            CatalogError::RequestFailed { .. } => ErrorCode::RequestFailed,
            CatalogError::InvalidResponse(_) => ErrorCode::InvalidResponse,
            CatalogError::Disabled => ErrorCode::Disabled,
        }
    }

    /// Suggestions attached to a not found error
    pub fn suggestions(&self) -> &[String] {
        match self {
            CatalogError::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Renders the error as a wire envelope
    pub fn envelope(&self) -> ErrorEnvelope {
        let details = match self {
            CatalogError::MissingRequiredField { field, .. } => Some(json!({ "field": field })),
            CatalogError::NotFound { name, suggestions } => Some(json!({
                "name": name,
                "suggestions": suggestions,
            })),
            CatalogError::Timeout { timeout_ms } => Some(json!({ "timeoutMs": timeout_ms })),
            CatalogError::RequestFailed { status: Some(status), .. } => {
                Some(json!({ "status": status }))
            }
            _ => None,
        };

        ErrorEnvelope {
            code: self.code(),
            message: self.to_string(),
            details,
        }
    }
}

impl From<CatalogError> for ErrorEnvelope {
    fn from(error: CatalogError) -> Self {
        error.envelope()
    }
}
