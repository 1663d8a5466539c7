//! Integration tests for catalog-core
//!
//! This module organizes all integration tests in the integration directory.

// Shared helpers
pub mod test_utils;

// Integration test modules
pub mod remote_catalog_flow;
pub mod static_catalog_flow;
