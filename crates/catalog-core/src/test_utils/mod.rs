//! Test doubles and fixtures for exercising the catalog without real backings

pub mod fakes;
pub mod fixtures;

// Re-export commonly used test utilities
pub use fakes::{FakeCatalogSource, FakeClock};
