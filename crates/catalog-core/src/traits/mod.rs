//! Core traits (interfaces) for the component catalog

mod catalog_source;
mod clock;

pub use catalog_source::CatalogSource;
pub use clock::{Clock, SystemClock};
