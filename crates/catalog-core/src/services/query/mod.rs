//! Query engine: filtering, paging and by-name lookup over a snapshot

pub mod service;


pub use service::{apply_variant, get_by_name, list, query, suggest, MAX_SUGGESTIONS};
