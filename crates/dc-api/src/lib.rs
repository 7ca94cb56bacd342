//! disaster-console/crates/dc-api/src/lib.rs
//!
//! JSON API for the disaster monitoring console: aggregated map/feed
//! endpoints, gazetteer search, weather overlay, record CRUD and feed
//! imports.

pub mod handlers;
pub mod middleware;

pub use handlers::{configure, AppState};
