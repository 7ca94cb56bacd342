//! disaster-console/crates/dc-core/src/lib.rs
//!
//! The central domain logic and interface definitions for the disaster
//! monitoring console: record models, the persistence-gateway port, the
//! severity/risk/rain classifier and the static gazetteer.

pub mod classify;
pub mod error;
pub mod gazetteer;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use classify::*;
pub use error::*;
pub use models::*;
pub use traits::*;
