//! disaster-console/crates/dc-services/src/lib.rs
//!
//! Application services: the feed aggregation layer (per-source caches,
//! load phases, map view), typed record CRUD over the persistence
//! gateway, and the feed-to-record import operations.

pub mod aggregation;
pub mod import;
pub mod records;

pub use aggregation::{build_map_view, FeedHub, LoadPhase, MapMarker, SourceCache};
pub use records::{RecordService, StoredRecord};
