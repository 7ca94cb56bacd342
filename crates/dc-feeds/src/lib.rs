//! disaster-console/crates/dc-feeds/src/lib.rs
//!
//! Feed adapters: boundary functions translating each external disaster
//! signal source (USGS seismic catalog, Nepal news aggregator, streamflow /
//! GloFAS flood data, weather overlay) into normalized in-process records.
//! Adapters never raise past their boundary; failure means an empty batch
//! and a warning in the log.

pub mod config;
pub mod earthquake;
pub mod flood;
pub mod http;
pub mod news;
pub mod weather;

pub use config::FeedConfig;
pub use http::{HttpFetch, ReqwestFetch};
