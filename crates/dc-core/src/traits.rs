//! # Core Traits (Ports)
//!
//! Any storage or transport adapter must implement these traits to be
//! wired into the binary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One stored document: the payload plus store-assigned id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

/// Persistence gateway contract: generic CRUD over named collections.
///
/// The store assigns ids and creation timestamps. `update` and `delete`
/// fail on unknown ids; callers re-list after every mutation instead of
/// patching their local view.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn list(&self, collection: &str) -> anyhow::Result<Vec<Document>>;
    async fn create(&self, collection: &str, data: Value) -> anyhow::Result<String>;
    async fn update(&self, collection: &str, id: &str, data: Value) -> anyhow::Result<()>;
    async fn delete(&self, collection: &str, id: &str) -> anyhow::Result<()>;
}

/// Collection names used by the console.
pub mod collections {
    pub const NOTIFICATIONS: &str = "notifications";
    pub const DISASTER_UPDATES: &str = "disaster_updates";
    pub const DISASTER_LOCATIONS: &str = "disaster_locations";
    pub const USERS: &str = "users";
    pub const NEWS_ARTICLES: &str = "news_articles";
    pub const EMERGENCY_CONTACTS: &str = "emergency_contacts";
}
