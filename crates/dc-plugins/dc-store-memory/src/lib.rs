//! # dc-store-memory Implementation
//!
//! In-memory `DocumentStore` backed by a `DashMap` keyed by collection
//! name. Ids are UUID v7 (time-ordered), creation timestamps are assigned
//! on insert. Serves local deployments and doubles as the test store; the
//! record types that are not yet durably persisted (users, news articles,
//! emergency contacts) live here in production too.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dc_core::traits::{Document, DocumentStore};
use serde_json::Value;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryStore {
    collections: DashMap<String, Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list(&self, collection: &str) -> anyhow::Result<Vec<Document>> {
        Ok(self
            .collections
            .get(collection)
            .map(|docs| docs.clone())
            .unwrap_or_default())
    }

    async fn create(&self, collection: &str, data: Value) -> anyhow::Result<String> {
        let id = Uuid::now_v7().to_string();
        let document = Document { id: id.clone(), data, created_at: Utc::now() };
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn update(&self, collection: &str, id: &str, data: Value) -> anyhow::Result<()> {
        let mut docs = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| anyhow::anyhow!("collection {collection} is empty"))?;
        let doc = docs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| anyhow::anyhow!("document {id} not found in {collection}"))?;
        doc.data = data;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> anyhow::Result<()> {
        let mut docs = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| anyhow::anyhow!("collection {collection} is empty"))?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            anyhow::bail!("document {id} not found in {collection}");
        }
        Ok(())
    }
}
