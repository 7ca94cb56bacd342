//! # Record CRUD services
//!
//! One generic service wraps the persistence gateway for every
//! administrator-authored record type. Validation runs before any store
//! call, so a rejected form never causes a partial write; after a
//! mutation callers re-list from the store instead of patching a local
//! copy, so the view only ever shows durably committed state.

use std::marker::PhantomData;
use std::sync::Arc;

use dc_core::error::{AppError, Result};
use dc_core::models::{
    DisasterLocation, DisasterUpdate, EmergencyContact, NewsArticle, Notification, User,
};
use dc_core::traits::{collections, Document, DocumentStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A record type that lives in a named store collection.
pub trait StoredRecord: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Store collection name.
    const COLLECTION: &'static str;
    /// Human noun for error messages.
    const NOUN: &'static str;

    /// Required-field validation, checked before any store call.
    fn validate(&self) -> Result<()>;
}

fn required(noun: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(AppError::ValidationError(format!("{noun}: {field} is required")))
    } else {
        Ok(())
    }
}

impl StoredRecord for DisasterLocation {
    const COLLECTION: &'static str = collections::DISASTER_LOCATIONS;
    const NOUN: &'static str = "disaster location";

    fn validate(&self) -> Result<()> {
        required(Self::NOUN, "title", &self.title)?;
        required(Self::NOUN, "description", &self.description)?;
        required(Self::NOUN, "source", &self.source)
    }
}

impl StoredRecord for Notification {
    const COLLECTION: &'static str = collections::NOTIFICATIONS;
    const NOUN: &'static str = "notification";

    fn validate(&self) -> Result<()> {
        required(Self::NOUN, "title", &self.title)?;
        required(Self::NOUN, "message", &self.message)
    }
}

impl StoredRecord for DisasterUpdate {
    const COLLECTION: &'static str = collections::DISASTER_UPDATES;
    const NOUN: &'static str = "disaster update";

    fn validate(&self) -> Result<()> {
        required(Self::NOUN, "title", &self.title)?;
        required(Self::NOUN, "description", &self.description)
    }
}

impl StoredRecord for User {
    const COLLECTION: &'static str = collections::USERS;
    const NOUN: &'static str = "user";

    fn validate(&self) -> Result<()> {
        required(Self::NOUN, "name", &self.name)?;
        required(Self::NOUN, "email", &self.email)
    }
}

impl StoredRecord for NewsArticle {
    const COLLECTION: &'static str = collections::NEWS_ARTICLES;
    const NOUN: &'static str = "news article";

    fn validate(&self) -> Result<()> {
        required(Self::NOUN, "title", &self.title)?;
        required(Self::NOUN, "content", &self.content)?;
        required(Self::NOUN, "author", &self.author)
    }
}

impl StoredRecord for EmergencyContact {
    const COLLECTION: &'static str = collections::EMERGENCY_CONTACTS;
    const NOUN: &'static str = "emergency contact";

    fn validate(&self) -> Result<()> {
        required(Self::NOUN, "name", &self.name)?;
        required(Self::NOUN, "organization", &self.organization)?;
        required(Self::NOUN, "phone", &self.phone)
    }
}

/// Typed CRUD over one collection of the persistence gateway.
pub struct RecordService<T: StoredRecord> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<T>,
}

impl<T: StoredRecord> RecordService<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, _marker: PhantomData }
    }

    /// Current collection contents, newest first (by store timestamp).
    /// A document that no longer deserializes is skipped, not fatal.
    pub async fn list(&self) -> Result<Vec<T>> {
        let mut documents = self
            .store
            .list(T::COLLECTION)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(documents.into_iter().filter_map(decode::<T>).collect())
    }

    /// Validate and insert; returns the store-assigned id.
    pub async fn create(&self, record: &T) -> Result<String> {
        record.validate()?;
        self.store
            .create(T::COLLECTION, payload(record)?)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    /// Validate and overwrite an existing record.
    pub async fn update(&self, id: &str, record: &T) -> Result<()> {
        record.validate()?;
        self.ensure_exists(id).await?;
        self.store
            .update(T::COLLECTION, id, payload(record)?)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.ensure_exists(id).await?;
        self.store
            .delete(T::COLLECTION, id)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))
    }

    async fn ensure_exists(&self, id: &str) -> Result<()> {
        let documents = self
            .store
            .list(T::COLLECTION)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;
        if documents.iter().any(|d| d.id == id) {
            Ok(())
        } else {
            Err(AppError::NotFound(T::NOUN.to_string(), id.to_string()))
        }
    }
}

/// Serialize a record for storage. The id never goes into the payload;
/// the store owns it.
fn payload<T: Serialize>(record: &T) -> Result<Value> {
    let mut value =
        serde_json::to_value(record).map_err(|e| AppError::Internal(e.to_string()))?;
    if let Value::Object(map) = &mut value {
        map.remove("id");
    }
    Ok(value)
}

/// Rehydrate a stored document, stamping the store id back onto the record.
fn decode<T: DeserializeOwned>(document: Document) -> Option<T> {
    let mut value = document.data;
    if let Value::Object(map) = &mut value {
        map.insert("id".into(), Value::String(document.id.clone()));
    }
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(err) => {
            log::warn!("skipping malformed document {}: {err}", document.id);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dc_core::models::{DisasterKind, LocationStatus, PublishState, Severity};
    use dc_store_memory::MemoryStore;

    fn location(title: &str) -> DisasterLocation {
        DisasterLocation {
            id: None,
            title: title.into(),
            description: "desc".into(),
            latitude: 27.7,
            longitude: 85.3,
            magnitude: 0.0,
            depth: 0.0,
            affected_radius: 10.0,
            severity: Severity::Medium,
            status: LocationStatus::Active,
            kind: DisasterKind::Flood,
            source: "DHM".into(),
            source_id: String::new(),
            timestamp: Utc::now(),
        }
    }

    fn service() -> RecordService<DisasterLocation> {
        RecordService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn create_then_list_round_trips_user_fields() {
        let svc = service();
        let id = svc.create(&location("Koshi flood zone")).await.unwrap();

        let listed = svc.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        let got = &listed[0];
        assert_eq!(got.id.as_deref(), Some(id.as_str()));
        assert_eq!(got.title, "Koshi flood zone");
        assert_eq!(got.source, "DHM");
        assert_eq!(got.severity, Severity::Medium);
    }

    #[tokio::test]
    async fn validation_rejects_before_any_write() {
        let svc = service();
        let err = svc.create(&location("")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert!(svc.list().await.unwrap().is_empty(), "no partial write");
    }

    #[tokio::test]
    async fn update_overwrites_and_missing_id_is_not_found() {
        let svc = service();
        let id = svc.create(&location("before")).await.unwrap();

        svc.update(&id, &location("after")).await.unwrap();
        assert_eq!(svc.list().await.unwrap()[0].title, "after");

        let err = svc.update("nope", &location("x")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_, _)));
    }

    #[tokio::test]
    async fn delete_removes_and_missing_id_is_not_found() {
        let svc = service();
        let id = svc.create(&location("gone soon")).await.unwrap();
        svc.delete(&id).await.unwrap();
        assert!(svc.list().await.unwrap().is_empty());

        let err = svc.delete(&id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_, _)));
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let svc = service();
        svc.create(&location("older")).await.unwrap();
        // store timestamps are the sort key; make sure they differ
        std::thread::sleep(std::time::Duration::from_millis(5));
        svc.create(&location("newer")).await.unwrap();
        let listed = svc.list().await.unwrap();
        assert_eq!(listed[0].title, "newer");
        assert_eq!(listed[1].title, "older");
    }

    #[tokio::test]
    async fn notification_requires_title_and_message() {
        let svc: RecordService<Notification> = RecordService::new(Arc::new(MemoryStore::new()));
        let bad = Notification {
            id: None,
            title: "Alert".into(),
            message: "   ".into(),
            region: "Bagmati".into(),
            severity: Severity::High,
            status: PublishState::Draft,
            timestamp: Utc::now(),
        };
        assert!(matches!(svc.create(&bad).await, Err(AppError::ValidationError(_))));
    }
}
