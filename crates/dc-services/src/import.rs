//! # Import operations
//!
//! Copy a transient feed record into a persisted, editable one, stamping
//! a severity/priority from the classifier during the copy. Imports
//! always insert: re-importing the same external id deliberately creates
//! a second record, because no (source, source_id) uniqueness is enforced
//! at this layer.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dc_core::classify::seismic_severity;
use dc_core::error::Result;
use dc_core::models::{
    ArticleCategory, DisasterKind, DisasterLocation, LocationStatus, NewsArticle, NewsItem,
    Priority, PublishState, SeismicEvent,
};
use dc_core::traits::DocumentStore;

use crate::records::RecordService;

/// Source label stamped on imported earthquakes.
pub const SEISMIC_SOURCE: &str = "USGS";

/// Materialize a feed earthquake as a persisted disaster location.
/// Returns the new document id.
pub async fn import_seismic(store: Arc<dyn DocumentStore>, event: &SeismicEvent) -> Result<String> {
    let severity = seismic_severity(event.magnitude);
    let timestamp = DateTime::<Utc>::from_timestamp_millis(event.time).unwrap_or_else(Utc::now);
    let location = DisasterLocation {
        id: None,
        title: format!("M{:.1} — {}", event.magnitude, event.place),
        description: format!("Imported from the {SEISMIC_SOURCE} earthquake catalog"),
        latitude: event.latitude,
        longitude: event.longitude,
        magnitude: event.magnitude,
        depth: event.depth_km,
        affected_radius: 0.0,
        severity,
        status: LocationStatus::Active,
        kind: DisasterKind::Earthquake,
        source: SEISMIC_SOURCE.into(),
        source_id: event.id.clone(),
        timestamp,
    };
    RecordService::new(store).create(&location).await
}

fn article_category(category: &str) -> ArticleCategory {
    match category {
        "disaster" => ArticleCategory::Disaster,
        "preparedness" => ArticleCategory::Preparedness,
        "recovery" => ArticleCategory::Recovery,
        _ => ArticleCategory::General,
    }
}

/// Materialize a feed news item as a draft news article. Disaster-tagged
/// items are stamped high priority, everything else medium.
pub async fn import_news(store: Arc<dyn DocumentStore>, item: &NewsItem) -> Result<String> {
    let category = article_category(&item.category);
    let article = NewsArticle {
        id: None,
        title: item.title.clone(),
        content: item.content.clone(),
        author: item.source.clone(),
        category,
        status: PublishState::Draft,
        priority: if category == ArticleCategory::Disaster {
            Priority::High
        } else {
            Priority::Medium
        },
        region: "Nepal".into(),
        published_at: None,
        created_at: Utc::now(),
        image_url: if item.image.is_empty() { None } else { Some(item.image.clone()) },
    };
    RecordService::new(store).create(&article).await
}
