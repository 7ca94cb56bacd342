//! # Domain Models
//!
//! These structs represent the core entities of the disaster console.
//! Feed records (SeismicEvent, NewsItem, FloodObservation) are transient:
//! each refresh replaces the previous batch wholesale, nothing is merged.
//! The remaining records are administrator-authored and live in the
//! document store under camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Qualitative severity bucket shared by seismic severity, flood risk,
/// disaster locations and notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Marker color used on the map and in list badges. Fixed lookup.
    pub fn color(self) -> &'static str {
        match self {
            Severity::Low => "#22c55e",
            Severity::Medium => "#f59e0b",
            Severity::High => "#f97316",
            Severity::Critical => "#dc2626",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterKind {
    Earthquake,
    Flood,
    Landslide,
    Fire,
    Storm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationStatus {
    Active,
    Inactive,
    Resolved,
}

/// One catalogued earthquake, as delivered by the seismic feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeismicEvent {
    /// Source-assigned event id (e.g., "us7000abcd")
    pub id: String,
    pub magnitude: f64,
    /// Human-readable epicenter description
    pub place: String,
    /// Event time, epoch milliseconds
    pub time: i64,
    pub latitude: f64,
    pub longitude: f64,
    /// Hypocenter depth in kilometers
    pub depth_km: f64,
    pub url: String,
}

/// One news article from the news feed, after tolerant field coalescing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image: String,
    pub date: String,
    pub category: String,
    pub source: String,
}

/// One river-discharge reading or forecast point.
///
/// `risk` is always recomputed from `discharge_m3s` by the classifier,
/// never trusted from the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodObservation {
    pub date: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub discharge_m3s: f64,
    pub risk: Severity,
    pub station: String,
}

/// An administrator-authored (or imported) disaster site.
///
/// `magnitude` and `depth` carry meaning only when `kind` is Earthquake;
/// for every other kind they are zero and must not be rendered as
/// earthquake metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub magnitude: f64,
    pub depth: f64,
    pub affected_radius: f64,
    pub severity: Severity,
    pub status: LocationStatus,
    #[serde(rename = "type")]
    pub kind: DisasterKind,
    /// Originating authority, e.g. "USGS", "NSC"
    pub source: String,
    pub source_id: String,
    pub timestamp: DateTime<Utc>,
}

/// Publication lifecycle shared by notifications and news articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishState {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub message: String,
    pub region: String,
    pub severity: Severity,
    pub status: PublishState,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Operator,
    Viewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub region: String,
    pub status: UserStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleCategory {
    Disaster,
    Preparedness,
    Recovery,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: ArticleCategory,
    pub status: PublishState,
    pub priority: Priority,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactCategory {
    Medical,
    Fire,
    Police,
    Rescue,
    Government,
    Ngo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "24/7")]
    AllDay,
    #[serde(rename = "business_hours")]
    BusinessHours,
    #[serde(rename = "emergency_only")]
    EmergencyOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub organization: String,
    pub position: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_phone: Option<String>,
    pub region: String,
    pub category: ContactCategory,
    pub availability: Availability,
    pub is_active: bool,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
}

/// Current conditions at one coordinate, for the weather overlay page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub humidity_pct: i64,
    pub conditions: String,
    /// Rainfall over the last hour, millimeters
    pub rain_1h_mm: f64,
    /// Rainfall over the last three hours, millimeters
    pub rain_3h_mm: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_low_to_critical() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn disaster_location_round_trips_with_camel_case_wire_names() {
        let loc = DisasterLocation {
            id: None,
            title: "Gorkha aftershock".into(),
            description: "Felt across Bagmati".into(),
            latitude: 28.0,
            longitude: 84.6,
            magnitude: 5.1,
            depth: 12.0,
            affected_radius: 30.0,
            severity: Severity::High,
            status: LocationStatus::Active,
            kind: DisasterKind::Earthquake,
            source: "USGS".into(),
            source_id: "us7000test".into(),
            timestamp: Utc::now(),
        };
        let value = serde_json::to_value(&loc).unwrap();
        assert_eq!(value["type"], "earthquake");
        assert!(value.get("sourceId").is_some());
        assert!(value.get("affectedRadius").is_some());
        let back: DisasterLocation = serde_json::from_value(value).unwrap();
        assert_eq!(back, loc);
    }

    #[test]
    fn availability_serializes_to_store_labels() {
        assert_eq!(
            serde_json::to_value(Availability::AllDay).unwrap(),
            serde_json::json!("24/7")
        );
        assert_eq!(
            serde_json::to_value(Availability::BusinessHours).unwrap(),
            serde_json::json!("business_hours")
        );
    }
}
