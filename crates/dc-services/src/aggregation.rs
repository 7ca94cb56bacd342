//! # Aggregation layer
//!
//! Holds the latest batch from each feed behind an explicit
//! idle → loading → loaded | failed state machine, one per source. A
//! failed refresh never blanks out the last good batch, and responses
//! from superseded requests are discarded by sequence number, so a slow
//! stale fetch can never overwrite a newer one.
//!
//! `build_map_view` merges the classified feed batches with the persisted
//! disaster locations into the single renderable collection the map and
//! list consume.

use std::sync::{Arc, Mutex, MutexGuard};

use dc_core::classify::seismic_severity;
use dc_core::models::{DisasterLocation, FloodObservation, NewsItem, SeismicEvent, Severity};
use dc_feeds::flood::{self, FloodStrategy};
use dc_feeds::{earthquake, news, FeedConfig, HttpFetch};
use serde::Serialize;

/// Load phase of one data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Latest-result cache for one source, with monotonic request sequencing.
#[derive(Debug)]
pub struct SourceCache<T> {
    phase: LoadPhase,
    data: Vec<T>,
    issued: u64,
    applied: u64,
}

impl<T: Clone> SourceCache<T> {
    pub fn new() -> Self {
        Self { phase: LoadPhase::Idle, data: Vec::new(), issued: 0, applied: 0 }
    }

    /// Start a refresh: hands out the sequence number the eventual
    /// response must present.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.phase = LoadPhase::Loading;
        self.issued
    }

    /// Apply a completed fetch. Responses that are not for the latest
    /// issued request, or that raced behind an already-applied one, are
    /// dropped. A failure marks the phase but retains the previous data.
    /// Returns whether the response was accepted.
    pub fn apply(&mut self, seq: u64, result: anyhow::Result<Vec<T>>) -> bool {
        if seq != self.issued || seq <= self.applied {
            return false;
        }
        self.applied = seq;
        match result {
            Ok(batch) => {
                self.data = batch;
                self.phase = LoadPhase::Loaded;
            }
            Err(_) => {
                self.phase = LoadPhase::Failed;
            }
        }
        true
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn snapshot(&self) -> SourceSnapshot<T> {
        SourceSnapshot { phase: self.phase, data: self.data.clone() }
    }
}

impl<T: Clone> Default for SourceCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of one source cache.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSnapshot<T> {
    pub phase: LoadPhase,
    pub data: Vec<T>,
}

/// Owns one cache per external feed and refreshes them through the
/// adapters. Caches are locked only around begin/apply, never across a
/// fetch, so a refresh of one source never stalls reads of another.
pub struct FeedHub {
    http: Arc<dyn HttpFetch>,
    config: FeedConfig,
    flood_strategies: Vec<Box<dyn FloodStrategy>>,
    seismic: Mutex<SourceCache<SeismicEvent>>,
    news: Mutex<SourceCache<NewsItem>>,
    flood: Mutex<SourceCache<FloodObservation>>,
}

impl FeedHub {
    pub fn new(http: Arc<dyn HttpFetch>, config: FeedConfig) -> Self {
        let flood_strategies = flood::default_strategies(&config);
        Self {
            http,
            config,
            flood_strategies,
            seismic: Mutex::new(SourceCache::new()),
            news: Mutex::new(SourceCache::new()),
            flood: Mutex::new(SourceCache::new()),
        }
    }

    fn lock<T>(cache: &Mutex<SourceCache<T>>) -> MutexGuard<'_, SourceCache<T>> {
        cache.lock().expect("source cache mutex poisoned")
    }

    pub async fn refresh_seismic(&self) {
        let seq = Self::lock(&self.seismic).begin();
        let result = earthquake::try_fetch_earthquakes(self.http.as_ref(), &self.config).await;
        Self::lock(&self.seismic).apply(seq, result);
    }

    pub async fn refresh_news(&self) {
        let seq = Self::lock(&self.news).begin();
        let result = news::try_fetch_news(self.http.as_ref(), &self.config).await;
        Self::lock(&self.news).apply(seq, result);
    }

    pub async fn refresh_flood(&self) {
        let seq = Self::lock(&self.flood).begin();
        let result = flood::try_fetch_floods(&self.flood_strategies, self.http.as_ref()).await;
        Self::lock(&self.flood).apply(seq, result);
    }

    /// Refresh every source. The fetches are independent and share no
    /// state, so ordering is immaterial.
    pub async fn refresh_all(&self) {
        self.refresh_seismic().await;
        self.refresh_news().await;
        self.refresh_flood().await;
    }

    pub fn seismic_snapshot(&self) -> SourceSnapshot<SeismicEvent> {
        Self::lock(&self.seismic).snapshot()
    }

    pub fn news_snapshot(&self) -> SourceSnapshot<NewsItem> {
        Self::lock(&self.news).snapshot()
    }

    pub fn flood_snapshot(&self) -> SourceSnapshot<FloodObservation> {
        Self::lock(&self.flood).snapshot()
    }
}

/// One renderable marker, whatever its origin.
#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    pub id: String,
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Origin label: "earthquake", "flood" or the persisted record's kind
    pub category: String,
    pub severity: Severity,
    pub color: &'static str,
    pub detail: String,
}

/// Merge classified feed batches and persisted locations into one marker
/// collection. Pure; ordering is feed-seismic, feed-flood, then persisted.
pub fn build_map_view(
    seismic: &[SeismicEvent],
    floods: &[FloodObservation],
    locations: &[DisasterLocation],
) -> Vec<MapMarker> {
    let mut markers = Vec::with_capacity(seismic.len() + floods.len() + locations.len());

    for event in seismic {
        let severity = seismic_severity(event.magnitude);
        markers.push(MapMarker {
            id: format!("quake:{}", event.id),
            title: event.place.clone(),
            latitude: event.latitude,
            longitude: event.longitude,
            category: "earthquake".into(),
            severity,
            color: severity.color(),
            detail: format!("M{:.1} at {:.0} km depth", event.magnitude, event.depth_km),
        });
    }

    for obs in floods {
        markers.push(MapMarker {
            id: format!("flood:{}:{}", obs.location, obs.date),
            title: obs.location.clone(),
            latitude: obs.latitude,
            longitude: obs.longitude,
            category: "flood".into(),
            severity: obs.risk,
            color: obs.risk.color(),
            detail: format!("{:.1} m³/s at {}", obs.discharge_m3s, obs.station),
        });
    }

    for loc in locations {
        let detail = match loc.kind {
            // magnitude/depth only mean anything for earthquakes
            dc_core::models::DisasterKind::Earthquake => {
                format!("{} (M{:.1}, {:.0} km)", loc.description, loc.magnitude, loc.depth)
            }
            _ => loc.description.clone(),
        };
        markers.push(MapMarker {
            id: format!("report:{}", loc.id.clone().unwrap_or_default()),
            title: loc.title.clone(),
            latitude: loc.latitude,
            longitude: loc.longitude,
            category: serde_json::to_value(loc.kind)
                .ok()
                .and_then(|v| v.as_str().map(str::to_owned))
                .unwrap_or_else(|| "report".into()),
            severity: loc.severity,
            color: loc.severity.color(),
            detail,
        });
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use dc_core::models::{DisasterKind, LocationStatus};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn event(id: &str, mag: f64) -> SeismicEvent {
        SeismicEvent {
            id: id.into(),
            magnitude: mag,
            place: format!("near {id}"),
            time: 0,
            latitude: 27.7,
            longitude: 85.3,
            depth_km: 10.0,
            url: String::new(),
        }
    }

    #[test]
    fn new_cache_is_idle_and_empty() {
        let cache: SourceCache<SeismicEvent> = SourceCache::new();
        assert_eq!(cache.phase(), LoadPhase::Idle);
        assert!(cache.data().is_empty());
    }

    #[test]
    fn successful_apply_replaces_wholesale() {
        let mut cache = SourceCache::new();
        let seq = cache.begin();
        assert_eq!(cache.phase(), LoadPhase::Loading);
        assert!(cache.apply(seq, Ok(vec![event("a", 4.0), event("b", 5.0)])));
        assert_eq!(cache.phase(), LoadPhase::Loaded);
        assert_eq!(cache.data().len(), 2);

        let seq = cache.begin();
        assert!(cache.apply(seq, Ok(vec![event("c", 3.0)])));
        assert_eq!(cache.data().len(), 1);
        assert_eq!(cache.data()[0].id, "c");
    }

    #[test]
    fn failed_refresh_retains_last_good_data() {
        let mut cache = SourceCache::new();
        let seq = cache.begin();
        cache.apply(seq, Ok(vec![event("keep", 4.4)]));

        let seq = cache.begin();
        assert!(cache.apply(seq, Err(anyhow::anyhow!("upstream down"))));
        assert_eq!(cache.phase(), LoadPhase::Failed);
        assert_eq!(cache.data().len(), 1, "failure must not blank good data");
        assert_eq!(cache.data()[0].id, "keep");
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut cache = SourceCache::new();
        let old = cache.begin();
        let newer = cache.begin();
        // the newer request completes first
        assert!(cache.apply(newer, Ok(vec![event("new", 5.0)])));
        // the older response arrives late and must not win
        assert!(!cache.apply(old, Ok(vec![event("old", 2.5)])));
        assert_eq!(cache.data()[0].id, "new");

        // a response for a superseded request is dropped even when it
        // arrives before the newer one completes
        let superseded = cache.begin();
        let latest = cache.begin();
        assert!(!cache.apply(superseded, Ok(vec![event("race", 3.0)])));
        assert_eq!(cache.data()[0].id, "new");
        assert!(cache.apply(latest, Ok(vec![event("final", 3.0)])));
        assert_eq!(cache.data()[0].id, "final");
    }

    /// Fails on the first call, succeeds afterwards.
    struct FlakyFetch {
        failed_once: AtomicBool,
    }

    #[async_trait]
    impl HttpFetch for FlakyFetch {
        async fn get_json(&self, _url: &str) -> anyhow::Result<Value> {
            if !self.failed_once.swap(true, Ordering::SeqCst) {
                anyhow::bail!("first call fails");
            }
            Ok(json!({
                "features": [{
                    "id": "us7000recv",
                    "properties": { "mag": 5.2, "place": "Nepal", "time": 1, "url": "" },
                    "geometry": { "coordinates": [85.0, 28.0, 12.0] },
                }]
            }))
        }
        async fn get_text(&self, _url: &str) -> anyhow::Result<String> {
            anyhow::bail!("no CSV in this test")
        }
    }

    #[tokio::test]
    async fn hub_transitions_failed_then_loaded() {
        let hub = FeedHub::new(
            Arc::new(FlakyFetch { failed_once: AtomicBool::new(false) }),
            FeedConfig::default(),
        );
        hub.refresh_seismic().await;
        assert_eq!(hub.seismic_snapshot().phase, LoadPhase::Failed);

        hub.refresh_seismic().await;
        let snap = hub.seismic_snapshot();
        assert_eq!(snap.phase, LoadPhase::Loaded);
        assert_eq!(snap.data.len(), 1);
    }

    #[test]
    fn map_view_merges_and_classifies_all_origins() {
        let floods = vec![FloodObservation {
            date: "2026-08-29".into(),
            location: "Koshi Basin".into(),
            latitude: 26.9,
            longitude: 87.1,
            discharge_m3s: 1500.0,
            risk: Severity::Critical,
            station: "Chatara".into(),
        }];
        let locations = vec![DisasterLocation {
            id: Some("doc1".into()),
            title: "Landslide at Sindhupalchok".into(),
            description: "Road blocked".into(),
            latitude: 27.95,
            longitude: 85.68,
            magnitude: 0.0,
            depth: 0.0,
            affected_radius: 5.0,
            severity: Severity::High,
            status: LocationStatus::Active,
            kind: DisasterKind::Landslide,
            source: "NSC".into(),
            source_id: String::new(),
            timestamp: Utc::now(),
        }];
        let markers = build_map_view(&[event("q1", 6.2)], &floods, &locations);
        assert_eq!(markers.len(), 3);

        let quake = &markers[0];
        assert_eq!(quake.severity, Severity::Critical, "magnitude 6.2 classifies critical");
        assert_eq!(quake.category, "earthquake");

        let flood = &markers[1];
        assert_eq!(flood.severity, Severity::Critical);
        assert!(flood.detail.contains("Chatara"));

        let report = &markers[2];
        assert_eq!(report.category, "landslide");
        // non-earthquake reports never render magnitude/depth
        assert!(!report.detail.contains('M'), "detail was {:?}", report.detail);
    }
}
