//! Seismic feed adapter.
//!
//! One GET against the USGS event catalog, restricted to the Nepal
//! bounding box and a minimum magnitude, mapped feature-by-feature into
//! `SeismicEvent`. Failure degrades to an empty batch; the caller keeps
//! whatever it loaded last time.

use dc_core::models::SeismicEvent;
use serde_json::Value;

use crate::config::FeedConfig;
use crate::http::HttpFetch;

/// Nepal region bounding box and catalog floor.
pub const MIN_LATITUDE: f64 = 26.0;
pub const MAX_LATITUDE: f64 = 31.0;
pub const MIN_LONGITUDE: f64 = 80.0;
pub const MAX_LONGITUDE: f64 = 89.0;
pub const MIN_MAGNITUDE: f64 = 2.5;

fn catalog_url(cfg: &FeedConfig) -> String {
    format!(
        "{}?format=geojson&starttime={}&minlatitude={}&maxlatitude={}&minlongitude={}&maxlongitude={}&minmagnitude={}&orderby=time",
        cfg.seismic_url,
        cfg.seismic_start_date,
        MIN_LATITUDE,
        MAX_LATITUDE,
        MIN_LONGITUDE,
        MAX_LONGITUDE,
        MIN_MAGNITUDE,
    )
}

/// Fetch the current earthquake batch, surfacing transport failures to the
/// caller (the aggregation layer distinguishes "failed" from "no data").
pub async fn try_fetch_earthquakes(
    http: &dyn HttpFetch,
    cfg: &FeedConfig,
) -> anyhow::Result<Vec<SeismicEvent>> {
    let body = http.get_json(&catalog_url(cfg)).await?;
    Ok(parse_feature_collection(&body))
}

/// Boundary variant: empty on any transport or parse failure.
pub async fn fetch_earthquakes(http: &dyn HttpFetch, cfg: &FeedConfig) -> Vec<SeismicEvent> {
    match try_fetch_earthquakes(http, cfg).await {
        Ok(events) => events,
        Err(err) => {
            log::warn!("seismic feed fetch failed: {err:#}");
            Vec::new()
        }
    }
}

/// Map a GeoJSON feature collection into events. Features without a
/// magnitude or a full coordinate triple are skipped, not defaulted.
fn parse_feature_collection(body: &Value) -> Vec<SeismicEvent> {
    let Some(features) = body.get("features").and_then(Value::as_array) else {
        log::warn!("seismic feed returned no feature collection");
        return Vec::new();
    };
    features.iter().filter_map(parse_feature).collect()
}

fn parse_feature(feature: &Value) -> Option<SeismicEvent> {
    let properties = feature.get("properties")?;
    let coordinates = feature
        .get("geometry")
        .and_then(|g| g.get("coordinates"))
        .and_then(Value::as_array)?;
    if coordinates.len() < 3 {
        return None;
    }
    Some(SeismicEvent {
        id: feature.get("id").and_then(Value::as_str).unwrap_or_default().to_string(),
        magnitude: properties.get("mag").and_then(Value::as_f64)?,
        place: properties
            .get("place")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        time: properties.get("time").and_then(Value::as_i64).unwrap_or_default(),
        // GeoJSON order is (longitude, latitude, depth)
        longitude: coordinates[0].as_f64()?,
        latitude: coordinates[1].as_f64()?,
        depth_km: coordinates[2].as_f64()?,
        url: properties.get("url").and_then(Value::as_str).unwrap_or_default().to_string(),
    })
}
