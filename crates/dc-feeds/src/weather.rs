//! Weather overlay adapter.
//!
//! Current conditions per coordinate plus the raster-tile URL scheme for
//! the map overlay layers. The rain buckets shown next to the readings
//! come from the shared classifier, not from here.

use dc_core::models::CurrentWeather;
use serde_json::Value;

use crate::config::FeedConfig;
use crate::http::HttpFetch;

/// Pre-rendered overlay layers offered by the tile server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileLayer {
    Precipitation,
    Wind,
    Temperature,
    Pressure,
    Clouds,
}

impl TileLayer {
    /// Layer code in the tile URL path.
    pub fn code(self) -> &'static str {
        match self {
            TileLayer::Precipitation => "PA0",
            TileLayer::Wind => "WND",
            TileLayer::Temperature => "TA2",
            TileLayer::Pressure => "APM",
            TileLayer::Clouds => "CL",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PA0" => Some(TileLayer::Precipitation),
            "WND" => Some(TileLayer::Wind),
            "TA2" => Some(TileLayer::Temperature),
            "APM" => Some(TileLayer::Pressure),
            "CL" => Some(TileLayer::Clouds),
            _ => None,
        }
    }
}

/// URL of one raster tile for a layer at zoom/x/y.
pub fn tile_url(cfg: &FeedConfig, layer: TileLayer, zoom: u8, x: u32, y: u32) -> String {
    format!(
        "{}/{}/{}/{}/{}?appid={}",
        cfg.weather_tile_url,
        layer.code(),
        zoom,
        x,
        y,
        cfg.weather_api_key,
    )
}

/// Fetch current conditions at a coordinate. `None` on any failure; the
/// caller keeps its previous reading.
pub async fn fetch_current_weather(
    http: &dyn HttpFetch,
    cfg: &FeedConfig,
    latitude: f64,
    longitude: f64,
) -> Option<CurrentWeather> {
    let url = format!(
        "{}?lat={}&lon={}&appid={}&units=metric",
        cfg.weather_url, latitude, longitude, cfg.weather_api_key,
    );
    match http.get_json(&url).await {
        Ok(body) => Some(parse_conditions(&body)),
        Err(err) => {
            log::warn!("weather fetch failed for ({latitude}, {longitude}): {err:#}");
            None
        }
    }
}

fn parse_conditions(body: &Value) -> CurrentWeather {
    CurrentWeather {
        temperature_c: body["main"]["temp"].as_f64().unwrap_or_default(),
        humidity_pct: body["main"]["humidity"].as_i64().unwrap_or_default(),
        conditions: body["weather"][0]["description"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        rain_1h_mm: body["rain"]["1h"].as_f64().unwrap_or(0.0),
        rain_3h_mm: body["rain"]["3h"].as_f64().unwrap_or(0.0),
    }
}
