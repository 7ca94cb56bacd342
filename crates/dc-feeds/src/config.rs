//! Feed endpoint configuration.
//!
//! `Default` carries the production endpoints; every field can be
//! overridden through `DC_*` environment variables so deployments can
//! point at mirrors (and tests at local fixtures).

use std::env;

#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// USGS fdsnws event catalog base URL
    pub seismic_url: String,
    /// Earliest event date requested from the catalog (YYYY-MM-DD)
    pub seismic_start_date: String,
    /// Nepal news aggregation endpoint (JSON array)
    pub news_url: String,
    /// Servir-HKH streamflow forecast CSV
    pub flood_csv_url: String,
    /// Open-Meteo GloFAS river-discharge forecast base URL
    pub glofas_url: String,
    /// Coordinates substituted when a CSV line carries unparseable ones.
    /// Defaults sit near Kathmandu, matching the historical feed behavior.
    pub csv_fallback_latitude: f64,
    pub csv_fallback_longitude: f64,
    /// OpenWeatherMap current-conditions endpoint
    pub weather_url: String,
    /// OpenWeatherMap raster-tile endpoint (layer/zoom/x/y appended)
    pub weather_tile_url: String,
    pub weather_api_key: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            seismic_url: "https://earthquake.usgs.gov/fdsnws/event/1/query".into(),
            seismic_start_date: "2024-01-01".into(),
            news_url: "https://apinp.com/news/api.php".into(),
            flood_csv_url: "https://servirhkh.yipl.net/static/data/streamflow_forecast.csv".into(),
            glofas_url: "https://api.open-meteo.com/v1/glofas".into(),
            csv_fallback_latitude: 27.7,
            csv_fallback_longitude: 85.3,
            weather_url: "https://api.openweathermap.org/data/2.5/weather".into(),
            weather_tile_url: "https://maps.openweathermap.org/maps/2.0/weather".into(),
            weather_api_key: String::new(),
        }
    }
}

impl FeedConfig {
    /// Defaults overlaid with any `DC_*` environment overrides.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        let overrides: [(&str, &mut String); 7] = [
            ("DC_SEISMIC_URL", &mut cfg.seismic_url),
            ("DC_SEISMIC_START_DATE", &mut cfg.seismic_start_date),
            ("DC_NEWS_URL", &mut cfg.news_url),
            ("DC_FLOOD_CSV_URL", &mut cfg.flood_csv_url),
            ("DC_GLOFAS_URL", &mut cfg.glofas_url),
            ("DC_WEATHER_URL", &mut cfg.weather_url),
            ("DC_WEATHER_API_KEY", &mut cfg.weather_api_key),
        ];
        for (key, slot) in overrides {
            if let Ok(value) = env::var(key) {
                *slot = value;
            }
        }
        if let Some(lat) = env::var("DC_CSV_FALLBACK_LAT").ok().and_then(|v| v.parse().ok()) {
            cfg.csv_fallback_latitude = lat;
        }
        if let Some(lon) = env::var("DC_CSV_FALLBACK_LON").ok().and_then(|v| v.parse().ok()) {
            cfg.csv_fallback_longitude = lon;
        }
        cfg
    }
}
