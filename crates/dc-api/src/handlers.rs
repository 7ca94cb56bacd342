//! # dc-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the service
//! layer. Every mutation responds with the authoritative re-listed
//! collection rather than echoing the request back, so clients only ever
//! render durably committed state.

use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use dc_core::classify::rain_intensity;
use dc_core::error::AppError;
use dc_core::gazetteer;
use dc_core::models::{
    DisasterLocation, DisasterUpdate, EmergencyContact, NewsArticle, NewsItem, Notification,
    SeismicEvent, User,
};
use dc_core::traits::DocumentStore;
use dc_feeds::weather::{self, TileLayer};
use dc_feeds::{FeedConfig, HttpFetch};
use dc_services::import;
use dc_services::{build_map_view, FeedHub, RecordService, StoredRecord};
use serde::Deserialize;
use serde_json::json;

/// State shared across all workers.
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub hub: Arc<FeedHub>,
    pub http: Arc<dyn HttpFetch>,
    pub feeds: FeedConfig,
}

fn error_response(err: &AppError) -> HttpResponse {
    let body = json!({ "error": err.to_string() });
    match err {
        AppError::NotFound(_, _) => HttpResponse::NotFound().json(body),
        AppError::ValidationError(_) => HttpResponse::BadRequest().json(body),
        AppError::Conflict(_) => HttpResponse::Conflict().json(body),
        AppError::Upstream(_) => HttpResponse::BadGateway().json(body),
        AppError::Internal(_) => HttpResponse::InternalServerError().json(body),
    }
}

// ── Aggregated map and feeds ────────────────────────────────────────────────

/// Merged map markers: classified feed batches plus persisted locations.
pub async fn map_view(data: web::Data<AppState>) -> impl Responder {
    let locations = match RecordService::<DisasterLocation>::new(data.store.clone()).list().await {
        Ok(locations) => locations,
        Err(err) => return error_response(&err),
    };
    let seismic = data.hub.seismic_snapshot();
    let flood = data.hub.flood_snapshot();
    let markers = build_map_view(&seismic.data, &flood.data, &locations);
    HttpResponse::Ok().json(markers)
}

pub async fn earthquake_feed(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.hub.seismic_snapshot())
}

pub async fn news_feed(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.hub.news_snapshot())
}

pub async fn flood_feed(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(data.hub.flood_snapshot())
}

/// Re-fetch all three sources. Always 202: a failed source keeps its last
/// good data and reports its phase through the feed endpoints.
pub async fn refresh_feeds(data: web::Data<AppState>) -> impl Responder {
    data.hub.refresh_all().await;
    HttpResponse::Accepted().json(json!({
        "seismic": data.hub.seismic_snapshot().phase,
        "news": data.hub.news_snapshot().phase,
        "flood": data.hub.flood_snapshot().phase,
    }))
}

// ── Gazetteer ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn search_places(query: web::Query<SearchQuery>) -> impl Responder {
    HttpResponse::Ok().json(gazetteer::search(&query.q))
}

// ── Weather overlay ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
}

pub async fn current_weather(
    data: web::Data<AppState>,
    query: web::Query<WeatherQuery>,
) -> impl Responder {
    match weather::fetch_current_weather(data.http.as_ref(), &data.feeds, query.lat, query.lon)
        .await
    {
        Some(conditions) => {
            let bucket = rain_intensity(conditions.rain_1h_mm);
            HttpResponse::Ok().json(json!({
                "conditions": conditions,
                "rain": { "label": bucket.label(), "color": bucket.color() },
            }))
        }
        None => error_response(&AppError::Upstream("weather service unreachable".into())),
    }
}

#[derive(Deserialize)]
pub struct TileQuery {
    pub layer: String,
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

/// Resolve a raster-tile URL for one overlay layer.
pub async fn weather_tile(
    data: web::Data<AppState>,
    query: web::Query<TileQuery>,
) -> impl Responder {
    match TileLayer::from_code(&query.layer) {
        Some(layer) => HttpResponse::Ok().json(json!({
            "url": weather::tile_url(&data.feeds, layer, query.zoom, query.x, query.y),
        })),
        None => error_response(&AppError::ValidationError(format!(
            "unknown tile layer {}",
            query.layer
        ))),
    }
}

// ── Record CRUD ─────────────────────────────────────────────────────────────

pub async fn list_records<T: StoredRecord + 'static>(data: web::Data<AppState>) -> impl Responder {
    match RecordService::<T>::new(data.store.clone()).list().await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(err) => error_response(&err),
    }
}

pub async fn create_record<T: StoredRecord + 'static>(
    data: web::Data<AppState>,
    body: web::Json<T>,
) -> impl Responder {
    let record = body.into_inner();
    let svc = RecordService::<T>::new(data.store.clone());
    if let Err(err) = svc.create(&record).await {
        return error_response(&err);
    }
    match svc.list().await {
        Ok(records) => HttpResponse::Created().json(records),
        Err(err) => error_response(&err),
    }
}

pub async fn update_record<T: StoredRecord + 'static>(
    data: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<T>,
) -> impl Responder {
    let id = path.into_inner();
    let record = body.into_inner();
    let svc = RecordService::<T>::new(data.store.clone());
    if let Err(err) = svc.update(&id, &record).await {
        return error_response(&err);
    }
    match svc.list().await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(err) => error_response(&err),
    }
}

pub async fn delete_record<T: StoredRecord + 'static>(
    data: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let id = path.into_inner();
    let svc = RecordService::<T>::new(data.store.clone());
    if let Err(err) = svc.delete(&id).await {
        return error_response(&err);
    }
    match svc.list().await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(err) => error_response(&err),
    }
}

/// Register the four CRUD routes for one record type under `path`.
fn crud_scope<T: StoredRecord + 'static>(path: &str) -> actix_web::Scope {
    web::scope(path)
        .route("", web::get().to(list_records::<T>))
        .route("", web::post().to(create_record::<T>))
        .route("/{id}", web::put().to(update_record::<T>))
        .route("/{id}", web::delete().to(delete_record::<T>))
}

// ── Imports ─────────────────────────────────────────────────────────────────

pub async fn import_earthquake(
    data: web::Data<AppState>,
    body: web::Json<SeismicEvent>,
) -> impl Responder {
    match import::import_seismic(data.store.clone(), &body.into_inner()).await {
        Ok(id) => HttpResponse::Created().json(json!({ "id": id })),
        Err(err) => error_response(&err),
    }
}

pub async fn import_news_item(
    data: web::Data<AppState>,
    body: web::Json<NewsItem>,
) -> impl Responder {
    match import::import_news(data.store.clone(), &body.into_inner()).await {
        Ok(id) => HttpResponse::Created().json(json!({ "id": id })),
        Err(err) => error_response(&err),
    }
}

/// Full route table under /api.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/map", web::get().to(map_view))
            .route("/feeds/earthquakes", web::get().to(earthquake_feed))
            .route("/feeds/news", web::get().to(news_feed))
            .route("/feeds/floods", web::get().to(flood_feed))
            .route("/feeds/refresh", web::post().to(refresh_feeds))
            .route("/gazetteer", web::get().to(search_places))
            .route("/weather", web::get().to(current_weather))
            .route("/weather/tile", web::get().to(weather_tile))
            .route("/import/earthquake", web::post().to(import_earthquake))
            .route("/import/news", web::post().to(import_news_item))
            .service(crud_scope::<DisasterLocation>("/locations"))
            .service(crud_scope::<Notification>("/notifications"))
            .service(crud_scope::<DisasterUpdate>("/updates"))
            .service(crud_scope::<EmergencyContact>("/contacts"))
            .service(crud_scope::<User>("/users"))
            .service(crud_scope::<NewsArticle>("/articles")),
    );
}
