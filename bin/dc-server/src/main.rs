//! # Disaster Console Server
//!
//! The entry point that assembles the application: in-memory document
//! store, reqwest feed transport, feed hub, and the JSON API on top.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use dc_api::{configure, middleware, AppState};
use dc_core::traits::DocumentStore;
use dc_feeds::{FeedConfig, HttpFetch, ReqwestFetch};
use dc_services::FeedHub;
use dc_store_memory::MemoryStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let feeds = FeedConfig::from_env();

    // 1. Persistence: in-memory document store
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());

    // 2. Transport + aggregation
    let http: Arc<dyn HttpFetch> = Arc::new(ReqwestFetch::new());
    let hub = Arc::new(FeedHub::new(http.clone(), feeds.clone()));

    // Warm the caches; a failed source just stays empty until the next
    // refresh request.
    hub.refresh_all().await;

    let state = web::Data::new(AppState { store, hub, http, feeds });

    let bind = std::env::var("DC_BIND").unwrap_or_else(|_| "127.0.0.1:8080".into());
    log::info!("disaster console listening on http://{bind}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::standard_middleware())
            .wrap(middleware::cors_policy())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}
