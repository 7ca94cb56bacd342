//! disaster-console/crates/dc-api/src/middleware.rs
//!
//! Standard middleware for the console API.

use actix_web::middleware::Logger;
use actix_cors::Cors;

/// Request logger: remote-ip "request-line" status-code response-size.
pub fn standard_middleware() -> Logger {
    Logger::default()
}

/// CORS policy: the admin UI is served from a separate origin during
/// development, so all four CRUD verbs must be allowed.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .max_age(3600)
}
