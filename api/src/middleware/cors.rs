//! CORS configuration.
//!
//! Session tokens travel in cookies, so every variant allows credentials.
//! Outside production any origin is echoed back unless origins are
//! configured; production only admits the configured origins.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use sf_shared::{Environment, ServerConfig};

const MAX_AGE_SECONDS: usize = 3600;

pub fn create_cors(environment: Environment, server: &ServerConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(MAX_AGE_SECONDS);

    if server.allowed_origins.is_empty() && !environment.is_production() {
        tracing::info!(%environment, "CORS: allowing any origin");
        return cors.allow_any_origin();
    }

    for origin in &server.allowed_origins {
        cors = cors.allowed_origin(origin);
    }
    tracing::info!(
        %environment,
        origins = server.allowed_origins.len(),
        "CORS: restricted to configured origins"
    );
    cors
}
