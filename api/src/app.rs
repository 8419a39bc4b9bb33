//! Application factory
//!
//! Registers the shared state, the session gate and the routes. Middleware
//! (tracing, CORS) is added by the caller so tests can run the bare app.

use std::sync::Arc;

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use sf_core::{PasswordHasher, TokenProvider, TokenRepository, UserRepository};
use sf_shared::{error_codes, ErrorResponse};

use crate::handlers::ApiError;
use crate::middleware::SessionGate;
use crate::routes::{auth, health::health_check};

/// Create the application with all routes and dependencies
pub fn create_app<P, L, U, H>(
    state: web::Data<auth::AppState<P, L, U, H>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
>
where
    P: TokenProvider + 'static,
    L: TokenRepository + 'static,
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    let gate: Arc<dyn SessionGate> = Arc::new(state.session.clone());

    App::new()
        .app_data(state)
        .app_data(web::Data::from(gate))
        .app_data(json_config())
        .configure(configure::<P, L, U, H>)
        .default_service(web::route().to(not_found))
}

/// Route table
pub fn configure<P, L, U, H>(cfg: &mut web::ServiceConfig)
where
    P: TokenProvider + 'static,
    L: TokenRepository + 'static,
    U: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api/v1").service(
            web::scope("/auth")
                .route("/signup", web::post().to(auth::signup::<P, L, U, H>))
                .route("/login", web::post().to(auth::login::<P, L, U, H>))
                .route("/logout", web::post().to(auth::logout::<P, L, U, H>))
                .route("/me", web::get().to(auth::me::<P, L, U, H>))
                .route("/admin-check", web::get().to(auth::admin_check::<P, L, U, H>))
                .route("/worker-check", web::get().to(auth::worker_check::<P, L, U, H>)),
        ),
    );
}

/// Malformed JSON bodies answer with the shared error body instead of plain text
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::bad_request(format!("Invalid JSON body: {}", err)).into())
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
