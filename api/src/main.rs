use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use sf_api::{
    create_app, middleware::create_cors, telemetry, AppState, DependencyCheck, SessionCookies,
};
use sf_core::{
    BcryptPasswordHasher, SessionService, SessionServiceConfig, TokenService, TokenServiceConfig,
};
use sf_infra::{DatabasePool, PgTokenRepository, PgUserRepository};
use sf_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    telemetry::init_telemetry(&config.logging);

    tracing::info!(environment = %config.environment, "Starting Storefront API");
    if config.jwt.is_using_default_secret() {
        tracing::warn!("Using the default JWT secret; set SF_JWT__SECRET outside development");
    }

    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the database")?;
    database
        .run_migrations()
        .await
        .context("failed to run database migrations")?;
    tracing::info!(pool = %database.get_statistics(), "Database ready");

    let session = SessionService::new(
        Arc::new(TokenService::new(TokenServiceConfig::from(&config.jwt))),
        Arc::new(PgTokenRepository::new(database.get_pool().clone())),
        Arc::new(PgUserRepository::new(database.get_pool().clone())),
        Arc::new(BcryptPasswordHasher::new(config.session.bcrypt_cost)),
        SessionServiceConfig::from(&config.session),
    );
    let state = web::Data::new(AppState::new(
        session,
        SessionCookies::new(config.cookie.clone(), &config.jwt),
    ));

    let database_check: web::Data<dyn DependencyCheck> =
        web::Data::from(Arc::new(database.clone()) as Arc<dyn DependencyCheck>);

    let bind_address = config.server.bind_address();
    tracing::info!(%bind_address, "Server will bind");

    let server_config = config.clone();
    let mut server = HttpServer::new(move || {
        create_app(state.clone())
            .app_data(database_check.clone())
            .wrap(create_cors(server_config.environment, &server_config.server))
            .wrap(TracingLogger::default())
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    database.close().await;
    tracing::info!("Server stopped");
    Ok(())
}
