//! Liveness endpoint, reporting on the backing services registered with the app

use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sf_infra::DatabasePool;

/// A backing service `/health` reports on
#[async_trait]
pub trait DependencyCheck: Send + Sync {
    /// Key the result is reported under
    fn name(&self) -> &'static str;

    async fn is_healthy(&self) -> bool;
}

#[async_trait]
impl DependencyCheck for DatabasePool {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn is_healthy(&self) -> bool {
        // Failures are logged by the pool
        self.health_check().await.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: &'static str,
    pub version: &'static str,
    pub services: BTreeMap<&'static str, HealthStatus>,
    pub timestamp: DateTime<Utc>,
}

/// Handler for GET /health
///
/// Answers 503 when a registered dependency is down. Without one registered
/// only the process itself is reported on.
pub async fn health_check(dependency: Option<web::Data<dyn DependencyCheck>>) -> HttpResponse {
    let mut services = BTreeMap::new();
    if let Some(dependency) = dependency {
        let status = if dependency.is_healthy().await {
            HealthStatus::Healthy
        } else {
            tracing::warn!(dependency = dependency.name(), "Health check failed");
            HealthStatus::Unhealthy
        };
        services.insert(dependency.name(), status);
    }

    let status = if services.values().all(|s| *s == HealthStatus::Healthy) {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    };
    let body = HealthResponse {
        status,
        service: "storefront-api",
        version: env!("CARGO_PKG_VERSION"),
        services,
        timestamp: Utc::now(),
    };

    match status {
        HealthStatus::Healthy => HttpResponse::Ok().json(body),
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(body),
    }
}
