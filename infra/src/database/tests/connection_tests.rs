//! Unit tests for database connection pool

use sf_shared::DatabaseConfig;

use crate::database::connection::{DatabasePool, PoolStatistics};
use crate::InfrastructureError;

#[tokio::test]
async fn test_pool_creation_with_invalid_url() {
    let config = DatabaseConfig::new("not a url");

    let result = DatabasePool::new(&config).await;
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[tokio::test]
#[ignore] // Requires actual database
async fn test_pool_health_check() {
    let url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| DatabaseConfig::default().url);
    let config = DatabaseConfig::new(url).with_max_connections(2);

    let pool = DatabasePool::new(&config).await.unwrap();
    assert!(pool.health_check().await.unwrap());
}

#[test]
fn test_pool_statistics_display() {
    let stats = PoolStatistics {
        connections: 5,
        idle_connections: 3,
        max_connections: 10,
    };

    let display = format!("{}", stats);
    assert!(display.contains("5/10"));
    assert!(display.contains("3 idle"));
}

#[test]
fn test_infrastructure_error_becomes_internal() {
    let error: sf_core::DomainError = InfrastructureError::Config("bad url".to_string()).into();
    assert!(matches!(error, sf_core::DomainError::Internal { .. }));
    assert!(!error.is_client_error());
}
