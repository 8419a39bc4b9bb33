//! # Infrastructure Layer
//!
//! Concrete implementations of the repository traits declared in `sf_core`:
//!
//! - **Database**: PostgreSQL connection pool and repositories using SQLx
//! - **Migrations**: the `users`, `worker` and `token` tables
//!
//! ## Features
//!
//! - `postgres`: Enable PostgreSQL database support (default)

use sf_core::errors::DomainError;

/// Database module - PostgreSQL implementations using SQLx
#[cfg(feature = "postgres")]
pub mod database;

#[cfg(feature = "postgres")]
pub use database::{DatabasePool, PgTokenRepository, PgUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Internal {
            message: error.to_string(),
        }
    }
}
