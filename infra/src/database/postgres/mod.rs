//! PostgreSQL repository implementations

mod token_repository_impl;
mod user_repository_impl;

pub use token_repository_impl::PgTokenRepository;
pub use user_repository_impl::PgUserRepository;

use sf_core::errors::DomainError;

/// Log a failed query and convert it into an internal domain error
pub(crate) fn query_failed(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "{}", context);
    DomainError::Internal {
        message: format!("{}: {}", context, error),
    }
}
