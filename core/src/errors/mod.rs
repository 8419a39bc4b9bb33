//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    /// A credential store or ledger call exceeded the session I/O deadline
    #[error("Operation timed out: {operation}")]
    Timeout { operation: String },

    /// The refresh side of a session check failed. `access_valid` is what the
    /// access token check concluded before the refresh token was looked at.
    #[error("Session rejected: {source}")]
    SessionRejected {
        access_valid: bool,
        source: Box<DomainError>,
    },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// Whether the failure was caused by the caller (bad credentials, bad or
    /// revoked tokens) rather than by the server or its storage.
    pub fn is_client_error(&self) -> bool {
        match self {
            DomainError::Auth(_)
            | DomainError::Token(_)
            | DomainError::NotFound { .. } => true,
            DomainError::SessionRejected { source, .. } => source.is_client_error(),
            DomainError::Internal { .. } | DomainError::Timeout { .. } => false,
        }
    }

    /// The innermost error, looking through `SessionRejected`
    pub fn root(&self) -> &DomainError {
        match self {
            DomainError::SessionRejected { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
