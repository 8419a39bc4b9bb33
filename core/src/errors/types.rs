//! Authentication and token error types
//!
//! Messages are deliberately generic: the HTTP layer decides how much of
//! each variant a client gets to see.

use thiserror::Error;

/// Credential and authorization failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No user is registered under the presented email
    #[error("User not found")]
    UserNotFound,

    /// The presented password does not match the stored hash
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User already exists")]
    UserAlreadyExists,

    /// The identity lacks the admin or worker role required by the operation
    #[error("Insufficient permissions")]
    InsufficientPermissions,
}

/// Token verification, refresh and ledger failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Expired beyond the configured leeway
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    /// The header names an algorithm outside the HMAC family
    #[error("Invalid token algorithm")]
    InvalidAlgorithm,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },

    /// Access and refresh token were issued to different identities
    #[error("Token user mismatch")]
    SubjectMismatch,

    /// The refresh token is not (or no longer) recorded in the ledger
    #[error("Refresh token not found")]
    RefreshTokenNotFound,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
