//! # Storefront Core
//!
//! Domain layer of the Storefront backend: the authentication and session
//! subsystem every other endpoint relies on for identity and role checks.
//!
//! - [`services::token`] signs and verifies access/refresh token pairs
//! - [`repositories::token`] is the ledger of live refresh tokens
//! - [`repositories::user`] is the credential store interface
//! - [`services::auth`] orchestrates login, logout, silent refresh and role checks

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    hash_token, Claims, NewUser, RefreshToken, SessionVerification, TokenPair, TokenStatus, User,
    UserRole,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{TokenRepository, UserRepository};
pub use services::{
    BcryptPasswordHasher, PasswordHasher, SessionService, SessionServiceConfig, TokenProvider,
    TokenService, TokenServiceConfig,
};

#[cfg(any(test, feature = "mocks"))]
pub use repositories::{InMemoryTokenRepository, MockUserRepository};
