//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::{BcryptPasswordHasher, PasswordHasher, SessionService, SessionServiceConfig};
pub use token::{TokenProvider, TokenService, TokenServiceConfig};
